//! Metrics aggregation for a completed schedule
//!
//! [`aggregate`] turns the allocator's [`ScheduledCustomer`] rows into
//! [`Customer`] rows with end, turnaround, wait and response times, then
//! computes run-wide means and per-server utilization.
//!
//! Utilization of a server is its busy time divided by the observation window
//! `max(end) - min(start)` across all customers. Values are not clamped to
//! `[0, 1]`; anything outside that range is logged as a data-quality signal.

use crate::error::MetricsError;
use crate::timeline::{build_timelines, ServerTimeline};
use queuesim_core::logging::diagnostics;
use queuesim_core::{Customer, ScheduledCustomer, ServerId, Tick};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Busy fraction of one server over the observation window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServerUtilization {
    pub server: ServerId,
    pub busy_time: Tick,
    pub customers_served: usize,
    pub utilization: f64,
}

/// Run-wide aggregate figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub customers: usize,
    pub servers: usize,
    pub mean_inter_arrival: f64,
    pub mean_service: f64,
    pub mean_turnaround: f64,
    pub mean_wait: f64,
    pub mean_response: f64,
    /// Earliest service start across all customers
    pub first_start: Tick,
    /// Latest service end across all customers
    pub last_end: Tick,
    /// `last_end - first_start`
    pub observation_window: Tick,
    /// One entry per server, indexed by server id
    pub utilization: Vec<ServerUtilization>,
}

impl SimulationSummary {
    pub fn utilization_of(&self, server: ServerId) -> Option<f64> {
        self.utilization.get(server.index()).map(|u| u.utilization)
    }

    pub fn utilization_map(&self) -> BTreeMap<ServerId, f64> {
        self.utilization
            .iter()
            .map(|u| (u.server, u.utilization))
            .collect()
    }

    /// Mean utilization across all servers
    pub fn mean_utilization(&self) -> f64 {
        if self.utilization.is_empty() {
            return 0.0;
        }
        self.utilization.iter().map(|u| u.utilization).sum::<f64>() / self.utilization.len() as f64
    }
}

/// Everything a simulation run produces. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Customers in arrival-index order
    pub customers: Vec<Customer>,
    pub summary: SimulationSummary,
    /// Per-server schedules, indexed by server id
    pub timelines: Vec<ServerTimeline>,
}

/// Derive end, turnaround, wait and response for one scheduled customer.
pub fn complete_customer(scheduled: &ScheduledCustomer) -> Result<Customer, MetricsError> {
    if scheduled.start < scheduled.arrival {
        return Err(MetricsError::InvalidMetric(format!(
            "{} starts at {} before arriving at {}",
            scheduled.id, scheduled.start, scheduled.arrival
        )));
    }

    let end = scheduled.start + scheduled.service;
    let turnaround = end - scheduled.arrival;
    let wait = turnaround - scheduled.service;
    let response = scheduled.start - scheduled.arrival;

    Ok(Customer {
        id: scheduled.id,
        inter_arrival: scheduled.inter_arrival,
        arrival: scheduled.arrival,
        service: scheduled.service,
        server: scheduled.server,
        start: scheduled.start,
        end,
        turnaround,
        wait,
        response,
    })
}

fn mean_of(customers: &[Customer], field: impl Fn(&Customer) -> Tick) -> f64 {
    customers.iter().map(|c| field(c) as f64).sum::<f64>() / customers.len() as f64
}

/// Aggregate a schedule over `servers` servers into a [`SimulationResult`].
pub fn aggregate(
    scheduled: &[ScheduledCustomer],
    servers: usize,
) -> Result<SimulationResult, MetricsError> {
    if scheduled.is_empty() {
        return Err(MetricsError::InvalidMetric(
            "cannot aggregate a run with no customers".to_string(),
        ));
    }
    if servers == 0 {
        return Err(MetricsError::InvalidMetric(
            "cannot aggregate a run with no servers".to_string(),
        ));
    }

    let customers = scheduled
        .iter()
        .map(complete_customer)
        .collect::<Result<Vec<_>, _>>()?;
    let timelines = build_timelines(&customers, servers)?;

    let first_start = customers.iter().map(|c| c.start).min().unwrap_or(0);
    let last_end = customers.iter().map(|c| c.end).max().unwrap_or(0);
    let observation_window = last_end - first_start;

    let utilization = timelines
        .iter()
        .map(|timeline| {
            let busy_time = timeline.busy_time();
            let utilization = if observation_window == 0 {
                0.0
            } else {
                busy_time as f64 / observation_window as f64
            };
            if !(0.0..=1.0).contains(&utilization) {
                diagnostics::utilization_out_of_range(timeline.server, utilization);
            }
            ServerUtilization {
                server: timeline.server,
                busy_time,
                customers_served: timeline.customers_served(),
                utilization,
            }
        })
        .collect::<Vec<_>>();

    let summary = SimulationSummary {
        customers: customers.len(),
        servers,
        mean_inter_arrival: mean_of(&customers, |c| c.inter_arrival),
        mean_service: mean_of(&customers, |c| c.service),
        mean_turnaround: mean_of(&customers, |c| c.turnaround),
        mean_wait: mean_of(&customers, |c| c.wait),
        mean_response: mean_of(&customers, |c| c.response),
        first_start,
        last_end,
        observation_window,
        utilization,
    };

    debug!(
        customers = summary.customers,
        servers,
        window = observation_window,
        mean_wait = summary.mean_wait,
        "Aggregated simulation metrics"
    );

    Ok(SimulationResult {
        customers,
        summary,
        timelines,
    })
}
