//! Customer workloads
//!
//! A [`Workload`] is the input side of a run: one inter-arrival gap and one
//! service duration per customer. It can be generated from distributions or
//! written out by hand.

use queuesim_core::logging::events;
use queuesim_core::validation::validate_positive;
use queuesim_core::{ArrivalPattern, RandomProvider, ServiceTimeDistribution, SimError, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    inter_arrivals: Vec<Tick>,
    services: Vec<Tick>,
}

impl Workload {
    /// Build a workload from explicit gaps and durations.
    ///
    /// Arrival time of customer `i` is the running sum of `inter_arrivals[..=i]`.
    /// The last arrival plus the total service must fit in a [`Tick`], which
    /// bounds every start and end time a pool can produce from this workload.
    pub fn new(inter_arrivals: Vec<Tick>, services: Vec<Tick>) -> Result<Self, SimError> {
        validate_positive("customers", inter_arrivals.len())?;
        if inter_arrivals.len() != services.len() {
            return Err(SimError::invalid(
                "services",
                format!("one per customer ({} customers, {} services)", inter_arrivals.len(), services.len()),
            ));
        }
        let last_arrival = checked_total(&inter_arrivals).ok_or_else(|| {
            SimError::invalid("inter_arrivals", format!("summing to at most {}", Tick::MAX))
        })?;
        checked_total(&services)
            .and_then(|total| total.checked_add(last_arrival))
            .ok_or_else(|| {
                SimError::invalid(
                    "services",
                    format!("summing with the last arrival ({last_arrival}) to at most {}", Tick::MAX),
                )
            })?;

        Ok(Self {
            inter_arrivals,
            services,
        })
    }

    pub fn len(&self) -> usize {
        self.inter_arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inter_arrivals.is_empty()
    }

    pub fn inter_arrivals(&self) -> &[Tick] {
        &self.inter_arrivals
    }

    pub fn services(&self) -> &[Tick] {
        &self.services
    }

    /// Absolute arrival times, non-decreasing
    pub fn arrival_times(&self) -> Vec<Tick> {
        self.inter_arrivals
            .iter()
            .scan(0, |clock, gap| {
                *clock += gap;
                Some(*clock)
            })
            .collect()
    }

    pub fn total_service(&self) -> Tick {
        self.services.iter().sum()
    }
}

fn checked_total(ticks: &[Tick]) -> Option<Tick> {
    ticks.iter().try_fold(0, |acc: Tick, &t| acc.checked_add(t))
}

/// Draw a workload of `customers` customers.
///
/// All service durations are drawn first, then the `customers - 1`
/// inter-arrival gaps. Customer 0 arrives at tick 0.
pub fn generate_workload(
    arrivals: &mut dyn ArrivalPattern,
    service: &mut dyn ServiceTimeDistribution,
    customers: usize,
    rng: &mut dyn RandomProvider,
) -> Result<Workload, SimError> {
    validate_positive("customers", customers)?;

    let services: Vec<Tick> = (0..customers).map(|_| service.sample(rng)).collect();

    let mut inter_arrivals = Vec::with_capacity(customers);
    inter_arrivals.push(0);
    inter_arrivals.extend((1..customers).map(|_| arrivals.next_inter_arrival(rng)));

    let workload = Workload::new(inter_arrivals, services)?;
    events::workload_generated(
        workload.len(),
        workload.arrival_times().last().copied().unwrap_or(0),
        workload.total_service(),
    );
    Ok(workload)
}
