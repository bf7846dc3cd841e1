//! Per-server schedules
//!
//! A [`ServerTimeline`] lists the busy segments of one teller in service
//! order. It is the data a Gantt chart needs and the source of per-server
//! busy time for utilization.

use crate::error::MetricsError;
use queuesim_core::{Customer, CustomerId, ServerId, Tick};
use serde::{Deserialize, Serialize};

/// One customer's stay at a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub customer: CustomerId,
    pub start: Tick,
    pub end: Tick,
}

impl TimelineSegment {
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTimeline {
    pub server: ServerId,
    pub segments: Vec<TimelineSegment>,
}

impl ServerTimeline {
    pub fn new(server: ServerId) -> Self {
        Self {
            server,
            segments: Vec::new(),
        }
    }

    /// Sum of service durations handled by this server
    pub fn busy_time(&self) -> Tick {
        self.segments.iter().map(TimelineSegment::duration).sum()
    }

    pub fn customers_served(&self) -> usize {
        self.segments.len()
    }

    /// Time the server sat idle inside an observation window of `window` ticks
    pub fn idle_time(&self, window: Tick) -> Tick {
        window.saturating_sub(self.busy_time())
    }

    /// True when no two segments overlap and they appear in start order
    pub fn is_sequential(&self) -> bool {
        self.segments.windows(2).all(|w| w[0].end <= w[1].start)
    }
}

/// Group customers by server, keeping arrival-index order within each server.
///
/// Returns one timeline per server in `0..servers`, including idle servers.
pub fn build_timelines(
    customers: &[Customer],
    servers: usize,
) -> Result<Vec<ServerTimeline>, MetricsError> {
    let mut timelines: Vec<ServerTimeline> = (0..servers).map(|i| ServerTimeline::new(ServerId(i))).collect();

    for customer in customers {
        let timeline = timelines.get_mut(customer.server.index()).ok_or_else(|| {
            MetricsError::InvalidMetric(format!(
                "{} assigned to {} but only {servers} servers exist",
                customer.id, customer.server
            ))
        })?;
        timeline.segments.push(TimelineSegment {
            customer: customer.id,
            start: customer.start,
            end: customer.end,
        });
    }

    Ok(timelines)
}
