//! Customer records produced by a simulation run
//!
//! A run moves each customer through two shapes: the allocator emits a
//! [`ScheduledCustomer`] (arrival, service, server and start known), and the
//! metrics aggregator completes it into a [`Customer`] with every derived time.

use crate::types::{CustomerId, ServerId, Tick};
use serde::{Deserialize, Serialize};

/// A customer after server assignment, before metrics are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCustomer {
    pub id: CustomerId,
    /// Ticks since the previous customer arrived (0 for the first customer)
    pub inter_arrival: Tick,
    /// Absolute arrival time
    pub arrival: Tick,
    /// Service duration
    pub service: Tick,
    /// Teller that served this customer
    pub server: ServerId,
    /// Time service began
    pub start: Tick,
}

/// A fully computed customer row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub inter_arrival: Tick,
    pub arrival: Tick,
    pub service: Tick,
    pub server: ServerId,
    pub start: Tick,
    pub end: Tick,
    /// Total time in the system: `end - arrival`
    pub turnaround: Tick,
    /// Time spent queued: `turnaround - service`
    pub wait: Tick,
    /// Time from arrival to service start. Equal to `wait` because service is
    /// a single non-preemptive stage.
    pub response: Tick,
}

impl Customer {
    /// True when the derived fields agree with each other
    pub fn is_consistent(&self) -> bool {
        self.end == self.start + self.service
            && self.turnaround == self.end - self.arrival
            && self.wait == self.turnaround - self.service
            && self.response == self.wait
            && self.start >= self.arrival
    }
}
