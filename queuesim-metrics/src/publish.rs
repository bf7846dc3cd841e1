//! Publish a finished run through the `metrics` facade
//!
//! Whatever recorder is installed (global, or local via
//! [`crate::with_metrics_recorder`]) receives:
//! - `queuesim_customers_total` counter
//! - `queuesim_server_utilization{server}` gauge
//! - `queuesim_server_customers_total{server}` counter
//! - `queuesim_wait_time` and `queuesim_turnaround_time` histograms, one sample per customer

use crate::summary::SimulationResult;
use metrics::{counter, gauge, histogram};

pub const CUSTOMERS_TOTAL: &str = "queuesim_customers_total";
pub const SERVER_UTILIZATION: &str = "queuesim_server_utilization";
pub const SERVER_CUSTOMERS_TOTAL: &str = "queuesim_server_customers_total";
pub const WAIT_TIME: &str = "queuesim_wait_time";
pub const TURNAROUND_TIME: &str = "queuesim_turnaround_time";

pub fn publish_result(result: &SimulationResult) {
    counter!(CUSTOMERS_TOTAL).increment(result.customers.len() as u64);

    for u in &result.summary.utilization {
        let server = u.server.0.to_string();
        gauge!(SERVER_UTILIZATION, "server" => server.clone()).set(u.utilization);
        counter!(SERVER_CUSTOMERS_TOTAL, "server" => server).increment(u.customers_served as u64);
    }

    for c in &result.customers {
        histogram!(WAIT_TIME).record(c.wait as f64);
        histogram!(TURNAROUND_TIME).record(c.turnaround as f64);
    }
}
