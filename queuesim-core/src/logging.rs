//! Structured logging for simulation debugging
//!
//! # How to Control Terminal Logging Output
//!
//! ## 1. Use `init_detailed_simulation_logging()` (Recommended for debugging)
//! ```rust
//! use queuesim_core::init_detailed_simulation_logging;
//! init_detailed_simulation_logging();
//! ```
//! Shows every level, pretty-printed.
//!
//! ## 2. Use `init_simulation_logging_with_level()` for specific levels
//! ```rust
//! use queuesim_core::init_simulation_logging_with_level;
//! init_simulation_logging_with_level("debug");
//! ```
//!
//! ## 3. Use Environment Variables (Most flexible)
//! ```bash
//! RUST_LOG=debug cargo run --example bank_simulation
//! RUST_LOG=queuesim_components=trace cargo run --example bank_simulation
//! ```
//!
//! ## Log Level Guidelines:
//! - **TRACE**: Individual draws and per-customer assignments (very verbose)
//! - **DEBUG**: Workload generation and aggregation steps
//! - **INFO**: Run start/end with summary figures
//! - **WARN**: Data-quality signals such as utilization above 1
//! - **ERROR**: Rejected parameters and unstable analytic systems
//!
//! All initializers use `try_init`, so calling them more than once (for
//! example from several tests) is harmless.

use crate::types::{CustomerId, ServerId, Tick};
use tracing::{debug, error, info, trace, warn, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the simulation with sensible defaults
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{level},queuesim_core={level},queuesim_components={level},queuesim_metrics={level},queuesim_analytic={level}"
        )
        .into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Initialize logging with custom configuration for advanced debugging
pub fn init_detailed_simulation_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "trace,queuesim_core=trace,queuesim_components=trace,queuesim_metrics=debug".into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Detailed simulation logging initialized");
    }
}

/// Create a span for tracking one simulation run
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Create a span for tracking one customer through the allocator
pub fn customer_span(customer: CustomerId) -> Span {
    tracing::trace_span!("customer", id = customer.0)
}

/// Logging utilities for common simulation events
pub mod events {
    use super::*;

    pub fn simulation_started(name: &str, customers: usize, servers: usize, seed: Option<u64>) {
        info!(
            simulation = name,
            customers,
            servers,
            seed = ?seed,
            "Simulation started"
        );
    }

    pub fn customer_assigned(customer: CustomerId, server: ServerId, arrival: Tick, start: Tick) {
        trace!(
            customer = customer.0,
            server = server.0,
            arrival,
            start,
            wait = start - arrival,
            "Customer assigned"
        );
    }

    pub fn workload_generated(customers: usize, last_arrival: Tick, total_service: Tick) {
        debug!(customers, last_arrival, total_service, "Workload generated");
    }

    pub fn simulation_completed(name: &str, customers: usize, mean_wait: f64, window: Tick) {
        info!(
            simulation = name,
            customers,
            mean_wait,
            window,
            "Simulation completed"
        );
    }
}

/// Logging utilities for error conditions and warnings
pub mod diagnostics {
    use super::*;

    /// Utilization above 1 can only come from degenerate inputs
    pub fn utilization_out_of_range(server: ServerId, utilization: f64) {
        warn!(
            server = server.0,
            utilization,
            "Server utilization outside [0, 1]"
        );
    }

    pub fn unstable_system(model: &str, rho: f64) {
        error!(model, rho, "Queue is unstable (rho >= 1)");
    }

    pub fn invalid_parameter(name: &str, constraint: &str) {
        error!(name, constraint, "Rejected simulation parameter");
    }
}
