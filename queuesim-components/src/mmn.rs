//! M/M/n bank queue runner
//!
//! Ties the pieces together: validate a [`MmnConfig`], generate a workload
//! from a Poisson arrival table and exponential service times, hand customers
//! to a [`ServerPool`] in arrival order, then aggregate.
//!
//! # Example
//!
//! ```rust
//! use queuesim_components::{run_mmn, MmnConfig};
//!
//! let config = MmnConfig::new(2.0, 3.0, 50, 2).with_seed(7);
//! let result = run_mmn(&config).unwrap();
//! assert_eq!(result.customers.len(), 50);
//! assert_eq!(result.summary.utilization.len(), 2);
//! ```

use crate::server::ServerPool;
use crate::workload::{generate_workload, Workload};
use queuesim_core::logging::{customer_span, diagnostics, events, simulation_span};
use queuesim_core::validation::{validate_positive_finite, validate_range, ValidationResult};
use queuesim_core::{
    CustomerId, ExponentialServiceTime, PoissonArrivals, RandomProvider, ScheduledCustomer,
    SeededRandomProvider, SimError, MAX_MEAN_SERVICE_TIME,
};
use queuesim_metrics::{aggregate, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Upper bound on customers in one run
pub const MAX_CUSTOMERS: usize = 1_000_000;
/// Upper bound on servers in one run
pub const MAX_SERVERS: usize = ServerPool::MAX_SERVERS;

/// Parameters of one M/M/n run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmnConfig {
    /// Poisson parameter of the inter-arrival table, i.e. the mean gap in ticks
    pub arrival_rate: f64,
    /// Mean of the exponential service time, in ticks, at most [`MAX_MEAN_SERVICE_TIME`]
    pub mean_service_time: f64,
    pub customers: usize,
    pub servers: usize,
    /// Fixed seed for reproducible runs; `None` seeds from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MmnConfig {
    pub fn new(arrival_rate: f64, mean_service_time: f64, customers: usize, servers: usize) -> Self {
        Self {
            arrival_rate,
            mean_service_time,
            customers,
            servers,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The bank branch setup: 90 customers, 3 tellers
    pub fn bank_default() -> Self {
        Self::new(2.0, 4.0, 90, 3)
    }

    /// Check every parameter, reporting the first violation
    pub fn validate(&self) -> ValidationResult<()> {
        validate_positive_finite("arrival_rate", self.arrival_rate)?;
        validate_positive_finite("mean_service_time", self.mean_service_time)?;
        validate_range("mean_service_time", self.mean_service_time, 0.0, MAX_MEAN_SERVICE_TIME)?;
        validate_range("customers", self.customers, 1, MAX_CUSTOMERS)?;
        validate_range("servers", self.servers, 1, MAX_SERVERS)?;
        Ok(())
    }
}

impl Default for MmnConfig {
    fn default() -> Self {
        Self::bank_default()
    }
}

/// Run an M/M/n simulation with a provider built from `config.seed`.
#[instrument(skip(config), fields(customers = config.customers, servers = config.servers))]
pub fn run_mmn(config: &MmnConfig) -> Result<SimulationResult, SimError> {
    let mut rng = SeededRandomProvider::from_optional_seed(config.seed);
    run_mmn_with_provider(config, &mut rng)
}

/// Run an M/M/n simulation drawing from `rng`.
pub fn run_mmn_with_provider(
    config: &MmnConfig,
    rng: &mut dyn RandomProvider,
) -> Result<SimulationResult, SimError> {
    config.validate().map_err(|e| {
        let err = SimError::from(e);
        if let SimError::InvalidParameter { name, constraint } = &err {
            diagnostics::invalid_parameter(name, constraint);
        }
        err
    })?;

    let _span = simulation_span("mmn").entered();
    events::simulation_started("mmn", config.customers, config.servers, config.seed);

    let mut arrivals = PoissonArrivals::new(config.arrival_rate, config.customers)?;
    let mut service = ExponentialServiceTime::new(config.mean_service_time)?;
    let workload = generate_workload(&mut arrivals, &mut service, config.customers, rng)?;

    let result = schedule(&workload, config.servers)?;

    events::simulation_completed(
        "mmn",
        result.summary.customers,
        result.summary.mean_wait,
        result.summary.observation_window,
    );
    Ok(result)
}

/// Serve a pre-built workload with `servers` tellers and aggregate the outcome.
pub fn schedule(workload: &Workload, servers: usize) -> Result<SimulationResult, SimError> {
    let scheduled = allocate(workload, servers)?;
    aggregate(&scheduled, servers).map_err(|e| SimError::Internal(e.to_string()))
}

/// Assign every customer of `workload` to a server, in arrival order.
pub fn allocate(workload: &Workload, servers: usize) -> Result<Vec<ScheduledCustomer>, SimError> {
    let mut pool = ServerPool::new(servers)?;
    let arrivals = workload.arrival_times();

    let mut scheduled = Vec::with_capacity(workload.len());
    for (i, ((&arrival, &service), &inter_arrival)) in arrivals
        .iter()
        .zip(workload.services())
        .zip(workload.inter_arrivals())
        .enumerate()
    {
        let id = CustomerId(i);
        let assignment = customer_span(id).in_scope(|| pool.assign(arrival, service))?;
        events::customer_assigned(id, assignment.server, arrival, assignment.start);

        scheduled.push(ScheduledCustomer {
            id,
            inter_arrival,
            arrival,
            service,
            server: assignment.server,
            start: assignment.start,
        });
    }
    Ok(scheduled)
}
