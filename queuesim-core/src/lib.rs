//! Core building blocks for the queuesim bank-queue simulator.
//!
//! This crate provides what every simulation run needs regardless of the
//! queue discipline: randomness, distributions, the customer record, parameter
//! validation, errors and logging.
//!
//! # Architecture Overview
//!
//! - [`dists`]: the Arrival Generator ([`CumulativeDistributionTable`],
//!   [`PoissonArrivals`]) and the Service Time Sampler
//!   ([`ExponentialServiceTime`]).
//! - [`randomness`]: the [`RandomProvider`] seam. Each run owns a provider;
//!   [`SeededRandomProvider`] makes runs reproducible.
//! - [`customer`]: [`ScheduledCustomer`] and [`Customer`] records.
//!
//! # Basic Usage
//!
//! ```rust
//! use queuesim_core::{ArrivalPattern, PoissonArrivals, SeededRandomProvider};
//!
//! let mut rng = SeededRandomProvider::new(42);
//! let mut arrivals = PoissonArrivals::new(1.5, 90).unwrap();
//! let gap = arrivals.next_inter_arrival(&mut rng);
//! assert!(gap < 90);
//! ```
//!
//! # Time Model
//!
//! All timing uses [`Tick`], a whole number of abstract time units.

pub mod customer;
pub mod dists;
pub mod error;
pub mod logging;
pub mod randomness;
pub mod types;
pub mod validation;

pub use customer::{Customer, ScheduledCustomer};
pub use dists::{
    ArrivalPattern, ConstantArrivalPattern, ConstantServiceTime, CumulativeDistributionTable,
    CumulativeEntry, ExponentialServiceTime, PoissonArrivals, ServiceTimeDistribution,
    MAX_MEAN_SERVICE_TIME,
};
pub use error::SimError;
pub use logging::{
    customer_span, init_detailed_simulation_logging, init_simulation_logging,
    init_simulation_logging_with_level, simulation_span,
};
pub use randomness::{DrawSite, RandomProvider, ReplayRandomProvider, SeededRandomProvider};
pub use types::{CustomerId, ServerId, Tick};
pub use validation::{ValidationError, ValidationResult};
