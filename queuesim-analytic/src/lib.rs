//! Closed-form queueing formulas
//!
//! Stateless calculators for the steady state of multi-server queues. They
//! do not depend on the simulator and are handy for checking a simulated run
//! against theory.
//!
//! - [`mms`]: M/M/S, inputs as rates or as mean times ([`RateInput`])
//! - [`ggs`]: G/G/S approximation from means and variances ([`GgsParams`])
//! - [`mgs`]: M/G/S with a normal or uniform service time ([`ServiceDistribution`])
//!
//! Every model returns a [`QueueMetrics`] or an [`AnalyticError`]; a load of
//! `ρ >= 1` is always [`AnalyticError::UnstableSystem`].

pub mod error;
pub mod ggs;
pub mod mgs;
pub mod mms;
pub mod types;

pub use error::AnalyticError;
pub use ggs::{ggs, GgsParams, EPSILON};
pub use mgs::{mgs, ServiceDistribution};
pub use mms::mms;
pub use types::{QueueMetrics, RateInput, MAX_SERVERS};
