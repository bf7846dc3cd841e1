//! # queuesim - bank teller queue simulation
//!
//! A seedable M/M/n discrete-event simulator plus closed-form M/M/S, G/G/S
//! and M/G/S formulas to compare it against.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! queuesim = "0.1"
//! ```
//!
//! ```rust
//! use queuesim::prelude::*;
//!
//! let result = run_mmn(&MmnConfig::bank_default().with_seed(42)).unwrap();
//! assert_eq!(result.customers.len(), 90);
//! println!("mean wait: {:.2}", result.summary.mean_wait);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Includes `analytic`
//! - `full`: All features enabled
//! - `analytic`: Closed-form queue models

// Re-export core (always available)
pub use queuesim_core as core;

pub use queuesim_components as components;

pub use queuesim_metrics as metrics;

#[cfg(feature = "analytic")]
pub use queuesim_analytic as analytic;

// Convenience re-exports of commonly used items
pub mod prelude {
    //! Commonly used types and functions

    pub use queuesim_core::{
        init_simulation_logging, Customer, CustomerId, RandomProvider, ReplayRandomProvider,
        SeededRandomProvider, ServerId, SimError, Tick,
    };

    pub use queuesim_components::{run_mmn, run_mmn_with_provider, schedule, MmnConfig, Workload};

    pub use queuesim_metrics::{
        export_csv, export_json, publish_result, SimulationResult, SimulationSummary,
    };

    #[cfg(feature = "analytic")]
    pub use queuesim_analytic::{
        ggs, mgs, mms, AnalyticError, GgsParams, QueueMetrics, RateInput, ServiceDistribution,
    };
}
