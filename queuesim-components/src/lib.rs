//! Simulation components for the bank-queue simulator
//!
//! This crate provides the parts that turn a workload into a schedule:
//! the [`ServerPool`] allocator, [`Workload`] generation, and the M/M/n runner
//! built from them.

pub mod mmn;
pub mod server;
pub mod workload;

pub use mmn::{allocate, run_mmn, run_mmn_with_provider, schedule, MmnConfig, MAX_CUSTOMERS, MAX_SERVERS};
pub use server::{Assignment, Server, ServerPool};
pub use workload::{generate_workload, Workload};
