//! Metrics aggregation, observability and export for queue simulations
//!
//! - [`summary`]: turns a schedule into a [`SimulationResult`] with per-customer
//!   times, run-wide means and per-server utilization.
//! - [`timeline`]: per-server busy segments.
//! - [`publish`], [`recorder`], [`registry`]: push a result through the
//!   `metrics` facade and collect it in memory.
//! - [`export`]: JSON and CSV writers.

pub mod error;
pub mod export;
pub mod publish;
pub mod recorder;
pub mod registry;
pub mod summary;
pub mod timeline;

pub use error::MetricsError;
pub use export::{export_csv, export_json, ResultExporter};
pub use publish::publish_result;
pub use recorder::{with_metrics_recorder, RegistryRecorder};
pub use registry::{HistogramStats, MetricsRegistry};
pub use summary::{aggregate, complete_customer, ServerUtilization, SimulationResult, SimulationSummary};
pub use timeline::{build_timelines, ServerTimeline, TimelineSegment};
