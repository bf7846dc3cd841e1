//! Export functionality for simulation results
//!
//! Exporters write a [`SimulationResult`] to disk so runs can be charted or
//! compared with external tools.

pub mod csv;
pub mod json;

use crate::error::MetricsError;
use crate::summary::SimulationResult;
use std::path::Path;

/// Trait for writing a simulation result to some destination
pub trait ResultExporter {
    fn export(&self, result: &SimulationResult) -> Result<(), MetricsError>;
}

/// Export a result to JSON
///
/// # Example
/// ```no_run
/// # use queuesim_metrics::SimulationResult;
/// # fn demo(result: &SimulationResult) {
/// use queuesim_metrics::export::export_json;
///
/// export_json(result, "results/run.json", true).unwrap();
/// # }
/// ```
pub fn export_json(
    result: &SimulationResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), MetricsError> {
    let exporter = json::JsonExporter::new(path.as_ref(), pretty);
    exporter.export(result)
}

/// Export a result to CSV
///
/// Writes the customer table to `path` and per-server utilization to
/// `{stem}_servers.csv` next to it.
pub fn export_csv(result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), MetricsError> {
    let exporter = csv::CsvExporter::new(path.as_ref());
    exporter.export(result)
}
