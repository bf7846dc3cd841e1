//! JSON export for simulation results
//!
//! The whole [`SimulationResult`] is serialized: customer table, summary and
//! per-server timelines.

use crate::error::MetricsError;
use crate::export::ResultExporter;
use crate::summary::SimulationResult;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }
}

impl ResultExporter for JsonExporter {
    fn export(&self, result: &SimulationResult) -> Result<(), MetricsError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };

        let mut file = File::create(&self.path)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create file: {e}")))?;
        file.write_all(json.as_bytes())
            .map_err(|e| MetricsError::ExportError(format!("Failed to write to file: {e}")))?;

        debug!(path = %self.path.display(), bytes = json.len(), "Exported result as JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;
    use queuesim_core::{CustomerId, ScheduledCustomer, ServerId};

    #[test]
    fn test_json_export() {
        let rows = vec![
            ScheduledCustomer {
                id: CustomerId(0),
                inter_arrival: 0,
                arrival: 0,
                service: 2,
                server: ServerId(0),
                start: 0,
            },
            ScheduledCustomer {
                id: CustomerId(1),
                inter_arrival: 1,
                arrival: 1,
                service: 1,
                server: ServerId(0),
                start: 2,
            },
        ];
        let result = aggregate(&rows, 1).unwrap();

        let temp_file = std::env::temp_dir().join("queuesim_test_result.json");
        let exporter = JsonExporter::new(&temp_file, true);
        assert!(exporter.export(&result).is_ok());

        let json_content = std::fs::read_to_string(&temp_file).unwrap();
        let parsed: SimulationResult = serde_json::from_str(&json_content).unwrap();
        assert_eq!(parsed, result);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_json_export_to_missing_directory_fails() {
        let rows = vec![ScheduledCustomer {
            id: CustomerId(0),
            inter_arrival: 0,
            arrival: 0,
            service: 1,
            server: ServerId(0),
            start: 0,
        }];
        let result = aggregate(&rows, 1).unwrap();
        let path = std::env::temp_dir()
            .join("queuesim_no_such_dir")
            .join("nested")
            .join("out.json");

        assert!(matches!(
            JsonExporter::new(&path, false).export(&result),
            Err(MetricsError::ExportError(_))
        ));
    }
}
