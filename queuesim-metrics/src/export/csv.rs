//! CSV export for simulation results
//!
//! Two files are written:
//! - `{path}` - one row per customer, the table a teller report prints
//! - `{stem}_servers.csv` - busy time, customers served and utilization per server

use crate::error::MetricsError;
use crate::export::ResultExporter;
use crate::summary::SimulationResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Path of the per-server file written next to the customer table
    pub fn servers_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("result");
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        parent.join(format!("{stem}_servers.csv"))
    }

    fn create(path: &Path) -> Result<BufWriter<File>, MetricsError> {
        File::create(path)
            .map(BufWriter::new)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create {}: {e}", path.display())))
    }

    fn export_customers(&self, result: &SimulationResult) -> Result<(), MetricsError> {
        let mut file = Self::create(&self.path)?;
        writeln!(
            file,
            "customer,inter_arrival,arrival,service,server,start,end,turnaround,wait,response"
        )?;
        for c in &result.customers {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{}",
                c.id.0,
                c.inter_arrival,
                c.arrival,
                c.service,
                c.server.0,
                c.start,
                c.end,
                c.turnaround,
                c.wait,
                c.response
            )?;
        }
        file.flush()?;
        Ok(())
    }

    fn export_servers(&self, result: &SimulationResult) -> Result<(), MetricsError> {
        let mut file = Self::create(&self.servers_path())?;
        writeln!(file, "server,busy_time,customers_served,utilization")?;
        for u in &result.summary.utilization {
            writeln!(
                file,
                "{},{},{},{:.6}",
                u.server.0, u.busy_time, u.customers_served, u.utilization
            )?;
        }
        file.flush()?;
        Ok(())
    }
}

impl ResultExporter for CsvExporter {
    fn export(&self, result: &SimulationResult) -> Result<(), MetricsError> {
        self.export_customers(result)?;
        self.export_servers(result)?;
        debug!(
            path = %self.path.display(),
            rows = result.customers.len(),
            "Exported result as CSV"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;
    use queuesim_core::{CustomerId, ScheduledCustomer, ServerId};

    #[test]
    fn test_csv_export() {
        let rows = vec![
            ScheduledCustomer {
                id: CustomerId(0),
                inter_arrival: 0,
                arrival: 0,
                service: 3,
                server: ServerId(0),
                start: 0,
            },
            ScheduledCustomer {
                id: CustomerId(1),
                inter_arrival: 1,
                arrival: 1,
                service: 2,
                server: ServerId(1),
                start: 1,
            },
        ];
        let result = aggregate(&rows, 2).unwrap();

        let temp_file = std::env::temp_dir().join("queuesim_test_run.csv");
        let exporter = CsvExporter::new(&temp_file);
        exporter.export(&result).unwrap();

        let customers = std::fs::read_to_string(&temp_file).unwrap();
        let lines: Vec<&str> = customers.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("customer,inter_arrival"));
        assert_eq!(lines[2], "1,1,1,2,1,1,3,2,0,0");

        let servers_path = exporter.servers_path();
        assert!(servers_path.ends_with("queuesim_test_run_servers.csv"));
        let servers = std::fs::read_to_string(&servers_path).unwrap();
        assert_eq!(servers.lines().count(), 3);
        assert!(servers.contains("0,3,1,1.000000"));

        std::fs::remove_file(temp_file).ok();
        std::fs::remove_file(servers_path).ok();
    }
}
