//! In-memory metrics store
//!
//! `MetricsRegistry` holds whatever the `metrics` macros emitted while a
//! [`crate::recorder::RegistryRecorder`] was installed. Histograms are backed
//! by `hdrhistogram` so percentiles of wait and turnaround times are cheap to
//! query after a run.

use hdrhistogram::Histogram as HdrHistogram;
use std::collections::BTreeMap;
use tracing::warn;

type Labels = Vec<(String, String)>;
type MetricKey = (String, Labels);

fn metric_key(name: &str, labels: &[(String, String)]) -> MetricKey {
    let mut labels = labels.to_vec();
    labels.sort();
    (name.to_string(), labels)
}

fn borrowed_key(name: &str, labels: &[(&str, &str)]) -> MetricKey {
    let owned = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>();
    metric_key(name, &owned)
}

/// Summary statistics of a recorded histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramStats {
    pub count: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
}

impl std::fmt::Display for HistogramStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "count={} mean={:.2} p50={} p90={} p99={} max={}",
            self.count, self.mean, self.p50, self.p90, self.p99, self.max
        )
    }
}

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: BTreeMap<MetricKey, u64>,
    gauges: BTreeMap<MetricKey, f64>,
    histograms: BTreeMap<MetricKey, HdrHistogram<u64>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_counter_owned(&mut self, name: &str, value: u64, labels: &[(String, String)]) {
        *self.counters.entry(metric_key(name, labels)).or_insert(0) += value;
    }

    pub fn set_counter_absolute_owned(&mut self, name: &str, value: u64, labels: &[(String, String)]) {
        self.counters.insert(metric_key(name, labels), value);
    }

    pub fn increment_gauge_owned(&mut self, name: &str, delta: f64, labels: &[(String, String)]) {
        *self.gauges.entry(metric_key(name, labels)).or_insert(0.0) += delta;
    }

    pub fn record_gauge_owned(&mut self, name: &str, value: f64, labels: &[(String, String)]) {
        self.gauges.insert(metric_key(name, labels), value);
    }

    /// Record a histogram sample. Values are rounded to whole ticks; negative
    /// and non-finite values are dropped.
    pub fn record_histogram_owned(&mut self, name: &str, value: f64, labels: &[(String, String)]) {
        if !value.is_finite() || value < 0.0 {
            warn!(metric = name, value, "Dropping histogram sample outside [0, inf)");
            return;
        }

        let key = metric_key(name, labels);
        if !self.histograms.contains_key(&key) {
            match HdrHistogram::<u64>::new(3) {
                Ok(histogram) => {
                    self.histograms.insert(key.clone(), histogram);
                }
                Err(e) => {
                    warn!(metric = name, error = %e, "Failed to create histogram");
                    return;
                }
            }
        }

        if let Some(histogram) = self.histograms.get_mut(&key) {
            if let Err(e) = histogram.record(value.round() as u64) {
                warn!(metric = name, value, error = %e, "Failed to record histogram sample");
            }
        }
    }

    pub fn get_counter(&self, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
        self.counters.get(&borrowed_key(name, labels)).copied()
    }

    pub fn get_counter_simple(&self, name: &str) -> Option<u64> {
        self.get_counter(name, &[])
    }

    pub fn get_gauge(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.gauges.get(&borrowed_key(name, labels)).copied()
    }

    pub fn get_histogram_stats(&self, name: &str, labels: &[(&str, &str)]) -> Option<HistogramStats> {
        let histogram = self.histograms.get(&borrowed_key(name, labels))?;
        if histogram.is_empty() {
            return None;
        }
        Some(HistogramStats {
            count: histogram.len(),
            min: histogram.min(),
            max: histogram.max(),
            mean: histogram.mean(),
            p50: histogram.value_at_quantile(0.50),
            p90: histogram.value_at_quantile(0.90),
            p99: histogram.value_at_quantile(0.99),
        })
    }

    pub fn clear(&mut self) {
        self.counters.clear();
        self.gauges.clear();
        self.histograms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_counters_and_gauges() {
        let mut registry = MetricsRegistry::new();
        registry.increment_counter_owned("customers_total", 2, &[]);
        registry.increment_counter_owned("customers_total", 3, &[]);
        registry.record_gauge_owned("utilization", 0.75, &labels(&[("server", "0")]));
        registry.increment_gauge_owned("utilization", 0.05, &labels(&[("server", "0")]));

        assert_eq!(registry.get_counter_simple("customers_total"), Some(5));
        let gauge = registry.get_gauge("utilization", &[("server", "0")]).unwrap();
        assert!((gauge - 0.8).abs() < 1e-12);
        assert_eq!(registry.get_gauge("utilization", &[("server", "1")]), None);
    }

    #[test]
    fn test_label_order_does_not_matter() {
        let mut registry = MetricsRegistry::new();
        registry.set_counter_absolute_owned("c", 9, &labels(&[("b", "2"), ("a", "1")]));
        assert_eq!(registry.get_counter("c", &[("a", "1"), ("b", "2")]), Some(9));
    }

    #[test]
    fn test_histogram_stats() {
        let mut registry = MetricsRegistry::new();
        for v in 1..=100 {
            registry.record_histogram_owned("wait", v as f64, &[]);
        }
        registry.record_histogram_owned("wait", -1.0, &[]);

        let stats = registry.get_histogram_stats("wait", &[]).unwrap();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 100);
        assert!((stats.mean - 50.5).abs() < 0.1);
        assert!(stats.p50 >= 49 && stats.p50 <= 51);

        registry.clear();
        assert!(registry.get_histogram_stats("wait", &[]).is_none());
    }
}
