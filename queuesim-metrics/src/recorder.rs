//! A `metrics::Recorder` implementation backed by `MetricsRegistry`.
//!
//! Prefer a *local* recorder to avoid global state:
//!
//! ```rust
//! # use std::sync::{Arc, Mutex};
//! # use queuesim_metrics::{MetricsRegistry, with_metrics_recorder};
//! let registry = Arc::new(Mutex::new(MetricsRegistry::new()));
//! with_metrics_recorder(&registry, || {
//!     metrics::counter!("customers_total", "run" => "demo").increment(1);
//! });
//! assert_eq!(registry.lock().unwrap().get_counter("customers_total", &[("run", "demo")]), Some(1));
//! ```

use crate::registry::MetricsRegistry;
use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct RegistryRecorder {
    registry: Arc<Mutex<MetricsRegistry>>,
}

impl RegistryRecorder {
    pub fn new(registry: Arc<Mutex<MetricsRegistry>>) -> Self {
        Self { registry }
    }
}

/// Run `f` with a recorder that collects into `registry`.
pub fn with_metrics_recorder<T>(registry: &Arc<Mutex<MetricsRegistry>>, f: impl FnOnce() -> T) -> T {
    let recorder = RegistryRecorder::new(registry.clone());
    metrics::with_local_recorder(&recorder, f)
}

struct Handle {
    registry: Arc<Mutex<MetricsRegistry>>,
    name: String,
    labels: Vec<(String, String)>,
}

impl Handle {
    // A poisoned registry drops the sample rather than panicking the run
    fn with_registry(&self, f: impl FnOnce(&mut MetricsRegistry)) {
        if let Ok(mut registry) = self.registry.lock() {
            f(&mut registry);
        }
    }
}

impl metrics::CounterFn for Handle {
    fn increment(&self, value: u64) {
        self.with_registry(|r| r.increment_counter_owned(&self.name, value, &self.labels));
    }

    fn absolute(&self, value: u64) {
        self.with_registry(|r| r.set_counter_absolute_owned(&self.name, value, &self.labels));
    }
}

impl metrics::GaugeFn for Handle {
    fn increment(&self, value: f64) {
        self.with_registry(|r| r.increment_gauge_owned(&self.name, value, &self.labels));
    }

    fn decrement(&self, value: f64) {
        self.with_registry(|r| r.increment_gauge_owned(&self.name, -value, &self.labels));
    }

    fn set(&self, value: f64) {
        self.with_registry(|r| r.record_gauge_owned(&self.name, value, &self.labels));
    }
}

impl metrics::HistogramFn for Handle {
    fn record(&self, value: f64) {
        self.with_registry(|r| r.record_histogram_owned(&self.name, value, &self.labels));
    }
}

impl RegistryRecorder {
    fn handle(&self, key: &Key) -> Arc<Handle> {
        let name = key.name().to_string();
        let labels = key
            .labels()
            .map(|l| (l.key().to_string(), l.value().to_string()))
            .collect::<Vec<_>>();
        Arc::new(Handle {
            registry: self.registry.clone(),
            name,
            labels,
        })
    }
}

impl Recorder for RegistryRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(self.handle(key))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::from_arc(self.handle(key))
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::from_arc(self.handle(key))
    }
}
