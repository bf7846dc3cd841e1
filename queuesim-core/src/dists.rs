//! Distribution traits and implementations for arrival patterns and service times
//!
//! Arrivals come from a discretized Poisson table sampled by inverse transform
//! ([`CumulativeDistributionTable`], [`PoissonArrivals`]). Service durations come
//! from inverse-transform exponential sampling rounded up to whole ticks
//! ([`ExponentialServiceTime`]). All sampling goes through a [`RandomProvider`]
//! owned by the caller, which keeps runs reproducible.

use crate::draw_site;
use crate::randomness::RandomProvider;
use crate::types::Tick;
use crate::validation::{validate_positive, validate_positive_finite, validate_range, ValidationResult};
use serde::{Deserialize, Serialize};

/// Trait for generating inter-arrival times
pub trait ArrivalPattern: Send {
    /// Ticks between the previous arrival and the next one
    fn next_inter_arrival(&mut self, rng: &mut dyn RandomProvider) -> Tick;
}

/// Trait for sampling service times from a distribution
pub trait ServiceTimeDistribution: Send {
    /// Service duration of a single customer, in ticks
    fn sample(&mut self, rng: &mut dyn RandomProvider) -> Tick;
}

// =============================================================================
// Cumulative distribution table
// =============================================================================

/// One row of a [`CumulativeDistributionTable`]: `P(X <= value)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeEntry {
    pub value: Tick,
    pub probability: f64,
}

/// Discretized cumulative distribution over inter-arrival counts.
///
/// Probabilities are non-decreasing and the last entry is exactly `1.0`, so
/// every uniform draw in `[0, 1)` maps to some bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeDistributionTable {
    entries: Vec<CumulativeEntry>,
}

impl CumulativeDistributionTable {
    /// Tabulate `P(X <= k)` for `X ~ Poisson(rate)` and `k = 0..num_entries`.
    ///
    /// Each Poisson term `e^-rate * rate^k / k!` is evaluated in log space,
    /// with `ln k!` carried forward, so neither `e^-rate` underflows for large
    /// rates nor does a factorial overflow for large `k`.
    pub fn poisson(rate: f64, num_entries: usize) -> ValidationResult<Self> {
        validate_positive_finite("arrival_rate", rate)?;
        validate_positive("num_entries", num_entries)?;

        let ln_rate = rate.ln();
        let mut ln_factorial = 0.0_f64;
        let mut entries = Vec::with_capacity(num_entries);
        let mut cumulative = 0.0_f64;
        for k in 0..num_entries {
            if k > 0 {
                ln_factorial += (k as f64).ln();
            }
            let term = (k as f64 * ln_rate - rate - ln_factorial).exp();
            // Rounding can push the running sum past 1 before the last entry
            cumulative = (cumulative + term).min(1.0);
            entries.push(CumulativeEntry {
                value: k as Tick,
                probability: cumulative,
            });
        }
        if let Some(last) = entries.last_mut() {
            last.probability = 1.0;
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CumulativeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inverse transform: the first `k` with `u < P(k)`.
    ///
    /// Falls back to the final bucket when nothing matches, which the clamp to
    /// `1.0` only allows for `u >= 1.0`.
    pub fn lookup(&self, u: f64) -> Tick {
        self.entries
            .iter()
            .find(|entry| u < entry.probability)
            .or_else(|| self.entries.last())
            .map_or(0, |entry| entry.value)
    }

    /// Half-open probability interval `[P(k-1), P(k))` of each bucket, with `P(-1) = 0`.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let lows = std::iter::once(0.0).chain(self.entries.iter().map(|e| e.probability));
        lows.zip(self.entries.iter().map(|e| e.probability))
    }

    /// Interval labels such as `"0.0000-0.3679"`, one per bucket.
    pub fn range_labels(&self) -> Vec<String> {
        self.intervals()
            .map(|(lo, hi)| format!("{lo:.4}-{hi:.4}"))
            .collect()
    }
}

// =============================================================================
// Arrival Pattern Implementations
// =============================================================================

/// Simple constant arrival pattern
#[derive(Debug, Clone)]
pub struct ConstantArrivalPattern {
    inter_arrival: Tick,
}

impl ConstantArrivalPattern {
    pub fn new(inter_arrival: Tick) -> Self {
        Self { inter_arrival }
    }
}

impl ArrivalPattern for ConstantArrivalPattern {
    fn next_inter_arrival(&mut self, _rng: &mut dyn RandomProvider) -> Tick {
        self.inter_arrival
    }
}

/// Poisson arrival pattern
///
/// Inter-arrival counts are drawn from a [`CumulativeDistributionTable`] built
/// for the given rate.
#[derive(Debug, Clone)]
pub struct PoissonArrivals {
    /// Rate parameter (lambda) - average arrivals per unit time
    rate: f64,
    table: CumulativeDistributionTable,
}

impl PoissonArrivals {
    /// Create a Poisson arrival pattern with a `num_entries`-bucket table
    pub fn new(rate: f64, num_entries: usize) -> ValidationResult<Self> {
        let table = CumulativeDistributionTable::poisson(rate, num_entries)?;
        Ok(Self { rate, table })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn table(&self) -> &CumulativeDistributionTable {
        &self.table
    }
}

impl ArrivalPattern for PoissonArrivals {
    fn next_inter_arrival(&mut self, rng: &mut dyn RandomProvider) -> Tick {
        let u = rng.sample_unit(draw_site!("inter_arrival"));
        self.table.lookup(u)
    }
}

// =============================================================================
// Service Time Distribution Implementations
// =============================================================================

/// Constant service time distribution
#[derive(Debug, Clone)]
pub struct ConstantServiceTime {
    duration: Tick,
}

impl ConstantServiceTime {
    pub fn new(duration: Tick) -> Self {
        Self { duration }
    }
}

impl ServiceTimeDistribution for ConstantServiceTime {
    fn sample(&mut self, _rng: &mut dyn RandomProvider) -> Tick {
        self.duration
    }
}

/// Largest accepted mean service time, in ticks
pub const MAX_MEAN_SERVICE_TIME: f64 = 1e12;

/// Exponential service time distribution
///
/// Samples `ceil(-mean * ln(u))` with `u` in `(0, 1)`, so every duration is a
/// whole number of ticks and at least one. The mean is capped at
/// [`MAX_MEAN_SERVICE_TIME`] so durations stay far below `Tick::MAX`.
#[derive(Debug, Clone)]
pub struct ExponentialServiceTime {
    /// Mean service time, in ticks
    mean: f64,
}

impl ExponentialServiceTime {
    pub fn new(mean: f64) -> ValidationResult<Self> {
        validate_positive_finite("mean_service_time", mean)?;
        validate_range("mean_service_time", mean, 0.0, MAX_MEAN_SERVICE_TIME)?;
        Ok(Self { mean })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Duration for a given uniform draw; `u` must lie in `(0, 1)`.
    pub fn duration_for(&self, u: f64) -> Tick {
        (-self.mean * u.ln()).ceil().max(1.0) as Tick
    }
}

impl ServiceTimeDistribution for ExponentialServiceTime {
    fn sample(&mut self, rng: &mut dyn RandomProvider) -> Tick {
        let site = draw_site!("service_time");
        // ln(0) is undefined and u == 1 would give a zero duration
        let u = loop {
            let u = rng.sample_open_unit(site);
            if u > 0.0 && u < 1.0 {
                break u;
            }
        };
        self.duration_for(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::{ReplayRandomProvider, SeededRandomProvider};

    #[test]
    fn test_poisson_table_is_monotone_and_clamped() {
        for &rate in &[0.1, 0.5, 1.0, 3.0, 12.5, 80.0] {
            for &n in &[1usize, 2, 5, 30, 200] {
                let table = CumulativeDistributionTable::poisson(rate, n).unwrap();
                assert_eq!(table.len(), n);
                let probs: Vec<f64> = table.entries().iter().map(|e| e.probability).collect();
                assert!(probs.windows(2).all(|w| w[0] <= w[1]), "rate={rate} n={n}");
                assert_eq!(*probs.last().unwrap(), 1.0);
            }
        }
    }

    #[test]
    fn test_poisson_table_values() {
        let table = CumulativeDistributionTable::poisson(1.0, 4).unwrap();
        let e = (-1.0_f64).exp();
        let probs: Vec<f64> = table.entries().iter().map(|e| e.probability).collect();
        assert!((probs[0] - e).abs() < 1e-12);
        assert!((probs[1] - 2.0 * e).abs() < 1e-12);
        assert!((probs[2] - 2.5 * e).abs() < 1e-12);
        assert_eq!(probs[3], 1.0);
    }

    #[test]
    fn test_poisson_table_large_rate_keeps_its_mass() {
        // e^-800 underflows, the log-space terms do not
        let table = CumulativeDistributionTable::poisson(800.0, 2_000).unwrap();
        let probs: Vec<f64> = table.entries().iter().map(|e| e.probability).collect();
        assert!(probs[700] > 0.0 && probs[700] < 0.01, "P(700) = {}", probs[700]);
        assert!((probs[800] - 0.5).abs() < 0.05, "P(800) = {}", probs[800]);
        assert!(probs[900] > 0.99);
        let median = table.lookup(0.5);
        assert!((780..=820).contains(&median), "median {median}");
    }

    #[test]
    fn test_poisson_table_rejects_bad_rate() {
        assert!(CumulativeDistributionTable::poisson(0.0, 5).is_err());
        assert!(CumulativeDistributionTable::poisson(-1.0, 5).is_err());
        assert!(CumulativeDistributionTable::poisson(f64::NAN, 5).is_err());
        assert!(CumulativeDistributionTable::poisson(1.0, 0).is_err());
    }

    #[test]
    fn test_lookup_picks_first_bucket_above_draw() {
        let table = CumulativeDistributionTable::poisson(1.0, 5).unwrap();
        assert_eq!(table.lookup(0.0), 0);
        assert_eq!(table.lookup(0.5), 1);
        assert_eq!(table.lookup(0.9), 2);
        assert_eq!(table.lookup(0.999_999), 4);
        // Out-of-range draws land in the final bucket
        assert_eq!(table.lookup(1.0), 4);
    }

    #[test]
    fn test_range_labels() {
        let table = CumulativeDistributionTable::poisson(1.0, 3).unwrap();
        let labels = table.range_labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], "0.0000-0.3679");
        assert_eq!(labels[1], "0.3679-0.7358");
        assert_eq!(labels[2], "0.7358-1.0000");
    }

    #[test]
    fn test_constant_patterns() {
        let mut rng = SeededRandomProvider::new(1);
        let mut arrivals = ConstantArrivalPattern::new(3);
        let mut service = ConstantServiceTime::new(2);
        assert_eq!(arrivals.next_inter_arrival(&mut rng), 3);
        assert_eq!(service.sample(&mut rng), 2);
    }

    #[test]
    fn test_exponential_service_time_is_positive_integer() {
        let mut rng = SeededRandomProvider::new(11);
        let mut dist = ExponentialServiceTime::new(2.0).unwrap();
        let mut total = 0u64;
        for _ in 0..10_000 {
            let sample = dist.sample(&mut rng);
            assert!(sample >= 1);
            total += sample;
        }
        // ceil() adds roughly half a tick on top of the mean
        let mean = total as f64 / 10_000.0;
        assert!(mean > 2.0 && mean < 3.2, "mean was {mean}");
    }

    #[test]
    fn test_exponential_service_time_resamples_endpoints() {
        let mut rng = ReplayRandomProvider::new([0.0, 1.0, 0.5], 5);
        let mut dist = ExponentialServiceTime::new(2.0).unwrap();
        // -2 * ln(0.5) = 1.386..., rounded up
        assert_eq!(dist.sample(&mut rng), 2);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_exponential_service_time_rejects_bad_mean() {
        assert!(ExponentialServiceTime::new(0.0).is_err());
        assert!(ExponentialServiceTime::new(-2.0).is_err());
        assert!(ExponentialServiceTime::new(f64::INFINITY).is_err());
        assert!(ExponentialServiceTime::new(MAX_MEAN_SERVICE_TIME).is_ok());
        let err = ExponentialServiceTime::new(1e20).unwrap_err();
        assert_eq!(err.field(), "mean_service_time");
    }

    #[test]
    fn test_poisson_arrivals_sample_table_buckets() {
        let mut arrivals = PoissonArrivals::new(2.0, 20).unwrap();
        assert_eq!(arrivals.rate(), 2.0);
        let mut rng = SeededRandomProvider::new(21);
        for _ in 0..1_000 {
            let k = arrivals.next_inter_arrival(&mut rng);
            assert!(k < 20);
        }
    }
}
