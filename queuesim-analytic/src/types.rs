//! Inputs and outputs shared by the queue models

use crate::error::AnalyticError;
use queuesim_core::validation::{validate_positive_finite, validate_range};
use serde::{Deserialize, Serialize};

/// Upper bound on servers accepted by the formulas
pub const MAX_SERVERS: usize = 10_000;

/// Steady-state figures of a queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueMetrics {
    /// Utilization, λ / (cμ)
    pub rho: f64,
    /// Probability the system is empty
    pub p0: f64,
    /// Expected number waiting in the queue
    pub lq: f64,
    /// Expected number in the system
    pub l: f64,
    /// Expected wait in the queue
    pub wq: f64,
    /// Expected time in the system
    pub w: f64,
}

impl QueueMetrics {
    /// Reject results with a NaN or infinite field
    pub fn checked(self) -> Result<Self, AnalyticError> {
        for (name, value) in [
            ("rho", self.rho),
            ("p0", self.p0),
            ("lq", self.lq),
            ("l", self.l),
            ("wq", self.wq),
            ("w", self.w),
        ] {
            if !value.is_finite() {
                return Err(AnalyticError::NonFinite {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(self)
    }
}

/// Arrival and service parameters, given either as rates or as mean times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateInput {
    Rates { arrival_rate: f64, service_rate: f64 },
    Means { mean_inter_arrival: f64, mean_service: f64 },
}

impl RateInput {
    /// `(λ, μ)` after checking both values are finite and positive
    pub fn rates(&self) -> Result<(f64, f64), AnalyticError> {
        match *self {
            RateInput::Rates {
                arrival_rate,
                service_rate,
            } => {
                validate_positive_finite("arrival_rate", arrival_rate)?;
                validate_positive_finite("service_rate", service_rate)?;
                Ok((arrival_rate, service_rate))
            }
            RateInput::Means {
                mean_inter_arrival,
                mean_service,
            } => {
                validate_positive_finite("mean_inter_arrival", mean_inter_arrival)?;
                validate_positive_finite("mean_service", mean_service)?;
                Ok((1.0 / mean_inter_arrival, 1.0 / mean_service))
            }
        }
    }
}

pub(crate) fn validate_servers(servers: usize) -> Result<(), AnalyticError> {
    validate_range("servers", servers, 1, MAX_SERVERS)?;
    Ok(())
}

/// Sums behind the Erlang-C family of formulas for `c` servers at offered
/// load `a = λ/μ`.
///
/// Terms are accumulated iteratively so no factorial is formed. `head` and
/// `tail` are stored divided by `e^log_scale`: the running sum is rescaled
/// whenever it grows past [`RESCALE_THRESHOLD`], which keeps large offered
/// loads finite. Every formula only needs ratios of the two sums plus `p0`,
/// which [`ErlangTerms::p0`] recovers in log space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErlangTerms {
    /// Σ_{n<c} aⁿ/n!, scaled
    pub head: f64,
    /// aᶜ/c!, scaled
    pub tail: f64,
    /// Natural log of the factor both sums were divided by
    pub log_scale: f64,
}

const RESCALE_THRESHOLD: f64 = 1e250;

impl ErlangTerms {
    pub fn new(offered_load: f64, servers: usize) -> Self {
        let mut head = 0.0;
        let mut term = 1.0;
        let mut log_scale = 0.0;
        for n in 0..servers {
            head += term;
            term *= offered_load / (n + 1) as f64;
            if head.max(term) > RESCALE_THRESHOLD {
                head /= RESCALE_THRESHOLD;
                term /= RESCALE_THRESHOLD;
                log_scale += RESCALE_THRESHOLD.ln();
            }
        }
        Self {
            head,
            tail: term,
            log_scale,
        }
    }

    /// `head + tail / tail_denominator`, still scaled
    fn normalizer(&self, tail_denominator: f64) -> f64 {
        self.head + self.tail / tail_denominator
    }

    /// Probability of an empty system, `1 / (head + tail / tail_denominator)`
    pub fn p0(&self, tail_denominator: f64) -> f64 {
        (-(self.normalizer(tail_denominator).ln() + self.log_scale)).exp()
    }

    /// `p0 · aᶜ/c!`, the probability mass at exactly `c` customers
    pub fn tail_share(&self, tail_denominator: f64) -> f64 {
        self.tail / self.normalizer(tail_denominator)
    }
}
