//! M/G/S: Poisson arrivals, general service, `c` servers
//!
//! The M/M/c queue length scaled by `(1 + cv²) / 2`, with `cv²` the squared
//! coefficient of variation of the service time. For one server this is the
//! Pollaczek-Khinchine formula.

use crate::error::AnalyticError;
use crate::types::{validate_servers, ErlangTerms, QueueMetrics};
use queuesim_core::logging::diagnostics;
use queuesim_core::validation::{validate_finite, validate_non_negative, validate_positive_finite};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Service time distribution, described by its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceDistribution {
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 },
}

impl ServiceDistribution {
    pub fn mean(&self) -> f64 {
        match *self {
            ServiceDistribution::Normal { mean, .. } => mean,
            ServiceDistribution::Uniform { min, max } => (min + max) / 2.0,
        }
    }

    pub fn variance(&self) -> f64 {
        match *self {
            ServiceDistribution::Normal { std_dev, .. } => std_dev.powi(2),
            ServiceDistribution::Uniform { min, max } => (max - min).powi(2) / 12.0,
        }
    }

    /// Squared coefficient of variation, variance / mean²
    pub fn cv_squared(&self) -> f64 {
        self.variance() / self.mean().powi(2)
    }

    pub fn validate(&self) -> Result<(), AnalyticError> {
        match *self {
            ServiceDistribution::Normal { mean, std_dev } => {
                validate_positive_finite("mean", mean)?;
                validate_finite("std_dev", std_dev)?;
                validate_non_negative("std_dev", std_dev)?;
            }
            ServiceDistribution::Uniform { min, max } => {
                validate_finite("min", min)?;
                validate_non_negative("min", min)?;
                validate_finite("max", max)?;
                if max < min {
                    return Err(AnalyticError::invalid("max", format!("at least min ({min})")));
                }
                validate_positive_finite("mean", (min + max) / 2.0)?;
            }
        }
        Ok(())
    }
}

pub fn mgs(
    arrival_rate: f64,
    servers: usize,
    distribution: ServiceDistribution,
) -> Result<QueueMetrics, AnalyticError> {
    validate_positive_finite("arrival_rate", arrival_rate)?;
    validate_servers(servers)?;
    distribution.validate()?;

    let lambda = arrival_rate;
    let mu = 1.0 / distribution.mean();
    let rho = lambda / (servers as f64 * mu);
    if rho >= 1.0 {
        diagnostics::unstable_system("M/G/S", rho);
        return Err(AnalyticError::UnstableSystem { rho });
    }

    let terms = ErlangTerms::new(lambda / mu, servers);
    let p0 = terms.p0(1.0 - rho);
    let lq_mmc = terms.tail_share(1.0 - rho) * rho / (1.0 - rho).powi(2);

    let cv2 = distribution.cv_squared();
    let lq = lq_mmc * (1.0 + cv2) / 2.0;
    let l = lq + lambda / mu;
    let wq = lq / lambda;
    let w = wq + 1.0 / mu;

    debug!(rho, cv2, lq, servers, "Computed M/G/S metrics");
    QueueMetrics { rho, p0, lq, l, wq, w }.checked()
}
