//! G/G/S: general arrivals and service, `c` servers
//!
//! Approximation: the M/M/c queue wait scaled by `(Ca + Cs) / 2`, where `Ca`
//! and `Cs` are the squared coefficients of variation of the inter-arrival and
//! service times. The `(1 - ρ)` and `(1 - ρ)²` denominators carry [`EPSILON`]
//! so heavily loaded systems stay finite.

use crate::error::AnalyticError;
use crate::types::{validate_servers, ErlangTerms, QueueMetrics};
use queuesim_core::logging::diagnostics;
use queuesim_core::validation::{validate_finite, validate_non_negative, validate_positive_finite};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Guard added to the `(1 - ρ)` and `(1 - ρ)²` denominators
pub const EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GgsParams {
    pub mean_inter_arrival: f64,
    pub mean_service: f64,
    pub arrival_variance: f64,
    pub service_variance: f64,
    pub servers: usize,
}

impl GgsParams {
    /// Variances that make both processes exponential, i.e. an M/M/c queue
    pub fn exponential(mean_inter_arrival: f64, mean_service: f64, servers: usize) -> Self {
        Self {
            mean_inter_arrival,
            mean_service,
            arrival_variance: mean_inter_arrival.powi(2),
            service_variance: mean_service.powi(2),
            servers,
        }
    }

    pub fn validate(&self) -> Result<(), AnalyticError> {
        validate_positive_finite("mean_inter_arrival", self.mean_inter_arrival)?;
        validate_positive_finite("mean_service", self.mean_service)?;
        validate_finite("arrival_variance", self.arrival_variance)?;
        validate_non_negative("arrival_variance", self.arrival_variance)?;
        validate_finite("service_variance", self.service_variance)?;
        validate_non_negative("service_variance", self.service_variance)?;
        validate_servers(self.servers)
    }
}

pub fn ggs(params: &GgsParams) -> Result<QueueMetrics, AnalyticError> {
    params.validate()?;

    let lambda = 1.0 / params.mean_inter_arrival;
    let mu = 1.0 / params.mean_service;
    let c = params.servers as f64;
    let rho = lambda / (c * mu);
    if rho >= 1.0 {
        diagnostics::unstable_system("G/G/S", rho);
        return Err(AnalyticError::UnstableSystem { rho });
    }

    let ca = params.arrival_variance / params.mean_inter_arrival.powi(2);
    let cs = params.service_variance / params.mean_service.powi(2);

    let terms = ErlangTerms::new(lambda / mu, params.servers);
    let p0 = terms.p0(1.0 - rho + EPSILON);
    let lq_mmc = terms.tail_share(1.0 - rho + EPSILON) * rho / ((1.0 - rho).powi(2) + EPSILON);

    let wq = lq_mmc / lambda * (ca + cs) / 2.0;
    let lq = lambda * wq;
    let w = wq + 1.0 / mu;
    let l = lambda * w;

    debug!(rho, ca, cs, lq, servers = params.servers, "Computed G/G/S metrics");
    QueueMetrics { rho, p0, lq, l, wq, w }.checked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_service_halves_wait() {
        let exp = ggs(&GgsParams::exponential(1.0, 0.5, 1)).unwrap();
        let det = ggs(&GgsParams {
            service_variance: 0.0,
            ..GgsParams::exponential(1.0, 0.5, 1)
        })
        .unwrap();
        assert!((det.wq - exp.wq / 2.0).abs() < 1e-9);
        assert!((det.w - (det.wq + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_ggs_rejects_bad_params() {
        let base = GgsParams::exponential(1.0, 2.0, 3);
        assert!(ggs(&base).is_ok());

        let negative = GgsParams {
            arrival_variance: -1.0,
            ..base
        };
        assert!(matches!(
            ggs(&negative),
            Err(AnalyticError::InvalidParameter { ref name, .. }) if name == "arrival_variance"
        ));

        let overloaded = GgsParams {
            mean_inter_arrival: 0.5,
            ..base
        };
        assert!(matches!(ggs(&overloaded), Err(AnalyticError::UnstableSystem { .. })));

        let no_servers = GgsParams { servers: 0, ..base };
        assert!(ggs(&no_servers).is_err());
    }

    #[test]
    fn test_overflowing_variation_is_an_error() {
        // mean_service² underflows to zero, so Cs is infinite
        let params = GgsParams {
            mean_service: 1e-200,
            service_variance: 1e200,
            ..GgsParams::exponential(1.0, 1e-200, 1)
        };
        assert!(matches!(ggs(&params), Err(AnalyticError::NonFinite { .. })));
    }
}
