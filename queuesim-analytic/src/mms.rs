//! M/M/S: Poisson arrivals, exponential service, `c` parallel servers

use crate::error::AnalyticError;
use crate::types::{validate_servers, ErlangTerms, QueueMetrics, RateInput};
use queuesim_core::logging::diagnostics;
use tracing::debug;

/// Steady-state metrics of an M/M/c queue.
///
/// ```rust
/// use queuesim_analytic::{mms, RateInput};
///
/// let m = mms(RateInput::Rates { arrival_rate: 2.0, service_rate: 3.0 }, 1).unwrap();
/// assert!((m.p0 - 1.0 / 3.0).abs() < 1e-9);
/// ```
pub fn mms(input: RateInput, servers: usize) -> Result<QueueMetrics, AnalyticError> {
    let (lambda, mu) = input.rates()?;
    validate_servers(servers)?;

    let c = servers as f64;
    let rho = lambda / (c * mu);
    if rho >= 1.0 {
        diagnostics::unstable_system("M/M/S", rho);
        return Err(AnalyticError::UnstableSystem { rho });
    }

    let terms = ErlangTerms::new(c * rho, servers);
    let p0 = terms.p0(1.0 - rho);
    let lq = terms.tail_share(1.0 - rho) * rho / (1.0 - rho).powi(2);
    let l = lq + lambda / mu;
    let w = l / lambda;
    let wq = lq / lambda;

    debug!(rho, p0, lq, servers, "Computed M/M/S metrics");
    QueueMetrics { rho, p0, lq, l, wq, w }.checked()
}
