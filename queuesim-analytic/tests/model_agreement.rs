//! Cross-checks between the three queue models

use queuesim_analytic::{ggs, mgs, mms, GgsParams, QueueMetrics, RateInput, ServiceDistribution};

fn assert_close(a: &QueueMetrics, b: &QueueMetrics, tol: f64) {
    for (name, x, y) in [
        ("rho", a.rho, b.rho),
        ("p0", a.p0, b.p0),
        ("lq", a.lq, b.lq),
        ("l", a.l, b.l),
        ("wq", a.wq, b.wq),
        ("w", a.w, b.w),
    ] {
        assert!((x - y).abs() <= tol * (1.0 + y.abs()), "{name}: {x} vs {y}");
    }
}

#[test]
fn mm1_reference_values() {
    let m = mms(
        RateInput::Rates {
            arrival_rate: 2.0,
            service_rate: 3.0,
        },
        1,
    )
    .unwrap();
    assert!((m.rho - 0.667).abs() < 1e-3);
    assert!((m.p0 - 0.333).abs() < 1e-3);
    assert!((m.p0 - (1.0 - m.rho)).abs() < 1e-12);
}

#[test]
fn ggs_with_exponential_variances_reduces_to_mms() {
    for (mean_ia, mean_s, servers) in [(0.5, 1.0 / 3.0, 1), (1.0, 2.5, 3), (0.2, 1.5, 10), (1.0, 0.9, 1)] {
        let expected = mms(
            RateInput::Means {
                mean_inter_arrival: mean_ia,
                mean_service: mean_s,
            },
            servers,
        )
        .unwrap();
        let got = ggs(&GgsParams::exponential(mean_ia, mean_s, servers)).unwrap();
        assert_close(&got, &expected, 1e-6);
    }
}

#[test]
fn mgs_single_server_matches_pollaczek_khinchine() {
    let lambda = 0.8;
    let mean = 1.0;
    let std_dev = 0.4;
    let m = mgs(lambda, 1, ServiceDistribution::Normal { mean, std_dev }).unwrap();

    let rho = lambda * mean;
    let pk_lq = (lambda * lambda * std_dev * std_dev + rho * rho) / (2.0 * (1.0 - rho));
    assert!((m.lq - pk_lq).abs() < 1e-9);
    assert!((m.wq - pk_lq / lambda).abs() < 1e-9);
    assert!((m.l - (pk_lq + rho)).abs() < 1e-9);
}

#[test]
fn mgs_with_unit_cv_matches_mms() {
    // Normal with std_dev == mean has cv² = 1, the exponential case
    for (lambda, mean, servers) in [(2.0, 1.0 / 3.0, 1), (1.5, 1.8, 3), (4.0, 2.0, 9)] {
        let expected = mms(
            RateInput::Rates {
                arrival_rate: lambda,
                service_rate: 1.0 / mean,
            },
            servers,
        )
        .unwrap();
        let got = mgs(lambda, servers, ServiceDistribution::Normal { mean, std_dev: mean }).unwrap();
        assert_close(&got, &expected, 1e-9);
    }
}

#[test]
fn littles_law_holds() {
    let cases = [
        mms(
            RateInput::Rates {
                arrival_rate: 3.0,
                service_rate: 1.2,
            },
            4,
        )
        .unwrap(),
        mgs(1.0, 2, ServiceDistribution::Uniform { min: 0.5, max: 2.5 }).unwrap(),
    ];
    for m in cases {
        assert!(m.lq >= 0.0 && m.l >= m.lq);
        assert!(m.w >= m.wq);
        assert!(m.p0 > 0.0 && m.p0 <= 1.0);
    }
}

#[test]
fn metrics_serialize() {
    let m = mms(
        RateInput::Rates {
            arrival_rate: 2.0,
            service_rate: 3.0,
        },
        1,
    )
    .unwrap();
    let json = serde_json::to_value(m).unwrap();
    assert!(json.get("rho").is_some());
    assert!(json.get("wq").is_some());
}

#[test]
fn large_offered_load_stays_finite_across_models() {
    let expected = mms(
        RateInput::Rates {
            arrival_rate: 900.0,
            service_rate: 1.0,
        },
        1000,
    )
    .unwrap();
    assert!(expected.lq.is_finite() && expected.w.is_finite());

    let got = ggs(&GgsParams::exponential(1.0 / 900.0, 1.0, 1000)).unwrap();
    assert_close(&got, &expected, 1e-6);

    let unit_cv = mgs(900.0, 1000, ServiceDistribution::Normal { mean: 1.0, std_dev: 1.0 }).unwrap();
    assert_close(&unit_cv, &expected, 1e-9);
}
