//! Simulate a three-teller bank branch and compare it with the M/M/S formula.
//!
//! Run with `RUST_LOG=debug cargo run --example bank_simulation` for
//! per-run logging. Results are written to the system temp directory.

use queuesim::prelude::*;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_simulation_logging();

    let config = MmnConfig::bank_default().with_seed(2024);
    let result = run_mmn(&config)?;
    let summary = &result.summary;

    println!("Customers served: {}", summary.customers);
    println!("Average inter-arrival time: {:.2}", summary.mean_inter_arrival);
    println!("Average service time:       {:.2}", summary.mean_service);
    println!("Average turnaround time:    {:.2}", summary.mean_turnaround);
    println!("Average wait time:          {:.2}", summary.mean_wait);
    println!("Average response time:      {:.2}", summary.mean_response);
    for u in &summary.utilization {
        println!(
            "{}: {} customers, utilization {:.1}%",
            u.server,
            u.customers_served,
            u.utilization * 100.0
        );
    }

    // The simulated means give the analytic model its inputs
    let theory = mms(
        RateInput::Means {
            mean_inter_arrival: summary.mean_inter_arrival.max(f64::MIN_POSITIVE),
            mean_service: summary.mean_service,
        },
        config.servers,
    );
    match theory {
        Ok(m) => println!(
            "M/M/S prediction: rho={:.3} P0={:.3} Lq={:.3} Wq={:.3} W={:.3}",
            m.rho, m.p0, m.lq, m.wq, m.w
        ),
        Err(e) => println!("M/M/S prediction unavailable: {e}"),
    }

    let out = std::env::temp_dir().join("queuesim_bank.json");
    export_json(&result, &out, true)?;
    export_csv(&result, out.with_extension("csv"))?;
    info!(path = %out.display(), "Wrote simulation result");

    Ok(())
}
