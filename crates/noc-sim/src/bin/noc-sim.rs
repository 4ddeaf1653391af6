//! NoC Torus Simulator
//!
//! Route a demand stream over a torus and report overloaded channels.

use clap::Parser;
use noc_sim::{reports_to_json, run_all, SimArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noc_sim=info,noc_routing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = SimArgs::parse();
    let (reports, totals) = run_all(&args)?;

    println!("NoC Torus Simulator");
    println!("===================");
    for (run, report) in reports.iter().enumerate() {
        println!();
        if reports.len() > 1 {
            println!("Run {} (seed {}):", run, args.seed.wrapping_add(run as u64));
        }
        print!("{}", report);
    }

    if reports.len() > 1 {
        println!();
        println!("{}", totals);
    }

    if let Some(path) = &args.json {
        std::fs::write(path, reports_to_json(&reports)?)?;
        tracing::info!("Load report written to {}", path.display());
    }

    Ok(())
}
