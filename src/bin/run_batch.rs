//! Run every scenario in a CSV file and write one summary row per scenario

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use early_retirement::scenario::ScenarioRunner;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Earliest retirement year for a batch of scenarios")]
struct Args {
    /// Scenario CSV file
    scenarios: PathBuf,

    /// Summary output path
    #[arg(short, long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

/// One output row
#[derive(Debug, serde::Serialize)]
struct SummaryRow {
    name: String,
    status: String,
    retirement_year: Option<u32>,
    balance_at_retirement: Option<f64>,
    final_balance: Option<f64>,
    total_contributions: Option<f64>,
    total_withdrawals: Option<f64>,
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let runner = ScenarioRunner::from_csv(&args.scenarios)
        .with_context(|| format!("failed to load scenarios from {}", args.scenarios.display()))?;
    info!(
        "loaded {} scenarios in {:?}",
        runner.scenarios().len(),
        start.elapsed()
    );

    let outcomes = runner.run_all();
    info!("calculations complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut feasible = 0;
    for outcome in &outcomes {
        let row = match &outcome.result {
            Ok(plan) => {
                let summary = plan.summary();
                if summary.retirement_year.is_some() {
                    feasible += 1;
                }
                SummaryRow {
                    name: outcome.name.clone(),
                    status: if plan.is_feasible() { "feasible" } else { "infeasible" }.to_string(),
                    retirement_year: summary.retirement_year,
                    balance_at_retirement: summary.balance_at_retirement,
                    final_balance: Some(summary.final_balance),
                    total_contributions: Some(summary.total_contributions),
                    total_withdrawals: Some(summary.total_withdrawals),
                    error: None,
                }
            }
            Err(err) => {
                warn!("scenario '{}' failed: {}", outcome.name, err);
                SummaryRow {
                    name: outcome.name.clone(),
                    status: "error".to_string(),
                    retirement_year: None,
                    balance_at_retirement: None,
                    final_balance: None,
                    total_contributions: None,
                    total_withdrawals: None,
                    error: Some(err.to_string()),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "{} scenarios, {} feasible, written to {}",
        outcomes.len(),
        feasible,
        args.output.display()
    );
    Ok(())
}
