//! Estimate the after-tax value of equity grants if leaving on a given month

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use early_retirement::equity::{load_grants, parse_month, EquityValueEstimator, ValuationOptions};

#[derive(Parser, Debug)]
#[command(name = "equity_value", about = "Value equity grants at a hypothetical exit")]
struct Args {
    /// Grants CSV file
    grants: PathBuf,

    /// Hypothetical share price
    share_price: f64,

    /// Capital gains tax rate, in the form 0.XX
    capital_gains_rate: f64,

    /// Month of leaving, YYYY-mm
    leave_month: String,

    /// Ignore execution fees
    #[arg(long)]
    no_execution_fee: bool,

    /// Ignore capital gains tax
    #[arg(long)]
    no_capital_gains: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let grants = load_grants(&args.grants)
        .with_context(|| format!("failed to load grants from {}", args.grants.display()))?;
    let leave_date = parse_month(&args.leave_month)?;
    let options = ValuationOptions {
        pay_execution_fee: !args.no_execution_fee,
        pay_capital_gains: !args.no_capital_gains,
    };

    let estimator = EquityValueEstimator::new(grants, args.share_price, args.capital_gains_rate);

    println!("{:>5} {:>12} {:>12} {:>10} {:>14}", "Grant", "Total", "Vested", "Strike", "Value");
    println!("{}", "-".repeat(57));
    for (idx, grant) in estimator.grants().iter().enumerate() {
        println!(
            "{:>5} {:>12.0} {:>12.0} {:>10.2} {:>14.2}",
            idx + 1,
            grant.total_shares(),
            grant.shares_vested(leave_date),
            grant.strike_price(),
            estimator.grant_value(grant, leave_date, options),
        );
    }

    println!(
        "\nTotal value leaving {}: ${:.2}",
        args.leave_month,
        estimator.total_value(leave_date, options)
    );
    Ok(())
}
