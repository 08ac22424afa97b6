//! Early retirement CLI
//!
//! Calculates the earliest year you can retire and prints the yearly
//! balance and withdrawal table.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::Parser;
use early_retirement::{
    ContributionChange, NetWorthAdjustment, RetirementAgeCalculator, RetirementInputs,
    RetirementPlan, Series,
};

#[derive(Parser, Debug)]
#[command(
    name = "early-retirement",
    version,
    about = "Calculate when to retire.",
    allow_negative_numbers = true
)]
struct Cli {
    /// Current retirement savings right now, in dollars
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    current_savings: Option<f64>,

    /// Annual contribution, in dollars
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    annual_contribution: Option<f64>,

    /// Annual increase of the contribution, in the form 0.XX
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    annual_contrib_increase_rate: Option<f64>,

    /// Market growth rate before retirement, in the form 0.XX
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    pre_growth_rate: Option<f64>,

    /// Market growth rate during retirement, in the form 0.XX
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    post_growth_rate: Option<f64>,

    /// Inflation rate, in the form 0.XX
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    inflation_rate: Option<f64>,

    /// Planned years to live
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    years_to_live: Option<u32>,

    /// Desired net income in retirement, in today's dollars
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    net_retirement_income: Option<f64>,

    /// Estimated tax rate in retirement, in the form 0.XX
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    retirement_tax_rate: Option<f64>,

    /// One-time change in net worth in YEARS of VALUE, applied at the start of
    /// the year (before withdrawals, before any market growth)
    #[arg(short = 'w', long = "change-worth", value_name = "YEARS:VALUE")]
    change_worth: Vec<NetWorthAdjustment>,

    /// In YEARS, set the annual contribution and its increase rate going forward
    #[arg(short = 'c', long = "change-contrib", value_name = "YEARS:CONTRIB:RATE")]
    change_contrib: Vec<ContributionChange>,

    /// Load inputs from a JSON plan file instead of positional arguments;
    /// `-w` and `-c` entries are added to the file's changes
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write the yearly table as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write the effective inputs as a JSON plan file
    #[arg(long, value_name = "PATH")]
    dump_config: Option<PathBuf>,
}

fn required<T>(value: Option<T>, name: &str) -> anyhow::Result<T> {
    value.ok_or_else(|| anyhow!("missing required argument <{}>", name))
}

fn build_inputs(cli: &Cli) -> anyhow::Result<RetirementInputs> {
    let mut inputs = match &cli.config {
        Some(path) => RetirementInputs::from_json_path(path)
            .with_context(|| format!("failed to load plan file {}", path.display()))?,
        None => RetirementInputs {
            current_savings: required(cli.current_savings, "current_savings")?,
            annual_contribution: required(cli.annual_contribution, "annual_contribution")?,
            contribution_growth_rate: required(
                cli.annual_contrib_increase_rate,
                "annual_contrib_increase_rate",
            )?,
            pre_retirement_growth_rate: required(cli.pre_growth_rate, "pre_growth_rate")?,
            post_retirement_growth_rate: required(cli.post_growth_rate, "post_growth_rate")?,
            inflation_rate: required(cli.inflation_rate, "inflation_rate")?,
            years_to_live: required(cli.years_to_live, "years_to_live")?,
            net_retirement_income: required(cli.net_retirement_income, "net_retirement_income")?,
            retirement_tax_rate: required(cli.retirement_tax_rate, "retirement_tax_rate")?,
            net_worth_adjustments: Vec::new(),
            contribution_changes: Vec::new(),
        },
    };

    inputs.net_worth_adjustments.extend(cli.change_worth.iter().copied());
    inputs.contribution_changes.extend(cli.change_contrib.iter().copied());
    Ok(inputs)
}

/// Truncate to whole dollars with thousands separators
fn format_dollars(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole < 0 {
        out.insert(0, '-');
    }
    out
}

fn print_table(plan: &RetirementPlan) {
    println!("NOTE: withdrawal is taken out at the start of the year, i.e. immediately after the bank statement");

    print!("{:>5}", "years");
    for series in Series::ALL {
        print!(" {:>14}", series.label());
    }
    println!();
    println!("{}", "-".repeat(5 + 15 * Series::ALL.len()));

    for row in &plan.rows {
        print!("{:>5}", row.year);
        for series in Series::ALL {
            print!(" {:>14}", format_dollars(row.value(series)));
        }
        println!();
    }
}

fn write_csv(plan: &RetirementPlan, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for row in &plan.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let inputs = build_inputs(&cli)?;

    if let Some(path) = &cli.dump_config {
        std::fs::write(path, inputs.to_json_pretty()?)
            .with_context(|| format!("unable to write {}", path.display()))?;
    }

    let calculator = RetirementAgeCalculator::new(&inputs)?;
    let plan = calculator.project()?;

    let Some(years_to_retirement) = plan.retirement_year else {
        println!("You can't retire with the current parameters!");
        return Ok(ExitCode::FAILURE);
    };
    println!(" ===> YEARS TO RETIREMENT: {} <===", years_to_retirement);

    for advisory in &plan.advisories {
        println!("WARN: {}", advisory);
    }

    print_table(&plan);

    let summary = plan.summary();
    println!("\nSummary:");
    if let Some(balance) = summary.balance_at_retirement {
        println!("  Balance at retirement: ${}", format_dollars(balance));
    }
    println!("  Contributions until retirement: ${}", format_dollars(summary.total_contributions));
    println!("  Total withdrawals: ${}", format_dollars(summary.total_withdrawals));
    println!("  Final balance: ${}", format_dollars(summary.final_balance));

    if let Some(path) = &cli.csv {
        write_csv(&plan, path)?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0.0), "0");
        assert_eq!(format_dollars(999.99), "999");
        assert_eq!(format_dollars(1_000.0), "1,000");
        assert_eq!(format_dollars(1_234_567.8), "1,234,567");
        assert_eq!(format_dollars(-45_000.0), "-45,000");
    }

    #[test]
    fn test_parse_positional_and_changes() {
        let cli = Cli::try_parse_from([
            "early-retirement",
            "100000",
            "20000",
            "0.02",
            "0.06",
            "0.03",
            "0.03",
            "60",
            "40000",
            "0.15",
            "-w",
            "5:-20000",
            "-c",
            "10:30000:0.01",
            "-w",
            "8:5000",
        ])
        .unwrap();

        let inputs = build_inputs(&cli).unwrap();
        assert_eq!(inputs.years_to_live, 60);
        assert_eq!(inputs.retirement_tax_rate, 0.15);
        assert_eq!(
            inputs.net_worth_adjustments,
            vec![NetWorthAdjustment::new(5, -20_000.0), NetWorthAdjustment::new(8, 5_000.0)]
        );
        assert_eq!(
            inputs.contribution_changes,
            vec![ContributionChange::new(10, 30_000.0, 0.01)]
        );
    }

    #[test]
    fn test_negative_rates_accepted() {
        let cli = Cli::try_parse_from([
            "early-retirement", "0", "0", "-0.01", "0.05", "0.03", "0.02", "30", "10000", "0",
        ])
        .unwrap();
        assert_eq!(cli.annual_contrib_increase_rate, Some(-0.01));
    }

    #[test]
    fn test_missing_positional_without_config() {
        assert!(Cli::try_parse_from(["early-retirement", "100000"]).is_err());
    }

    #[test]
    fn test_config_conflicts_with_positionals() {
        let err = Cli::try_parse_from(["early-retirement", "--config", "plan.json", "100000"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["early-retirement", "--config", "plan.json", "-w", "2:500"]).unwrap();
        assert_eq!(cli.current_savings, None);
        assert_eq!(cli.change_worth, vec![NetWorthAdjustment::new(2, 500.0)]);
    }
}
