//! Yearly output of a retirement calculation

use serde::{Deserialize, Serialize};

/// One column of the yearly report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Series {
    /// Projected balance, retiring at the earliest feasible year
    AccountValue,
    /// Withdrawals actually taken (zero before retirement)
    ActualWithdrawals,
    /// Scheduled withdrawal for every year, retired or not
    AllWithdrawals,
    /// Minimum balance needed to retire in that year
    MinimumRetirementWorth,
    /// Balance if work never stops
    NoRetirement,
    /// Scheduled annual contribution
    Contributions,
}

impl Series {
    /// Report order
    pub const ALL: [Series; 6] = [
        Series::AccountValue,
        Series::ActualWithdrawals,
        Series::AllWithdrawals,
        Series::MinimumRetirementWorth,
        Series::NoRetirement,
        Series::Contributions,
    ];

    /// Short column header
    pub fn label(&self) -> &'static str {
        match self {
            Series::AccountValue => "acct",
            Series::ActualWithdrawals => "withdrw",
            Series::AllWithdrawals => "all_wd",
            Series::MinimumRetirementWorth => "minimum",
            Series::NoRetirement => "noretir",
            Series::Contributions => "contrib",
        }
    }
}

/// A single year of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: u32,
    pub account_value: f64,
    pub actual_withdrawal: f64,
    pub scheduled_withdrawal: f64,
    pub minimum_balance: f64,
    pub no_retirement_balance: f64,
    pub contribution: f64,
}

impl YearRow {
    pub fn value(&self, series: Series) -> f64 {
        match series {
            Series::AccountValue => self.account_value,
            Series::ActualWithdrawals => self.actual_withdrawal,
            Series::AllWithdrawals => self.scheduled_withdrawal,
            Series::MinimumRetirementWorth => self.minimum_balance,
            Series::NoRetirement => self.no_retirement_balance,
            Series::Contributions => self.contribution,
        }
    }
}

/// Non-fatal findings about the inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    /// Contributions stop at retirement, so this change never applies
    InertContributionChange { year: u32, retirement_year: u32 },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::InertContributionChange {
                year,
                retirement_year,
            } => write!(
                f,
                "contribution change in year {} happens on or after projected retirement in year {} and will be ignored",
                year, retirement_year
            ),
        }
    }
}

/// Complete result of a retirement calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementPlan {
    /// Earliest feasible retirement year, `None` if no year works
    pub retirement_year: Option<u32>,
    pub rows: Vec<YearRow>,
    pub advisories: Vec<Advisory>,
}

/// Headline figures for a plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub retirement_year: Option<u32>,
    pub horizon: u32,
    pub balance_at_retirement: Option<f64>,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_withdrawals: f64,
}

impl RetirementPlan {
    pub fn is_feasible(&self) -> bool {
        self.retirement_year.is_some()
    }

    /// Values of one column for every year
    pub fn series(&self, series: Series) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(series)).collect()
    }

    pub fn summary(&self) -> PlanSummary {
        // Contributions paid during years before retirement; all of them if never retired
        let working_years = self.retirement_year.unwrap_or(self.rows.len() as u32);
        let total_contributions = self
            .rows
            .iter()
            .filter(|row| row.year < working_years)
            .map(|row| row.contribution)
            .sum();

        PlanSummary {
            retirement_year: self.retirement_year,
            horizon: self.rows.len() as u32,
            balance_at_retirement: self
                .retirement_year
                .and_then(|r| self.rows.get(r as usize))
                .map(|row| row.account_value),
            final_balance: self.rows.last().map(|row| row.account_value).unwrap_or(0.0),
            total_contributions,
            total_withdrawals: self.rows.iter().map(|row| row.actual_withdrawal).sum(),
        }
    }
}
