//! Earliest retirement year search and post-retirement trajectory

use std::cell::OnceCell;

use log::{debug, warn};

use super::plan::{Advisory, RetirementPlan, YearRow};
use crate::error::{CalculatorError, ChangeKind, ConfigurationError};
use crate::inputs::RetirementInputs;
use crate::schedules::{
    check_growth_rate, check_horizon, check_non_negative, collect_year_map, AccumulationProjection,
    ContributionSchedule, MinimumRetirementBalance, WithdrawalSchedule, YearlySchedule,
};

/// Owns every schedule for one calculation
///
/// # Example
///
/// ```rust
/// use early_retirement::{RetirementAgeCalculator, RetirementInputs};
///
/// let inputs = RetirementInputs::default().with_adjustment(3, 25_000.0);
/// let calculator = RetirementAgeCalculator::new(&inputs).unwrap();
/// let plan = calculator.project().unwrap();
/// assert_eq!(plan.retirement_year, calculator.earliest_retirement_year());
/// ```
#[derive(Debug)]
pub struct RetirementAgeCalculator {
    horizon: u32,
    post_retirement_growth_rate: f64,
    contribution_change_years: Vec<u32>,
    withdrawals: WithdrawalSchedule,
    minimum_balance: MinimumRetirementBalance,
    contributions: ContributionSchedule,
    accumulation: AccumulationProjection,
    earliest: OnceCell<Option<u32>>,
}

impl RetirementAgeCalculator {
    /// Validate inputs and build all schedules
    pub fn new(inputs: &RetirementInputs) -> Result<Self, ConfigurationError> {
        validate(inputs)?;
        let horizon = inputs.years_to_live;

        let withdrawals = WithdrawalSchedule::new(
            inputs.net_retirement_income,
            inputs.retirement_tax_rate,
            inputs.inflation_rate,
            horizon,
        )?;
        let minimum_balance =
            MinimumRetirementBalance::new(&withdrawals, inputs.post_retirement_growth_rate)?;
        let contributions = ContributionSchedule::new(
            inputs.annual_contribution,
            inputs.contribution_growth_rate,
            &inputs.contribution_changes,
            horizon,
        )?;
        let accumulation = AccumulationProjection::new(
            inputs.current_savings,
            inputs.pre_retirement_growth_rate,
            &contributions,
            &inputs.net_worth_adjustments,
        )?;

        let mut contribution_change_years: Vec<u32> = inputs
            .contribution_changes
            .iter()
            .map(|c| c.year as u32)
            .collect();
        contribution_change_years.sort_unstable();

        Ok(Self {
            horizon,
            post_retirement_growth_rate: inputs.post_retirement_growth_rate,
            contribution_change_years,
            withdrawals,
            minimum_balance,
            contributions,
            accumulation,
            earliest: OnceCell::new(),
        })
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn withdrawals(&self) -> &WithdrawalSchedule {
        &self.withdrawals
    }

    pub fn minimum_balance(&self) -> &MinimumRetirementBalance {
        &self.minimum_balance
    }

    pub fn contributions(&self) -> &ContributionSchedule {
        &self.contributions
    }

    pub fn accumulation(&self) -> &AccumulationProjection {
        &self.accumulation
    }

    /// First year whose projected balance covers the minimum requirement
    ///
    /// Exact equality counts as sufficient. `None` when no year in the
    /// horizon works.
    pub fn earliest_retirement_year(&self) -> Option<u32> {
        *self.earliest.get_or_init(|| {
            let found = (0..self.horizon)
                .find(|&year| self.accumulation.for_year(year) >= self.minimum_balance.for_year(year));
            debug!("earliest retirement year: {:?}", found);
            found
        })
    }

    /// Check year-keyed inputs against a retirement year
    ///
    /// Net worth changes after retirement are an error; contribution changes
    /// on or after retirement are inert and reported as advisories.
    pub fn check_post_retirement(&self, retirement_year: u32) -> Result<Vec<Advisory>, CalculatorError> {
        if let Some(&adjustment_year) = self
            .accumulation
            .adjustments()
            .keys()
            .find(|&&year| year > retirement_year)
        {
            return Err(CalculatorError::UnsupportedConfiguration {
                adjustment_year,
                retirement_year,
            });
        }

        let advisories: Vec<Advisory> = self
            .contribution_change_years
            .iter()
            .filter(|&&year| year >= retirement_year)
            .map(|&year| Advisory::InertContributionChange {
                year,
                retirement_year,
            })
            .collect();
        for advisory in &advisories {
            warn!("{}", advisory);
        }

        Ok(advisories)
    }

    /// Balance and withdrawal for every year, retiring at `retirement_year`
    ///
    /// Before retirement the balance is the accumulation projection. From the
    /// year after retirement, last year's withdrawal comes out first and the
    /// remainder grows at the post-retirement rate.
    pub fn trajectory(&self, retirement_year: Option<u32>) -> Vec<YearRow> {
        let growth = 1.0 + self.post_retirement_growth_rate;
        let mut rows: Vec<YearRow> = Vec::with_capacity(self.horizon as usize);

        for year in 0..self.horizon {
            let scheduled = self.withdrawals.for_year(year);
            let (account_value, actual_withdrawal) = match retirement_year {
                Some(r) if year > r => {
                    let prev = &rows[(year - 1) as usize];
                    let balance = ((prev.account_value - prev.actual_withdrawal) * growth).max(0.0);
                    (balance, scheduled)
                }
                Some(r) if year == r => (self.accumulation.for_year(year), scheduled),
                _ => (self.accumulation.for_year(year), 0.0),
            };

            rows.push(YearRow {
                year,
                account_value,
                actual_withdrawal,
                scheduled_withdrawal: scheduled,
                minimum_balance: self.minimum_balance.for_year(year),
                no_retirement_balance: self.accumulation.for_year(year),
                contribution: self.contributions.for_year(year),
            });
        }

        rows
    }

    /// Search, post-check and full trajectory
    pub fn project(&self) -> Result<RetirementPlan, CalculatorError> {
        let retirement_year = self.earliest_retirement_year();
        let advisories = match retirement_year {
            Some(r) => self.check_post_retirement(r)?,
            None => Vec::new(),
        };

        Ok(RetirementPlan {
            retirement_year,
            rows: self.trajectory(retirement_year),
            advisories,
        })
    }
}

/// Input checks, in order: horizon, amounts, tax rate, post-retirement growth,
/// net worth changes, contribution changes
fn validate(inputs: &RetirementInputs) -> Result<(), ConfigurationError> {
    let horizon = inputs.years_to_live;
    check_horizon(horizon)?;

    check_non_negative("current savings", inputs.current_savings)?;
    check_non_negative("annual contribution", inputs.annual_contribution)?;
    check_non_negative("net retirement income", inputs.net_retirement_income)?;
    for change in &inputs.contribution_changes {
        check_non_negative("annual contribution", change.contribution)?;
    }

    if !(0.0..1.0).contains(&inputs.retirement_tax_rate) {
        return Err(ConfigurationError::InvalidTaxRate(inputs.retirement_tax_rate));
    }
    check_growth_rate("post-retirement growth rate", inputs.post_retirement_growth_rate)?;

    collect_year_map(
        inputs.net_worth_adjustments.iter().map(|a| (a.year, ())),
        horizon,
        ChangeKind::NetWorthAdjustment,
    )?;
    collect_year_map(
        inputs.contribution_changes.iter().map(|c| (c.year, ())),
        horizon,
        ChangeKind::ContributionChange,
    )?;

    Ok(())
}

/// Calculate a plan straight from inputs
pub fn calculate(inputs: &RetirementInputs) -> Result<RetirementPlan, CalculatorError> {
    RetirementAgeCalculator::new(inputs)?.project()
}
