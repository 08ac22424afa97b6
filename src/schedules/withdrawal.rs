//! Gross withdrawal needed each year to net a fixed real income

use super::{check_horizon, check_non_negative, Schedule, YearlySchedule};
use crate::error::ConfigurationError;

/// Inflation-adjusted gross withdrawal per year
///
/// Year 0 is today's gross figure; inflation compounds once per elapsed year.
#[derive(Debug, Clone)]
pub struct WithdrawalSchedule {
    gross_today: f64,
    schedule: Schedule,
}

impl WithdrawalSchedule {
    pub fn new(
        net_income_today: f64,
        tax_rate: f64,
        inflation_rate: f64,
        horizon: u32,
    ) -> Result<Self, ConfigurationError> {
        check_horizon(horizon)?;
        check_non_negative("net retirement income", net_income_today)?;
        if !(0.0..1.0).contains(&tax_rate) {
            return Err(ConfigurationError::InvalidTaxRate(tax_rate));
        }

        let gross_today = net_income_today / (1.0 - tax_rate);
        let values = (0..horizon)
            .map(|year| gross_today * (1.0 + inflation_rate).powi(year as i32))
            .collect();

        Ok(Self {
            gross_today,
            schedule: Schedule::from_values(values),
        })
    }

    /// Pre-tax income needed today
    pub fn gross_today(&self) -> f64 {
        self.gross_today
    }
}

impl YearlySchedule for WithdrawalSchedule {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_year_no_tax_no_inflation() {
        let schedule = WithdrawalSchedule::new(40_000.0, 0.0, 0.0, 1).unwrap();
        assert_eq!(schedule.values(), &[40_000.0]);
    }

    #[test]
    fn test_tax_and_inflation() {
        let schedule = WithdrawalSchedule::new(50_000.0, 0.2, 0.03, 3).unwrap();
        assert_relative_eq!(schedule.gross_today(), 62_500.0, max_relative = 1e-12);
        assert_relative_eq!(schedule.for_year(0), 62_500.0, max_relative = 1e-12);
        assert_relative_eq!(schedule.for_year(1), 64_375.0, max_relative = 1e-12);
        assert_relative_eq!(schedule.for_year(2), 66_306.25, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_tax_rate() {
        for rate in [1.0, 1.5, -0.1, f64::NAN] {
            assert!(matches!(
                WithdrawalSchedule::new(40_000.0, rate, 0.02, 10),
                Err(ConfigurationError::InvalidTaxRate(_))
            ));
        }
    }
}
