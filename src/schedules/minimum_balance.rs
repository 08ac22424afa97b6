//! Minimum balance needed to fund every remaining withdrawal
//!
//! Withdrawals are taken the instant a year starts, before growth. Whatever
//! is left then grows for one year at the post-retirement rate, so next
//! year's requirement is discounted by one period:
//!
//! ```text
//! M(h-1) = W(h-1)
//! M(y)   = W(y) + M(y+1) / (1 + g)
//! ```
//!
//! The same growth rate is assumed for every year after retirement, and the
//! withdrawals grow only by the inflation already in the withdrawal schedule.

use log::debug;

use super::{check_growth_rate, Schedule, WithdrawalSchedule, YearlySchedule};
use crate::error::ConfigurationError;

/// Balance required at the start of each year to retire in that year
#[derive(Debug, Clone)]
pub struct MinimumRetirementBalance {
    schedule: Schedule,
}

impl MinimumRetirementBalance {
    /// Build from a withdrawal schedule; the horizon is the withdrawal schedule's
    pub fn new(
        withdrawals: &WithdrawalSchedule,
        post_retirement_growth_rate: f64,
    ) -> Result<Self, ConfigurationError> {
        check_growth_rate("post-retirement growth rate", post_retirement_growth_rate)?;
        let w = withdrawals.values();
        let growth = 1.0 + post_retirement_growth_rate;

        let mut values = vec![0.0; w.len()];
        let mut next_needed: Option<f64> = None;
        for year in (0..w.len()).rev() {
            let needed = match next_needed {
                None => w[year],
                Some(next) => w[year] + next / growth,
            };
            values[year] = needed;
            next_needed = Some(needed);
        }

        debug!(
            "minimum retirement balance: {} years, {:.2} needed today",
            values.len(),
            values.first().copied().unwrap_or(0.0)
        );

        Ok(Self {
            schedule: Schedule::from_values(values),
        })
    }
}

impl YearlySchedule for MinimumRetirementBalance {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
