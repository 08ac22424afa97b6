//! Balance projection assuming work (and contributions) never stop

use std::collections::BTreeMap;

use log::debug;

use super::{check_non_negative, collect_year_map, ContributionSchedule, Schedule, YearlySchedule};
use crate::error::{ChangeKind, ConfigurationError};
use crate::inputs::NetWorthAdjustment;

/// Account balance at the start of each year with no retirement
///
/// ```text
/// B(0) = max(0, savings + adj(0))
/// B(y) = max(0, B(y-1) * (1 + g) + C(y-1) + adj(y))
/// ```
///
/// Balances are floored at zero.
#[derive(Debug, Clone)]
pub struct AccumulationProjection {
    adjustments: BTreeMap<u32, f64>,
    schedule: Schedule,
}

impl AccumulationProjection {
    /// The horizon is the contribution schedule's
    pub fn new(
        current_savings: f64,
        pre_retirement_growth_rate: f64,
        contributions: &ContributionSchedule,
        adjustments: &[NetWorthAdjustment],
    ) -> Result<Self, ConfigurationError> {
        check_non_negative("current savings", current_savings)?;
        let horizon = contributions.horizon();
        let adjustments = collect_year_map(
            adjustments.iter().map(|a| (a.year, a.delta)),
            horizon,
            ChangeKind::NetWorthAdjustment,
        )?;
        let adjustment = |year: u32| adjustments.get(&year).copied().unwrap_or(0.0);

        let mut values = Vec::with_capacity(horizon as usize);
        let mut balance = (current_savings + adjustment(0)).max(0.0);
        values.push(balance);
        for year in 1..horizon {
            let raw = balance * (1.0 + pre_retirement_growth_rate) + contributions.for_year(year - 1);
            balance = (raw + adjustment(year)).max(0.0);
            values.push(balance);
        }

        debug!(
            "accumulation projection: {} years, {} adjustment(s), {:.2} at horizon",
            horizon,
            adjustments.len(),
            balance
        );

        Ok(Self {
            adjustments,
            schedule: Schedule::from_values(values),
        })
    }

    /// Validated adjustments keyed by year
    pub fn adjustments(&self) -> &BTreeMap<u32, f64> {
        &self.adjustments
    }
}

impl YearlySchedule for AccumulationProjection {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
