//! Annual contribution schedule with one-time resets

use log::debug;

use super::{check_horizon, check_non_negative, collect_year_map, Schedule, YearlySchedule};
use crate::error::{ChangeKind, ConfigurationError};
use crate::inputs::ContributionChange;

/// Contribution paid during each year
///
/// Growth compounds from the most recent change point, so a change only
/// affects its own year and those after it.
#[derive(Debug, Clone)]
pub struct ContributionSchedule {
    schedule: Schedule,
}

impl ContributionSchedule {
    pub fn new(
        base_contribution: f64,
        growth_rate: f64,
        changes: &[ContributionChange],
        horizon: u32,
    ) -> Result<Self, ConfigurationError> {
        check_horizon(horizon)?;
        check_non_negative("annual contribution", base_contribution)?;
        for change in changes {
            check_non_negative("annual contribution", change.contribution)?;
        }
        let changes = collect_year_map(
            changes
                .iter()
                .map(|c| (c.year, (c.contribution, c.growth_rate))),
            horizon,
            ChangeKind::ContributionChange,
        )?;

        let mut current_base = base_contribution;
        let mut current_rate = growth_rate;
        let mut years_since_change: i32 = 0;

        let mut values = Vec::with_capacity(horizon as usize);
        for year in 0..horizon {
            if let Some(&(base, rate)) = changes.get(&year) {
                current_base = base;
                current_rate = rate;
                years_since_change = 0;
            }
            values.push(current_base * (1.0 + current_rate).powi(years_since_change));
            years_since_change += 1;
        }

        debug!(
            "contribution schedule: {} years, {} change(s)",
            horizon,
            changes.len()
        );

        Ok(Self {
            schedule: Schedule::from_values(values),
        })
    }

    /// Constant growth from year 0 with no changes
    pub fn constant_growth(
        base_contribution: f64,
        growth_rate: f64,
        horizon: u32,
    ) -> Result<Self, ConfigurationError> {
        Self::new(base_contribution, growth_rate, &[], horizon)
    }
}

impl YearlySchedule for ContributionSchedule {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use approx::{assert_relative_eq, relative_eq};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn test_change_resets_base_and_rate() {
        let changes = [
            ContributionChange::new(5, 30_000.0, 0.01),
            ContributionChange::new(12, 0.0, 0.0),
        ];
        let schedule = ContributionSchedule::new(20_000.0, 0.03, &changes, 20).unwrap();

        assert_relative_eq!(schedule.for_year(4), 20_000.0 * 1.03_f64.powi(4), max_relative = 1e-12);
        assert_eq!(schedule.for_year(5), 30_000.0);
        for k in 0..7 {
            assert_relative_eq!(
                schedule.for_year(5 + k),
                30_000.0 * 1.01_f64.powi(k as i32),
                max_relative = 1e-12
            );
        }
        for year in 12..20 {
            assert_eq!(schedule.for_year(year), 0.0);
        }
    }

    #[test]
    fn test_change_at_year_zero_overrides_base() {
        let changes = [ContributionChange::new(0, 15_000.0, 0.02)];
        let schedule = ContributionSchedule::new(50_000.0, 0.10, &changes, 3).unwrap();
        assert_eq!(schedule.for_year(0), 15_000.0);
        assert_relative_eq!(schedule.for_year(2), 15_000.0 * 1.02 * 1.02, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_changes() {
        let out_of_range = [ContributionChange::new(10, 1.0, 0.0)];
        assert!(matches!(
            ContributionSchedule::new(1.0, 0.0, &out_of_range, 10),
            Err(ConfigurationError::YearOutOfRange { year: 10, .. })
        ));

        let duplicate = [
            ContributionChange::new(2, 1.0, 0.0),
            ContributionChange::new(2, 2.0, 0.0),
        ];
        assert!(matches!(
            ContributionSchedule::new(1.0, 0.0, &duplicate, 10),
            Err(ConfigurationError::DuplicateYear { year: 2, .. })
        ));

        assert!(matches!(
            ContributionSchedule::new(1.0, 0.0, &[], 0),
            Err(ConfigurationError::InvalidHorizon(0))
        ));
    }

    proptest! {
        #[test]
        fn prop_no_changes_compounds_from_year_zero(
            base in 0u32..200_000,
            rate_bp in -900i32..1_500,
            horizon in 1u32..80
        ) {
            let base = base as f64;
            let rate = rate_bp as f64 / 10_000.0;
            let schedule = ContributionSchedule::constant_growth(base, rate, horizon).unwrap();
            prop_assert_eq!(schedule.horizon(), horizon);
            prop_assert_eq!(schedule.for_year(0), base);
            for year in 0..horizon {
                let expected = base * (1.0 + rate).powi(year as i32);
                prop_assert!(relative_eq!(schedule.for_year(year), expected, max_relative = 1e-12));
            }
        }

        #[test]
        fn prop_change_resets_base_and_rate(
            base in 0u32..200_000,
            rate_bp in -900i32..1_500,
            horizon in 1u32..60,
            raw_changes in proptest::collection::btree_map(0u32..60, (0u32..200_000, -900i32..1_500), 0..5)
        ) {
            let changes: BTreeMap<u32, (f64, f64)> = raw_changes
                .into_iter()
                .filter(|&(year, _)| year < horizon)
                .map(|(year, (amount, bp))| (year, (amount as f64, bp as f64 / 10_000.0)))
                .collect();
            let list: Vec<ContributionChange> = changes
                .iter()
                .map(|(&year, &(amount, rate))| ContributionChange::new(i64::from(year), amount, rate))
                .collect();
            let schedule =
                ContributionSchedule::new(base as f64, rate_bp as f64 / 10_000.0, &list, horizon).unwrap();

            let starts: Vec<u32> = changes.keys().copied().collect();
            for (idx, &start) in starts.iter().enumerate() {
                let (amount, rate) = changes[&start];
                let end = starts.get(idx + 1).copied().unwrap_or(horizon);
                prop_assert_eq!(schedule.for_year(start), amount);
                for year in start..end {
                    let expected = amount * (1.0 + rate).powi((year - start) as i32);
                    prop_assert!(relative_eq!(schedule.for_year(year), expected, max_relative = 1e-12));
                }
            }
        }
    }
}
