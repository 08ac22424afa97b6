//! Year-indexed dollar schedules
//!
//! Every schedule is a pure function of its inputs, materialized once at
//! construction into a [`Schedule`] of `horizon` values:
//! - **ContributionSchedule**: annual contribution, with one-time resets of amount and growth rate
//! - **WithdrawalSchedule**: inflation-adjusted gross withdrawal for a fixed real net income
//! - **MinimumRetirementBalance**: balance needed at the start of each year to fund all remaining withdrawals
//! - **AccumulationProjection**: balance at the start of each year if work never stops

mod accumulation;
mod contribution;
mod minimum_balance;
mod withdrawal;

pub use accumulation::AccumulationProjection;
pub use contribution::ContributionSchedule;
pub use minimum_balance::MinimumRetirementBalance;
pub use withdrawal::WithdrawalSchedule;

use std::collections::BTreeMap;

use crate::error::{ChangeKind, ConfigurationError};

/// Immutable sequence of dollar values indexed by year offset
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    values: Vec<f64>,
}

impl Schedule {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value for a year offset; years past the horizon read as zero
    pub fn for_year(&self, year: u32) -> f64 {
        self.get(year).unwrap_or(0.0)
    }

    pub fn get(&self, year: u32) -> Option<f64> {
        self.values.get(year as usize).copied()
    }

    /// Number of years covered
    pub fn horizon(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}

/// Common accessors for the schedule types
pub trait YearlySchedule {
    /// Underlying materialized values
    fn schedule(&self) -> &Schedule;

    fn for_year(&self, year: u32) -> f64 {
        self.schedule().for_year(year)
    }

    fn horizon(&self) -> u32 {
        self.schedule().horizon()
    }

    fn values(&self) -> &[f64] {
        self.schedule().as_slice()
    }
}

/// Build a year-keyed map, rejecting years outside `[0, horizon)` and duplicates
pub(crate) fn collect_year_map<T, I>(
    entries: I,
    horizon: u32,
    kind: ChangeKind,
) -> Result<BTreeMap<u32, T>, ConfigurationError>
where
    I: IntoIterator<Item = (i64, T)>,
{
    let mut map = BTreeMap::new();
    for (year, value) in entries {
        if year < 0 || year >= i64::from(horizon) {
            return Err(ConfigurationError::YearOutOfRange {
                kind,
                year,
                horizon,
            });
        }
        let year = year as u32;
        if map.insert(year, value).is_some() {
            return Err(ConfigurationError::DuplicateYear { kind, year });
        }
    }
    Ok(map)
}

pub(crate) fn check_horizon(horizon: u32) -> Result<(), ConfigurationError> {
    if horizon < 1 {
        return Err(ConfigurationError::InvalidHorizon(horizon));
    }
    Ok(())
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigurationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// A rate used as a divisor in `1 + rate` must stay above -1
pub(crate) fn check_growth_rate(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_nan() || value <= -1.0 {
        return Err(ConfigurationError::InvalidGrowthRate { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_accessors() {
        let schedule = Schedule::from_values(vec![1.0, 2.0, 3.0]);
        assert_eq!(schedule.horizon(), 3);
        assert_eq!(schedule.for_year(1), 2.0);
        assert_eq!(schedule.get(3), None);
        assert_eq!(schedule.for_year(3), 0.0);
        assert_eq!(schedule.iter().sum::<f64>(), 6.0);
    }

    #[test]
    fn test_collect_year_map() {
        let map = collect_year_map(vec![(3, 'a'), (0, 'b')], 5, ChangeKind::NetWorthAdjustment)
            .unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn test_collect_year_map_rejects_out_of_range() {
        let err = collect_year_map(vec![(5, ())], 5, ChangeKind::NetWorthAdjustment).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::YearOutOfRange {
                kind: ChangeKind::NetWorthAdjustment,
                year: 5,
                horizon: 5
            }
        );

        let err = collect_year_map(vec![(-1, ())], 5, ChangeKind::ContributionChange).unwrap_err();
        assert!(matches!(err, ConfigurationError::YearOutOfRange { year: -1, .. }));
    }

    #[test]
    fn test_collect_year_map_rejects_duplicates() {
        let err = collect_year_map(vec![(3, 1.0), (3, 2.0)], 10, ChangeKind::NetWorthAdjustment)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateYear {
                kind: ChangeKind::NetWorthAdjustment,
                year: 3
            }
        );
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative("current savings", 0.0).is_ok());
        assert!(check_non_negative("current savings", -1.0).is_err());
        assert!(check_non_negative("current savings", f64::NAN).is_err());
    }

    #[test]
    fn test_check_growth_rate() {
        assert!(check_growth_rate("post-retirement growth rate", -0.99).is_ok());
        assert!(check_growth_rate("post-retirement growth rate", 0.0).is_ok());
        assert!(check_growth_rate("post-retirement growth rate", -1.0).is_err());
        assert!(check_growth_rate("post-retirement growth rate", -2.5).is_err());
        assert!(check_growth_rate("post-retirement growth rate", f64::NAN).is_err());
    }
}
