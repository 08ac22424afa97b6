//! Equity grants vesting a constant number of shares per month

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::GrantError;

/// Parse a `YYYY-mm` month into the first day of that month
pub fn parse_month(text: &str) -> Result<NaiveDate, GrantError> {
    NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d")
        .map_err(|_| GrantError::InvalidMonth(text.to_string()))
}

/// Whole calendar months from `from` to `to`, negative if `to` is earlier
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// An option grant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grant {
    total_shares: f64,
    shares_per_month: f64,
    /// Month in which the last shares vest
    end_date: NaiveDate,
    strike_price: f64,
    /// Fraction taken by a broker to execute the options
    execution_fee: f64,
}

impl Grant {
    pub fn new(
        total_shares: f64,
        shares_per_month: f64,
        end_month: &str,
        strike_price: f64,
        execution_fee: f64,
    ) -> Result<Self, GrantError> {
        if shares_per_month.is_nan() || shares_per_month <= 0.0 {
            return Err(GrantError::NonPositiveVestingRate(shares_per_month));
        }
        if !(0.0..=1.0).contains(&execution_fee) {
            return Err(GrantError::InvalidExecutionFee(execution_fee));
        }
        Ok(Self {
            total_shares,
            shares_per_month,
            end_date: parse_month(end_month)?,
            strike_price,
            execution_fee,
        })
    }

    /// Shares still unvested at `at`
    pub fn shares_remaining(&self, at: NaiveDate) -> f64 {
        let months_left = months_between(at, self.end_date).max(0);
        (months_left as f64 * self.shares_per_month).min(self.total_shares)
    }

    /// Shares vested at `at`
    pub fn shares_vested(&self, at: NaiveDate) -> f64 {
        self.total_shares - self.shares_remaining(at)
    }

    pub fn total_shares(&self) -> f64 {
        self.total_shares
    }

    pub fn shares_per_month(&self) -> f64 {
        self.shares_per_month
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    pub fn execution_fee(&self) -> f64 {
        self.execution_fee
    }
}
