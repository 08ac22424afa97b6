//! After-tax value of equity grants at a hypothetical leave date

use chrono::NaiveDate;

use super::grant::Grant;

/// Which costs to take off the gross value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuationOptions {
    pub pay_execution_fee: bool,
    pub pay_capital_gains: bool,
}

impl Default for ValuationOptions {
    fn default() -> Self {
        Self {
            pay_execution_fee: true,
            pay_capital_gains: true,
        }
    }
}

/// Values grants at a share price, net of fees and capital gains tax
///
/// Vesting stops on the leave date.
#[derive(Debug, Clone)]
pub struct EquityValueEstimator {
    grants: Vec<Grant>,
    share_price: f64,
    capital_gains_rate: f64,
}

impl EquityValueEstimator {
    pub fn new(grants: Vec<Grant>, share_price: f64, capital_gains_rate: f64) -> Self {
        Self {
            grants,
            share_price,
            capital_gains_rate,
        }
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    pub fn share_price(&self) -> f64 {
        self.share_price
    }

    pub fn capital_gains_rate(&self) -> f64 {
        self.capital_gains_rate
    }

    /// Value of one grant before capital gains
    pub fn grant_value(&self, grant: &Grant, leave_date: NaiveDate, options: ValuationOptions) -> f64 {
        let spread = (self.share_price - grant.strike_price()).max(0.0);
        let gross = grant.shares_vested(leave_date) * spread;
        if options.pay_execution_fee {
            gross * (1.0 - grant.execution_fee())
        } else {
            gross
        }
    }

    /// Total value of every grant if leaving on `leave_date`
    pub fn total_value(&self, leave_date: NaiveDate, options: ValuationOptions) -> f64 {
        let value: f64 = self
            .grants
            .iter()
            .map(|grant| self.grant_value(grant, leave_date, options))
            .sum();
        if options.pay_capital_gains {
            value * (1.0 - self.capital_gains_rate)
        } else {
            value
        }
    }
}
