//! Early Retirement - year-by-year net worth projection against a retirement target
//!
//! This library provides:
//! - Contribution, withdrawal, minimum-balance and accumulation schedules
//! - Earliest feasible retirement year search
//! - Post-retirement balance and withdrawal trajectory for reporting
//! - Batch scenario evaluation
//! - After-tax valuation of equity grants at an exit date

pub mod error;
pub mod inputs;
pub mod schedules;
pub mod projection;
pub mod scenario;
pub mod equity;

// Re-export commonly used types
pub use error::{CalculatorError, ConfigurationError};
pub use inputs::{ContributionChange, NetWorthAdjustment, RetirementInputs};
pub use schedules::{
    AccumulationProjection, ContributionSchedule, MinimumRetirementBalance, Schedule,
    WithdrawalSchedule, YearlySchedule,
};
pub use projection::{calculate, RetirementAgeCalculator, RetirementPlan, Series, YearRow};
pub use scenario::{Scenario, ScenarioRunner};
