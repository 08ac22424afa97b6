//! Retirement year search and yearly report

mod calculator;
mod plan;

pub use calculator::{calculate, RetirementAgeCalculator};
pub use plan::{Advisory, PlanSummary, RetirementPlan, Series, YearRow};
