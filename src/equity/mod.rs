//! Equity compensation value at a hypothetical exit date
//!
//! A linear valuation: vested shares times the spread over strike, less
//! execution fees and capital gains tax.

mod estimator;
mod grant;
pub mod loader;

pub use estimator::{EquityValueEstimator, ValuationOptions};
pub use grant::{parse_month, Grant};
pub use loader::{load_grants, load_grants_from_reader};
