//! Calculation inputs and their loaders

mod data;
pub mod loader;

pub use data::{parse_entry_list, ContributionChange, NetWorthAdjustment, RetirementInputs};
pub use loader::{load_scenarios, load_scenarios_from_reader};
