//! Load batches of scenarios from CSV
//!
//! Columns (matched by header name):
//!
//! ```csv
//! name,current_savings,annual_contribution,contribution_growth_rate,pre_retirement_growth_rate,post_retirement_growth_rate,inflation_rate,years_to_live,net_retirement_income,retirement_tax_rate,net_worth_changes,contrib_changes
//! base,100000,20000,0.02,0.06,0.03,0.03,60,40000,0.15,,
//! windfall,100000,20000,0.02,0.06,0.03,0.03,60,40000,0.15,5:50000;12:-30000,10:25000:0.0
//! ```
//!
//! The last two columns are optional and use the same `YEARS:VALUE` and
//! `YEARS:CONTRIB:RATE` syntax as the command line, separated by `;`.

use std::path::Path;

use csv::Reader;

use super::data::{parse_entry_list, RetirementInputs};
use crate::error::LoadError;
use crate::scenario::Scenario;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    current_savings: f64,
    annual_contribution: f64,
    contribution_growth_rate: f64,
    pre_retirement_growth_rate: f64,
    post_retirement_growth_rate: f64,
    inflation_rate: f64,
    years_to_live: u32,
    net_retirement_income: f64,
    retirement_tax_rate: f64,
    #[serde(default)]
    net_worth_changes: Option<String>,
    #[serde(default)]
    contrib_changes: Option<String>,
}

impl CsvRow {
    fn to_scenario(self, row: usize) -> Result<Scenario, LoadError> {
        let entry_err = |source| LoadError::Entry { row, source };

        let net_worth_adjustments =
            parse_entry_list(self.net_worth_changes.as_deref().unwrap_or("")).map_err(entry_err)?;
        let contribution_changes =
            parse_entry_list(self.contrib_changes.as_deref().unwrap_or("")).map_err(entry_err)?;

        Ok(Scenario {
            name: self.name,
            inputs: RetirementInputs {
                current_savings: self.current_savings,
                annual_contribution: self.annual_contribution,
                contribution_growth_rate: self.contribution_growth_rate,
                pre_retirement_growth_rate: self.pre_retirement_growth_rate,
                post_retirement_growth_rate: self.post_retirement_growth_rate,
                inflation_rate: self.inflation_rate,
                years_to_live: self.years_to_live,
                net_retirement_income: self.net_retirement_income,
                retirement_tax_rate: self.retirement_tax_rate,
                net_worth_adjustments,
                contribution_changes,
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // 1-indexed data rows, header excluded
        scenarios.push(row.to_scenario(idx + 1)?);
    }

    Ok(scenarios)
}
