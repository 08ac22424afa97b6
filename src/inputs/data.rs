//! Calculation inputs: scalar plan parameters plus year-keyed changes

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, ParseEntryError};

/// One-time change in net worth, applied at the start of `year`
/// (before withdrawals, before any market growth)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetWorthAdjustment {
    /// Years from now
    pub year: i64,
    /// Signed dollar amount
    pub delta: f64,
}

impl NetWorthAdjustment {
    pub fn new(year: i64, delta: f64) -> Self {
        Self { year, delta }
    }
}

/// Resets the annual contribution and its growth rate from `year` onwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionChange {
    /// Years from now
    pub year: i64,
    /// New annual contribution, in dollars
    pub contribution: f64,
    /// New annual contribution growth rate
    pub growth_rate: f64,
}

impl ContributionChange {
    pub fn new(year: i64, contribution: f64, growth_rate: f64) -> Self {
        Self {
            year,
            contribution,
            growth_rate,
        }
    }
}

fn split_fields<'a>(input: &'a str, expected: usize) -> Result<Vec<&'a str>, ParseEntryError> {
    let fields: Vec<&str> = input.trim().split(':').map(str::trim).collect();
    if fields.len() != expected {
        return Err(ParseEntryError::FieldCount {
            input: input.to_string(),
            expected,
        });
    }
    Ok(fields)
}

fn parse_field<T: FromStr>(input: &str, field: &'static str, value: &str) -> Result<T, ParseEntryError> {
    value.parse().map_err(|_| ParseEntryError::InvalidNumber {
        input: input.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Parses `YEARS:VALUE`, e.g. `5:-20000`
impl FromStr for NetWorthAdjustment {
    type Err = ParseEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s, 2)?;
        Ok(Self {
            year: parse_field(s, "years out", fields[0])?,
            delta: parse_field(s, "value", fields[1])?,
        })
    }
}

/// Parses `YEARS:CONTRIB:RATE`, e.g. `3:30000:0.02`
impl FromStr for ContributionChange {
    type Err = ParseEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s, 3)?;
        Ok(Self {
            year: parse_field(s, "years out", fields[0])?,
            contribution: parse_field(s, "contrib", fields[1])?,
            growth_rate: parse_field(s, "contrib rate", fields[2])?,
        })
    }
}

impl fmt::Display for NetWorthAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.year, self.delta)
    }
}

impl fmt::Display for ContributionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.year, self.contribution, self.growth_rate)
    }
}

/// Parse a `;`-separated list of entries. Empty input yields an empty list.
pub fn parse_entry_list<T>(input: &str) -> Result<Vec<T>, ParseEntryError>
where
    T: FromStr<Err = ParseEntryError>,
{
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| entry.parse::<T>())
        .collect()
}

/// Everything needed for one retirement calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInputs {
    /// Current retirement savings right now, in dollars
    pub current_savings: f64,

    /// Annual contribution, in dollars
    pub annual_contribution: f64,

    /// Annual growth of the contribution
    pub contribution_growth_rate: f64,

    /// Market growth rate expected before retirement
    pub pre_retirement_growth_rate: f64,

    /// Market growth rate during retirement
    pub post_retirement_growth_rate: f64,

    pub inflation_rate: f64,

    /// Planned years to live (the projection horizon)
    pub years_to_live: u32,

    /// Desired net income in retirement, in today's dollars
    pub net_retirement_income: f64,

    /// Estimated tax rate in retirement
    pub retirement_tax_rate: f64,

    #[serde(default)]
    pub net_worth_adjustments: Vec<NetWorthAdjustment>,

    #[serde(default)]
    pub contribution_changes: Vec<ContributionChange>,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_savings: 100_000.0,
            annual_contribution: 20_000.0,
            contribution_growth_rate: 0.02,
            pre_retirement_growth_rate: 0.06,
            post_retirement_growth_rate: 0.03,
            inflation_rate: 0.03,
            years_to_live: 60,
            net_retirement_income: 40_000.0,
            retirement_tax_rate: 0.15,
            net_worth_adjustments: Vec::new(),
            contribution_changes: Vec::new(),
        }
    }
}

impl RetirementInputs {
    /// Add a one-time net worth change
    pub fn with_adjustment(mut self, year: i64, delta: f64) -> Self {
        self.net_worth_adjustments.push(NetWorthAdjustment::new(year, delta));
        self
    }

    /// Add a contribution change
    pub fn with_contribution_change(mut self, year: i64, contribution: f64, growth_rate: f64) -> Self {
        self.contribution_changes
            .push(ContributionChange::new(year, contribution, growth_rate));
        self
    }

    /// Load a plan file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adjustment() {
        let adj: NetWorthAdjustment = "5:-20000".parse().unwrap();
        assert_eq!(adj, NetWorthAdjustment::new(5, -20_000.0));

        let adj: NetWorthAdjustment = " 0 : 1500.5 ".parse().unwrap();
        assert_eq!(adj, NetWorthAdjustment::new(0, 1500.5));
    }

    #[test]
    fn test_parse_contribution_change() {
        let change: ContributionChange = "3:30000:0.02".parse().unwrap();
        assert_eq!(change, ContributionChange::new(3, 30_000.0, 0.02));
    }

    #[test]
    fn test_parse_errors() {
        let err = "5".parse::<NetWorthAdjustment>().unwrap_err();
        assert!(matches!(err, ParseEntryError::FieldCount { expected: 2, .. }));

        let err = "x:100".parse::<NetWorthAdjustment>().unwrap_err();
        assert!(matches!(err, ParseEntryError::InvalidNumber { field: "years out", .. }));

        let err = "3:100".parse::<ContributionChange>().unwrap_err();
        assert!(matches!(err, ParseEntryError::FieldCount { expected: 3, .. }));
    }

    #[test]
    fn test_parse_entry_list() {
        let list: Vec<NetWorthAdjustment> = parse_entry_list("2:100; 4:-50;").unwrap();
        assert_eq!(
            list,
            vec![NetWorthAdjustment::new(2, 100.0), NetWorthAdjustment::new(4, -50.0)]
        );

        let empty: Vec<ContributionChange> = parse_entry_list("  ").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        let change = ContributionChange::new(7, 12_000.0, 0.015);
        let parsed: ContributionChange = change.to_string().parse().unwrap();
        assert_eq!(parsed, change);
    }

    #[test]
    fn test_json_defaults_empty_changes() {
        let json = r#"{
            "current_savings": 250000,
            "annual_contribution": 30000,
            "contribution_growth_rate": 0.0,
            "pre_retirement_growth_rate": 0.05,
            "post_retirement_growth_rate": 0.03,
            "inflation_rate": 0.03,
            "years_to_live": 50,
            "net_retirement_income": 45000,
            "retirement_tax_rate": 0.2
        }"#;
        let inputs = RetirementInputs::from_json_str(json).unwrap();
        assert_eq!(inputs.years_to_live, 50);
        assert!(inputs.net_worth_adjustments.is_empty());
        assert!(inputs.contribution_changes.is_empty());

        let back = RetirementInputs::from_json_str(&inputs.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, inputs);
    }
}
