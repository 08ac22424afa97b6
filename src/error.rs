//! Error types for input validation, calculation and loading

use std::fmt;

/// Which year-keyed input a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    NetWorthAdjustment,
    ContributionChange,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::NetWorthAdjustment => write!(f, "net worth change"),
            ChangeKind::ContributionChange => write!(f, "contrib change"),
        }
    }
}

/// Malformed or out-of-range input, raised before any schedule is built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid years to live {0}; must be at least 1")]
    InvalidHorizon(u32),

    #[error("invalid retirement tax rate {0}; must be in [0, 1)")]
    InvalidTaxRate(f64),

    #[error("invalid {field} {value}; must be greater than -1")]
    InvalidGrowthRate { field: &'static str, value: f64 },

    #[error("invalid {field} {value}; must not be negative")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("invalid {kind} year '{year}'; must be between [0,{horizon})")]
    YearOutOfRange {
        kind: ChangeKind,
        year: i64,
        horizon: u32,
    },

    #[error("two {kind}s defined with the same year '{year}'")]
    DuplicateYear { kind: ChangeKind, year: u32 },
}

/// Failure of a full retirement calculation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Net worth changes after retirement are not modeled
    #[error(
        "net worth change in year {adjustment_year} happens after projected retirement in year {retirement_year}; changes after retirement are not supported"
    )]
    UnsupportedConfiguration {
        adjustment_year: u32,
        retirement_year: u32,
    },
}

/// Malformed `YEARS:VALUE` or `YEARS:CONTRIB:RATE` entry text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEntryError {
    #[error("expected {expected} ':'-separated fields in '{input}'")]
    FieldCount { input: String, expected: usize },

    #[error("invalid {field} '{value}' in '{input}'")]
    InvalidNumber {
        input: String,
        field: &'static str,
        value: String,
    },
}

/// Failure while loading inputs from CSV or JSON
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: {source}")]
    Entry {
        row: usize,
        #[source]
        source: ParseEntryError,
    },

    #[error("row {row}: {source}")]
    Grant {
        row: usize,
        #[source]
        source: GrantError,
    },
}

/// Invalid equity grant definition
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrantError {
    #[error("invalid month '{0}'; expected YYYY-mm")]
    InvalidMonth(String),

    #[error("shares per month must be positive, got {0}")]
    NonPositiveVestingRate(f64),

    #[error("execution fee {0} must be in [0, 1]")]
    InvalidExecutionFee(f64),
}
