//! Load grants from CSV
//!
//! ```csv
//! total_shares,shares_per_month,end_date,strike_price,execution_fee
//! 4800,100,2024-12,2.00,0.05
//! 1000,50,2025-06,20.00,
//! ```

use std::path::Path;

use csv::Reader;

use super::grant::Grant;
use crate::error::LoadError;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    total_shares: f64,
    shares_per_month: f64,
    end_date: String,
    strike_price: f64,
    #[serde(default)]
    execution_fee: Option<f64>,
}

/// Load all grants from a CSV file
pub fn load_grants<P: AsRef<Path>>(path: P) -> Result<Vec<Grant>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_grants_from_reader(file)
}

pub fn load_grants_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Grant>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut grants = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let grant = Grant::new(
            row.total_shares,
            row.shares_per_month,
            &row.end_date,
            row.strike_price,
            row.execution_fee.unwrap_or(0.0),
        )
        .map_err(|source| LoadError::Grant {
            row: idx + 1,
            source,
        })?;
        grants.push(grant);
    }

    Ok(grants)
}
