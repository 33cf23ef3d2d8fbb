// src/core/weights.rs
use crate::core::loader::{read_csv, CsvRow};
use crate::error::{GenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Country -> share of the observed population, summing to 1.0.
/// Used only to arbitrate between countries that disagree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryWeights {
    shares: HashMap<String, f64>,
}

impl CountryWeights {
    /// Loads `country, count` rows and normalizes the counts.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_rows(path, read_csv(path)?)
    }

    pub fn from_rows(path: &Path, rows: Vec<CsvRow>) -> Result<Self> {
        let mut counts: Vec<(String, f64)> = Vec::with_capacity(rows.len());

        for row in rows {
            let country = row
                .field(0)
                .ok_or_else(|| GenderError::malformed(path, row.line, "missing country"))?;
            let raw = row
                .field(1)
                .ok_or_else(|| GenderError::malformed(path, row.line, format!("missing count for '{}'", country)))?;
            let count = raw
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite() && *c >= 0.0)
                .ok_or_else(|| GenderError::malformed(path, row.line, format!("invalid count '{}'", raw)))?;
            if count == 0.0 {
                tracing::warn!(country, "country has no observed population");
            }
            counts.push((country.to_string(), count));
        }

        Self::from_counts(counts).ok_or_else(|| GenderError::malformed(path, 0, "population total is zero"))
    }

    /// Normalizes raw counts. `None` if there are counts but they sum to zero.
    pub fn from_counts<I>(counts: I) -> Option<Self>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut shares: HashMap<String, f64> = HashMap::new();
        for (country, count) in counts {
            *shares.entry(country).or_insert(0.0) += count;
        }

        let total: f64 = shares.values().sum();
        if shares.is_empty() {
            return Some(Self { shares });
        }
        if total <= 0.0 {
            return None;
        }
        for share in shares.values_mut() {
            *share /= total;
        }
        Some(Self { shares })
    }

    /// Population share of `country`, if it is in the table.
    pub fn get(&self, country: &str) -> Option<f64> {
        self.shares.get(country).copied()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}
