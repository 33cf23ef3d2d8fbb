// src/core/tables.rs
use crate::core::loader::{read_csv, CsvRow};
use crate::core::translit::transliterate;
use crate::core::types::NameCounts;
use crate::error::{GenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Male and female name counts of one country.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryTables {
    pub male: NameCounts,
    pub female: NameCounts,
}

impl CountryTables {
    /// Male count for `name`, 0 when absent.
    pub fn male_count(&self, name: &str) -> u64 {
        self.male.get(name).copied().unwrap_or(0)
    }

    /// Female count for `name`, 0 when absent.
    pub fn female_count(&self, name: &str) -> u64 {
        self.female.get(name).copied().unwrap_or(0)
    }
}

/// Per-country name tables, keyed by country name.
/// Ordered so that cross-country iteration is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameTableStore {
    countries: BTreeMap<String, CountryTables>,
}

impl NameTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `{stem}MaleUTF8.csv` and `{stem}FemaleUTF8.csv` from `data_dir`
    /// and registers them under `country`.
    pub fn load_country(&mut self, country: &str, data_dir: &Path, file_stem: &str, has_header: bool) -> Result<()> {
        let male_path = data_dir.join(format!("{}MaleUTF8.csv", file_stem));
        let female_path = data_dir.join(format!("{}FemaleUTF8.csv", file_stem));

        let tables = CountryTables {
            male: build_counts(&male_path, skip_header(read_csv(&male_path)?, has_header))?,
            female: build_counts(&female_path, skip_header(read_csv(&female_path)?, has_header))?,
        };
        tracing::debug!(
            country,
            male = tables.male.len(),
            female = tables.female.len(),
            "loaded name tables"
        );
        self.countries.insert(country.to_string(), tables);
        Ok(())
    }

    /// Registers already-built tables for `country`.
    pub fn insert(&mut self, country: &str, tables: CountryTables) {
        self.countries.insert(country.to_string(), tables);
    }

    pub fn get(&self, country: &str) -> Option<&CountryTables> {
        self.countries.get(country)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries.contains_key(country)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryTables)> {
        self.countries.iter().map(|(c, t)| (c.as_str(), t))
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

fn skip_header(mut rows: Vec<CsvRow>, has_header: bool) -> Vec<CsvRow> {
    if has_header && !rows.is_empty() {
        rows.remove(0);
    }
    rows
}

/// Aggregates (name, [count]) rows into a count table.
///
/// Names are lowercased. A row without a count is worth 1 the first time
/// its name is seen and 0 afterwards, since such lists carry no frequency
/// information. Every name then gets an accent-free alias unless that key
/// already has its own count.
pub fn build_counts(path: &Path, rows: Vec<CsvRow>) -> Result<NameCounts> {
    let mut names = NameCounts::new();

    for row in rows {
        let name = match row.field(0) {
            Some(name) => name.to_lowercase(),
            None => continue,
        };

        let count = match row.field(1) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                GenderError::malformed(path, row.line, format!("invalid count '{}' for '{}'", raw, name))
            })?,
            None if names.contains_key(&name) => 0,
            None => 1,
        };

        let total = names.entry(name).or_insert(0);
        *total = total
            .checked_add(count)
            .ok_or_else(|| GenderError::malformed(path, row.line, "count overflow"))?;
    }

    let aliases: Vec<(String, u64)> = names
        .iter()
        .map(|(name, &count)| (transliterate(name).to_lowercase(), count))
        .filter(|(alias, _)| !alias.is_empty())
        .collect();
    for (alias, count) in aliases {
        names.entry(alias).or_insert(count);
    }

    Ok(names)
}
