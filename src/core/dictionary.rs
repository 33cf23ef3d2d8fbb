// src/core/dictionary.rs
//! The multi-country name dictionary: for each name, rows of a gender code
//! and one hex frequency digit per country column.

use crate::core::types::{GenderCode, GenderLabel};
use crate::error::{GenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Column order of the frequency vectors.
pub const COUNTRY_COLUMNS: [&str; 55] = [
    "UK", "Ireland", "USA", "Italy", "Malta", "Portugal", "Spain", "France",
    "Belgium", "Luxembourg", "The Netherlands", "East Frisia", "Germany",
    "Austria", "Switzerland", "Iceland", "Denmark", "Norway", "Sweden",
    "Finland", "Estonia", "Latvia", "Lithuania", "Poland", "Czech Republic",
    "Slovakia", "Hungary", "Romania", "Bulgaria", "Bosnia and Herzegovina",
    "Croatia", "Kosovo", "Macedonia (FYROM)", "Montenegro", "Serbia",
    "Slovenia", "Albania", "Greece", "Russia", "Belarus", "Moldova", "Ukraine",
    "Armenia", "Azerbaijan", "Georgia", "Kazakhstan", "Turkey",
    "Arabia/Persia", "Israel", "China", "India/Sri Lanka", "Japan", "Korea",
    "Vietnam", "other countries",
];

/// Net male-vs-female frequency mass above which a name is a hard male or
/// female rather than "mostly".
pub const MASS_THRESHOLD: i64 = 256;

/// One row of the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub code: GenderCode,
    /// One slot per entry of [`COUNTRY_COLUMNS`]; `None` means no data.
    pub frequencies: Vec<Option<u8>>,
}

impl DictEntry {
    /// Parses a code and a fixed-width vector of hex digits or spaces.
    pub fn parse(code: &str, vector: &str) -> std::result::Result<Self, String> {
        let code: GenderCode = code.parse()?;
        let width = vector.chars().count();
        if width != COUNTRY_COLUMNS.len() {
            return Err(format!(
                "frequency vector has {} columns, expected {}",
                width,
                COUNTRY_COLUMNS.len()
            ));
        }
        let frequencies = vector
            .chars()
            .map(|c| match c {
                ' ' => Ok(None),
                _ => c
                    .to_digit(16)
                    .map(|d| Some(d as u8))
                    .ok_or_else(|| format!("invalid frequency digit '{}'", c)),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { code, frequencies })
    }

    pub fn frequency_at(&self, column: usize) -> Option<u8> {
        self.frequencies.get(column).copied().flatten()
    }
}

/// Lowercase name -> dictionary rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalNameDictionary {
    entries: HashMap<String, Vec<DictEntry>>,
}

impl GlobalNameDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON object of `name -> [[code, vector], ...]`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| GenderError::io(path, e))?;
        let raw: HashMap<String, Vec<(String, String)>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| GenderError::Dictionary {
                path: path.to_path_buf(),
                source,
            })?;

        let mut dictionary = Self::new();
        for (name, rows) in raw {
            for (code, vector) in rows {
                let entry = DictEntry::parse(&code, &vector)
                    .map_err(|reason| GenderError::malformed(path, 0, format!("entry '{}': {}", name, reason)))?;
                dictionary.insert(&name, entry);
            }
        }
        Ok(dictionary)
    }

    pub fn insert(&mut self, name: &str, entry: DictEntry) {
        self.entries.entry(name.to_lowercase()).or_default().push(entry);
    }

    /// All rows for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&[DictEntry]> {
        self.entries.get(&name.to_lowercase()).map(Vec::as_slice)
    }

    /// Gender from the frequency mass summed over every row and country.
    pub fn overall_gender(&self, name: &str) -> Option<GenderLabel> {
        let rows = self.get(name)?;

        let (mut male_mass, mut female_mass) = (0i64, 0i64);
        for entry in rows {
            let mass: i64 = entry.frequencies.iter().flatten().map(|&f| i64::from(f)).sum();
            if entry.code.is_male() {
                male_mass += mass;
            } else if entry.code.is_female() {
                female_mass += mass;
            }
        }

        let diff = male_mass - female_mass;
        let label = if diff > MASS_THRESHOLD {
            GenderLabel::Male
        } else if diff > 0 {
            GenderLabel::MostlyMale
        } else if -diff > MASS_THRESHOLD {
            GenderLabel::Female
        } else if diff < 0 {
            GenderLabel::MostlyFemale
        } else {
            GenderLabel::Unisex
        };
        Some(label)
    }

    /// Gender for a single country column. Only answers when exactly one row
    /// has data for that country; ambiguity and absence both give `None`.
    pub fn country_gender(&self, name: &str, country: &str) -> Option<GenderLabel> {
        let column = country_column(country)?;
        let rows = self.get(name)?;

        let mut with_data = rows.iter().filter(|entry| entry.frequency_at(column).is_some());
        match (with_data.next(), with_data.next()) {
            (Some(entry), None) => entry.code.label(),
            _ => None,
        }
    }

    /// `strict` restricts the answer to `country`; otherwise the overall
    /// gender is returned and `country` plays no part.
    pub fn lookup(&self, name: &str, country: &str, strict: bool) -> Option<GenderLabel> {
        if strict {
            self.country_gender(name, country)
        } else {
            self.overall_gender(name)
        }
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Column index of `country` after normalization.
pub fn country_column(country: &str) -> Option<usize> {
    let country = normalize_country_name(country);
    COUNTRY_COLUMNS.iter().position(|&c| c == country)
}

/// Maps common spellings of a country to the dictionary's column name.
/// Unknown countries are returned trimmed but otherwise unchanged.
pub fn normalize_country_name(country: &str) -> String {
    let trimmed = country.trim();
    let lower = trimmed.to_lowercase();

    if let Some(known) = COUNTRY_COLUMNS.iter().find(|c| c.to_lowercase() == lower) {
        return known.to_string();
    }

    let alias = match lower.as_str() {
        "united kingdom" | "great britain" | "england" | "scotland" | "wales" | "northern ireland" => "UK",
        "united states" | "united states of america" | "us" | "america" => "USA",
        "netherlands" | "holland" | "nederland" => "The Netherlands",
        "czech" | "czechia" => "Czech Republic",
        "macedonia" | "north macedonia" => "Macedonia (FYROM)",
        "bosnia" | "bosnia-herzegovina" => "Bosnia and Herzegovina",
        "iran" | "saudi arabia" | "iraq" | "egypt" | "united arab emirates" => "Arabia/Persia",
        "india" | "sri lanka" => "India/Sri Lanka",
        "south korea" | "north korea" => "Korea",
        "russian federation" => "Russia",
        "türkiye" | "turkiye" => "Turkey",
        "frisia" => "East Frisia",
        _ => return trimmed.to_string(),
    };
    alias.to_string()
}
