// src/core/diminutives.rs
use crate::core::loader::{read_csv, CsvRow};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Maps a diminutive ("bob") to the canonical names it abbreviates ("robert").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiminutiveIndex {
    canonical: HashMap<String, BTreeSet<String>>,
}

impl DiminutiveIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads rows of `canonical, diminutive, diminutive, ...`.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_rows(read_csv(path)?))
    }

    pub fn from_rows(rows: Vec<CsvRow>) -> Self {
        let mut index = Self::new();
        for row in rows {
            let main_name = match row.field(0) {
                Some(name) => name.to_lowercase(),
                None => continue,
            };
            for idx in 1..row.fields.len() {
                if let Some(diminutive) = row.field(idx) {
                    index.insert(&diminutive.to_lowercase(), &main_name);
                }
            }
        }
        index
    }

    pub fn insert(&mut self, diminutive: &str, canonical: &str) {
        self.canonical
            .entry(diminutive.to_string())
            .or_default()
            .insert(canonical.to_string());
    }

    /// Canonical forms of `diminutive`, if it is a known diminutive.
    pub fn canonical_forms(&self, diminutive: &str) -> Option<&BTreeSet<String>> {
        self.canonical.get(diminutive)
    }

    /// `name` plus every canonical form it abbreviates.
    pub fn expand(&self, name: &str) -> BTreeSet<String> {
        let mut names = self.canonical_forms(name).cloned().unwrap_or_default();
        names.insert(name.to_string());
        names
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}
