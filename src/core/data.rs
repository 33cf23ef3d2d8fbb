// src/core/data.rs
use crate::core::diminutives::DiminutiveIndex;
use crate::core::dictionary::GlobalNameDictionary;
use crate::core::tables::NameTableStore;
use crate::core::weights::CountryWeights;
use crate::error::{GenderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Countries with dedicated name lists, and the file stem each is read from.
const DEFAULT_COUNTRIES: &[(&str, &str)] = &[
    ("Afganistan", "Afganistan"),
    ("Albania", "Albania"),
    ("Australia", "Australia"),
    ("Belgium", "Belgium"),
    ("Brazil", "Brazil"),
    ("Canada", "Canada"),
    ("Czech", "Czech"),
    ("Finland", "Finland"),
    ("Greece", "Greece"),
    ("Hungary", "Hungary"),
    ("India", "India"),
    ("Iran", "Iran"),
    ("Ireland", "Ireland"),
    ("Israel", "Israel"),
    ("Italy", "Italy"),
    ("Latvia", "Latvia"),
    ("Norway", "Norway"),
    ("Poland", "Poland"),
    ("Romania", "Romania"),
    ("Russia", "Russia"),
    ("Slovenia", "Slovenia"),
    ("Somalia", "Somalia"),
    ("Spain", "Spain"),
    ("Sweden", "Sweden"),
    ("Turkey", "Turkey"),
    ("UK", "UK"),
    ("Ukraine", "Ukraine"),
    ("USA", "USA"),
    // Frisian lists stand in for the whole country.
    ("The Netherlands", "Frisia"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySource {
    pub country: String,
    pub file_stem: String,
}

/// Where the source files live and how they are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    /// Whether the per-country name lists start with a header row.
    pub has_header: bool,
    pub countries: Vec<CountrySource>,
    pub diminutives_file: String,
    pub country_stats_file: String,
    pub dictionary_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("nameLists"),
            has_header: false,
            countries: DEFAULT_COUNTRIES
                .iter()
                .map(|&(country, file_stem)| CountrySource {
                    country: country.to_string(),
                    file_stem: file_stem.to_string(),
                })
                .collect(),
            diminutives_file: "diminutives.csv".to_string(),
            country_stats_file: "countryStats.csv".to_string(),
            dictionary_file: "gender.dict".to_string(),
        }
    }
}

impl DataConfig {
    /// Default layout rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GenderError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| GenderError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Every table the resolver consults. Built once, never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameData {
    pub tables: NameTableStore,
    pub dictionary: GlobalNameDictionary,
    pub diminutives: DiminutiveIndex,
    pub weights: CountryWeights,
}

impl NameData {
    /// Runs the full load. Any missing or malformed file aborts it.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let dir = config.data_dir.as_path();

        let dictionary = GlobalNameDictionary::load(&dir.join(&config.dictionary_file))?;

        let mut tables = NameTableStore::new();
        for source in &config.countries {
            tables.load_country(&source.country, dir, &source.file_stem, config.has_header)?;
        }

        let diminutives = DiminutiveIndex::load(&dir.join(&config.diminutives_file))?;
        let weights = CountryWeights::load(&dir.join(&config.country_stats_file))?;

        for country in tables.countries() {
            if weights.get(country).is_none() {
                tracing::warn!(country, "no population weight; its votes will not be weighted");
            }
        }

        tracing::info!(
            countries = tables.len(),
            dictionary_names = dictionary.len(),
            diminutives = diminutives.len(),
            weighted_countries = weights.len(),
            "Finished initialization"
        );

        Ok(Self {
            tables,
            dictionary,
            diminutives,
            weights,
        })
    }
}
