// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Lowercase name -> accumulated count, one per (country, gender).
pub type NameCounts = HashMap<String, u64>;

/// The output vocabulary of every lookup in the crate.
/// "No result" is modelled as `Option::None`, never as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GenderLabel {
    #[serde(rename = "male")]
    Male,
    #[serde(rename = "mostly male")]
    MostlyMale,
    #[serde(rename = "unisex")]
    Unisex,
    #[serde(rename = "mostly female")]
    MostlyFemale,
    #[serde(rename = "female")]
    Female,
}

impl GenderLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderLabel::Male => "male",
            GenderLabel::MostlyMale => "mostly male",
            GenderLabel::Unisex => "unisex",
            GenderLabel::MostlyFemale => "mostly female",
            GenderLabel::Female => "female",
        }
    }
}

impl fmt::Display for GenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender code of one row in the global name dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderCode {
    /// `M`
    Male,
    /// `1M`
    MostlyMale,
    /// `?M`
    MaybeMale,
    /// `F`
    Female,
    /// `1F`
    MostlyFemale,
    /// `?F`
    MaybeFemale,
    /// `?`
    Unisex,
    /// `=`: equivalent-name row, carries no gender.
    Equivalent,
}

impl GenderCode {
    pub fn is_male(&self) -> bool {
        matches!(self, GenderCode::Male | GenderCode::MostlyMale | GenderCode::MaybeMale)
    }

    pub fn is_female(&self) -> bool {
        matches!(self, GenderCode::Female | GenderCode::MostlyFemale | GenderCode::MaybeFemale)
    }

    /// Direct code -> label mapping used for single-country answers.
    pub fn label(&self) -> Option<GenderLabel> {
        match self {
            GenderCode::Male => Some(GenderLabel::Male),
            GenderCode::MostlyMale | GenderCode::MaybeMale => Some(GenderLabel::MostlyMale),
            GenderCode::Female => Some(GenderLabel::Female),
            GenderCode::MostlyFemale | GenderCode::MaybeFemale => Some(GenderLabel::MostlyFemale),
            GenderCode::Unisex => Some(GenderLabel::Unisex),
            GenderCode::Equivalent => None,
        }
    }
}

impl FromStr for GenderCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(GenderCode::Male),
            "1M" => Ok(GenderCode::MostlyMale),
            "?M" => Ok(GenderCode::MaybeMale),
            "F" => Ok(GenderCode::Female),
            "1F" => Ok(GenderCode::MostlyFemale),
            "?F" => Ok(GenderCode::MaybeFemale),
            "?" => Ok(GenderCode::Unisex),
            "=" => Ok(GenderCode::Equivalent),
            other => Err(format!("unknown gender code '{}'", other)),
        }
    }
}
