// src/core/engine.rs
use crate::core::data::NameData;
use crate::core::names::{extract_first_name, is_single_token, strip_digits};
use crate::core::tables::CountryTables;
use crate::core::translit::{only_cyrillic_chars, only_greek_chars, transliterate};
use crate::core::types::GenderLabel;
use std::collections::BTreeMap;
use tracing::debug;

/// Below this minority/majority ratio a name is "mostly" one gender.
pub const UNISEX_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverOptions {
    pub unisex_ratio: f64,
    /// Retry with digits removed once letter stripping fails ("bogdan85").
    pub strip_digits: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            unisex_ratio: UNISEX_RATIO,
            strip_digits: false,
        }
    }
}

/// Turns per-country male/female counts into a label.
///
/// One-sided counts give a hard label. Two-sided counts are unisex when the
/// minority is at least `unisex_ratio` of the majority, "mostly" otherwise.
/// A single occurrence on each side is a tie and therefore unisex.
pub fn decide(count_male: u64, count_female: u64, unisex_ratio: f64) -> Option<GenderLabel> {
    match (count_male, count_female) {
        (0, 0) => None,
        (_, 0) => Some(GenderLabel::Male),
        (0, _) => Some(GenderLabel::Female),
        (1, 1) => Some(GenderLabel::Unisex),
        (m, f) if m > f => {
            if (f as f64) / (m as f64) < unisex_ratio {
                Some(GenderLabel::MostlyMale)
            } else {
                Some(GenderLabel::Unisex)
            }
        }
        (m, f) => {
            if (m as f64) / (f as f64) < unisex_ratio {
                Some(GenderLabel::MostlyFemale)
            } else {
                Some(GenderLabel::Unisex)
            }
        }
    }
}

/// Resolves names against a loaded [`NameData`] snapshot.
/// Holds only a shared borrow, so any number of resolvers can run at once.
pub struct GenderResolver<'d> {
    data: &'d NameData,
    options: ResolverOptions,
}

impl<'d> GenderResolver<'d> {
    pub fn new(data: &'d NameData) -> Self {
        Self::with_options(data, ResolverOptions::default())
    }

    pub fn with_options(data: &'d NameData, options: ResolverOptions) -> Self {
        Self { data, options }
    }

    /// Infers the gender of a full name.
    ///
    /// Attempts run in order and the first answer wins:
    /// 1. Cyrillic or Greek names are transliterated up front.
    /// 2. The first name is resolved across all countries.
    /// 3. The same, after folding the original name to ASCII.
    /// 4. Username-like names are retried without their last, then first letter.
    /// 5. Optionally, all of the above again with digits removed.
    ///
    /// `country` is recorded for tracing only: evidence is always arbitrated
    /// across every country with tables.
    pub fn resolve_gender(&self, name: &str, country: &str) -> Option<GenderLabel> {
        let original = name.trim();
        let name = if only_cyrillic_chars(original) || only_greek_chars(original) {
            transliterate(original)
        } else {
            original.to_string()
        };

        let gender = self
            .try_direct(&name)
            .or_else(|| self.try_unidecoded(original))
            .or_else(|| self.try_removing_first_and_last_letters(&name))
            .or_else(|| self.try_without_digits(&name));

        debug!(name = original, country, gender = ?gender, "resolved");
        gender
    }

    fn try_direct(&self, name: &str) -> Option<GenderLabel> {
        let first_name = extract_first_name(name);
        let gender = self.resolve_first_name_overall(&first_name, true);
        debug!(stage = "direct", first_name = %first_name, gender = ?gender);
        gender
    }

    fn try_unidecoded(&self, name: &str) -> Option<GenderLabel> {
        let first_name = extract_first_name(&transliterate(name));
        let gender = self.resolve_first_name_overall(&first_name, true);
        debug!(stage = "unidecoded", first_name = %first_name, gender = ?gender);
        gender
    }

    fn try_removing_first_and_last_letters(&self, name: &str) -> Option<GenderLabel> {
        if !is_single_token(name) {
            return None;
        }
        let token = name.trim().to_lowercase();
        let mut chars = token.chars();

        chars.next_back();
        let without_last = chars.as_str();
        let mut chars = token.chars();
        chars.next();
        let without_first = chars.as_str();

        let gender = self
            .resolve_first_name_overall(without_last, true)
            .or_else(|| self.resolve_first_name_overall(without_first, true));
        debug!(stage = "letter stripping", without_last, without_first, gender = ?gender);
        gender
    }

    fn try_without_digits(&self, name: &str) -> Option<GenderLabel> {
        if !self.options.strip_digits {
            return None;
        }
        let stripped = strip_digits(name);
        if stripped == name || stripped.trim().is_empty() {
            return None;
        }
        debug!(stage = "digit stripping", stripped = stripped.as_str());
        self.try_direct(&stripped)
            .or_else(|| self.try_removing_first_and_last_letters(&stripped))
    }

    /// Resolves a first name using every country's tables, weighting each
    /// country's verdict by its population share.
    ///
    /// Countries without a weight still vote, with weight 0. Equal totals go
    /// to the label that sorts first. When no country knows the name, the
    /// global dictionary's overall verdict is used.
    pub fn resolve_first_name_overall(&self, first_name: &str, with_diminutives: bool) -> Option<GenderLabel> {
        if first_name.is_empty() {
            return None;
        }

        let mut arbiter: BTreeMap<GenderLabel, f64> = BTreeMap::new();
        for (country, tables) in self.data.tables.iter() {
            if let Some(gender) = self.lookup_in(first_name, tables, with_diminutives) {
                *arbiter.entry(gender).or_insert(0.0) += self.data.weights.get(country).unwrap_or(0.0);
            }
        }

        let best = arbiter
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.as_str().cmp(a.0.as_str())))
            .map(|(gender, _)| gender);
        if best.is_some() {
            return best;
        }

        let gender = self.data.dictionary.lookup(first_name, "", false);
        debug!(first_name, gender = ?gender, "dictionary fallback");
        gender
    }

    /// Frequency-based verdict for `first_name` in one country.
    /// `None` when the country has no tables or the name is unknown there.
    pub fn frequency_lookup(&self, first_name: &str, country: &str, with_diminutives: bool) -> Option<GenderLabel> {
        let tables = self.data.tables.get(country)?;
        self.lookup_in(first_name, tables, with_diminutives)
    }

    fn lookup_in(&self, first_name: &str, tables: &CountryTables, with_diminutives: bool) -> Option<GenderLabel> {
        let (count_male, count_female) = if with_diminutives {
            self.data
                .diminutives
                .expand(first_name)
                .iter()
                .fold((0u64, 0u64), |(m, f), name| {
                    (
                        m.saturating_add(tables.male_count(name)),
                        f.saturating_add(tables.female_count(name)),
                    )
                })
        } else {
            (tables.male_count(first_name), tables.female_count(first_name))
        };
        decide(count_male, count_female, self.options.unisex_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::{DictEntry, COUNTRY_COLUMNS};
    use crate::core::weights::CountryWeights;

    fn tables(male: &[(&str, u64)], female: &[(&str, u64)]) -> CountryTables {
        let mut t = CountryTables::default();
        t.male.extend(male.iter().map(|&(n, c)| (n.to_string(), c)));
        t.female.extend(female.iter().map(|&(n, c)| (n.to_string(), c)));
        t
    }

    fn weights(shares: &[(&str, f64)]) -> CountryWeights {
        CountryWeights::from_counts(shares.iter().map(|&(c, w)| (c.to_string(), w))).unwrap()
    }

    fn sample_data() -> NameData {
        let mut data = NameData::default();
        data.tables.insert(
            "Italy",
            tables(&[("andrea", 90), ("bogdan", 1), ("robert", 4)], &[("maria", 50), ("andrea", 2)]),
        );
        data.tables.insert(
            "USA",
            tables(&[("robert", 40), ("andrea", 1)], &[("andrea", 60), ("mariia", 3), ("roberta", 2)]),
        );
        data.tables.insert("Romania", tables(&[("bogdan", 30)], &[]));
        data.diminutives.insert("bob", "robert");
        data.weights = weights(&[("Italy", 20.0), ("USA", 70.0), ("Romania", 10.0)]);
        data
    }

    #[test]
    fn decision_rule() {
        assert_eq!(decide(0, 0, UNISEX_RATIO), None);
        assert_eq!(decide(5, 0, UNISEX_RATIO), Some(GenderLabel::Male));
        assert_eq!(decide(0, 1, UNISEX_RATIO), Some(GenderLabel::Female));
        assert_eq!(decide(1, 1, UNISEX_RATIO), Some(GenderLabel::Unisex));
        assert_eq!(decide(10, 6, UNISEX_RATIO), Some(GenderLabel::Unisex));
        assert_eq!(decide(10, 4, UNISEX_RATIO), Some(GenderLabel::MostlyMale));
        assert_eq!(decide(4, 10, UNISEX_RATIO), Some(GenderLabel::MostlyFemale));
        assert_eq!(decide(10, 5, UNISEX_RATIO), Some(GenderLabel::Unisex));
        assert_eq!(decide(2, 2, UNISEX_RATIO), Some(GenderLabel::Unisex));
    }

    #[test]
    fn frequency_lookup_per_country() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.frequency_lookup("maria", "Italy", false), Some(GenderLabel::Female));
        assert_eq!(resolver.frequency_lookup("andrea", "Italy", false), Some(GenderLabel::MostlyMale));
        assert_eq!(resolver.frequency_lookup("andrea", "USA", false), Some(GenderLabel::MostlyFemale));
        assert_eq!(resolver.frequency_lookup("maria", "USA", false), None);
        assert_eq!(resolver.frequency_lookup("maria", "Narnia", false), None);
    }

    #[test]
    fn diminutives_broaden_the_lookup() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.frequency_lookup("bob", "USA", false), None);
        assert_eq!(resolver.frequency_lookup("bob", "USA", true), Some(GenderLabel::Male));
    }

    #[test]
    fn heavier_countries_win_arbitration() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        // Italy (0.2) says mostly male, USA (0.7) says mostly female.
        assert_eq!(resolver.resolve_first_name_overall("andrea", false), Some(GenderLabel::MostlyFemale));
    }

    #[test]
    fn equal_weights_break_ties_by_label_text() {
        let mut data = NameData::default();
        data.tables.insert("A", tables(&[("sam", 3)], &[]));
        data.tables.insert("B", tables(&[], &[("sam", 3)]));
        data.weights = weights(&[("A", 1.0), ("B", 1.0)]);
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_first_name_overall("sam", false), Some(GenderLabel::Female));
    }

    #[test]
    fn unweighted_countries_still_vote() {
        let mut data = NameData::default();
        data.tables.insert("Somalia", tables(&[("abdi", 12)], &[]));
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_first_name_overall("abdi", true), Some(GenderLabel::Male));
    }

    #[test]
    fn dictionary_fallback_ignores_country() {
        let mut data = sample_data();
        let mut vector = vec![' '; COUNTRY_COLUMNS.len()];
        vector[37] = '9'; // Greece
        data.dictionary
            .insert("eleni", DictEntry::parse("F", &vector.into_iter().collect::<String>()).unwrap());
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_first_name_overall("eleni", true), Some(GenderLabel::MostlyFemale));
        assert_eq!(resolver.resolve_first_name_overall("nobody", true), None);
    }

    #[test]
    fn cascade_strips_trailing_letter_before_leading_one() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_gender("bogdanv", ""), Some(GenderLabel::Male));
        assert_eq!(resolver.resolve_gender("vbogdan", ""), Some(GenderLabel::Male));
        assert_eq!(resolver.resolve_gender("bogdan vv", ""), Some(GenderLabel::Male));
        assert_eq!(resolver.resolve_gender("xbogdanv", ""), None);
    }

    #[test]
    fn cascade_transliterates_cyrillic() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_gender("Мария", "Russia"), Some(GenderLabel::Female));
    }

    #[test]
    fn cascade_folds_diacritics() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_gender("Mãria Rossi", "Italy"), Some(GenderLabel::Female));
    }

    #[test]
    fn digit_stripping_is_opt_in() {
        let data = sample_data();
        assert_eq!(GenderResolver::new(&data).resolve_gender("bogdan85", ""), None);

        let options = ResolverOptions {
            strip_digits: true,
            ..ResolverOptions::default()
        };
        let resolver = GenderResolver::with_options(&data, options);
        assert_eq!(resolver.resolve_gender("bogdan85", ""), Some(GenderLabel::Male));
        assert_eq!(resolver.resolve_gender("bogdanv85", ""), Some(GenderLabel::Male));
    }

    #[test]
    fn trailing_letter_variant_wins_when_both_resolve() {
        let mut data = NameData::default();
        data.tables.insert("USA", tables(&[("nnx", 40)], &[("ann", 30)]));
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_first_name_overall("nnx", true), Some(GenderLabel::Male));
        assert_eq!(resolver.resolve_gender("annx", ""), Some(GenderLabel::Female));
    }

    #[test]
    fn huge_diminutive_counts_saturate() {
        let mut data = NameData::default();
        data.tables.insert("USA", tables(&[("bob", u64::MAX), ("robert", 5)], &[]));
        data.diminutives.insert("bob", "robert");
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.frequency_lookup("bob", "USA", true), Some(GenderLabel::Male));
        assert_eq!(resolver.resolve_gender("Bob", ""), Some(GenderLabel::Male));
    }

    #[test]
    fn empty_name_has_no_gender() {
        let data = sample_data();
        let resolver = GenderResolver::new(&data);
        assert_eq!(resolver.resolve_gender("", ""), None);
        assert_eq!(resolver.resolve_gender("   ", "USA"), None);
    }
}
