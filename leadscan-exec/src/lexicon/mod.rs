//! Lexicon Store
//!
//! Static reference sets used by the validator, attributor and title
//! classifier. A `Lexicon` is built once (usually from the built-in lists,
//! optionally extended from a TOML file) and then shared read-only as
//! `Arc<Lexicon>`. Every component takes it as a constructor argument, so
//! tests can hand in a purpose-built lexicon.

pub mod builtin;

use crate::types::SeniorityTier;
use leadscan_common::{Error, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Terms shorter than this match whole tokens only, never substrings
const MIN_SUBSTRING_TERM_LEN: usize = 5;

/// Immutable lookup tables
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    first_names: HashSet<String>,
    surnames: HashSet<String>,
    exclusions: HashSet<String>,
    service_terms: HashSet<String>,
    location_terms: HashSet<String>,
    review_cues: HashSet<String>,
    generic_mailboxes: HashSet<String>,
    nicknames: HashMap<String, String>,
    /// Ordered (keyword, tier); earlier entries win
    title_keywords: Vec<(String, SeniorityTier)>,
}

/// Additional terms loaded from TOML
///
/// ```toml
/// first_names = ["rhiannon"]
/// surnames = ["pryce"]
/// exclusions = ["newsletter"]
/// [nicknames]
/// rhi = "rhiannon"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LexiconExtension {
    pub first_names: Vec<String>,
    pub surnames: Vec<String>,
    pub exclusions: Vec<String>,
    pub service_terms: Vec<String>,
    pub location_terms: Vec<String>,
    pub review_cues: Vec<String>,
    pub generic_mailboxes: Vec<String>,
    pub nicknames: HashMap<String, String>,
    pub decision_maker_titles: Vec<String>,
    pub management_titles: Vec<String>,
    pub staff_titles: Vec<String>,
}

fn lower_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl Lexicon {
    /// Lexicon with no entries at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lexicon built from the compiled-in lists
    pub fn builtin() -> Self {
        let mut title_keywords = Vec::new();
        for (list, tier) in [
            (builtin::DECISION_MAKER_TITLES, SeniorityTier::DecisionMaker),
            (builtin::MANAGEMENT_TITLES, SeniorityTier::Management),
            (builtin::STAFF_TITLES, SeniorityTier::Staff),
        ] {
            title_keywords.extend(list.iter().map(|k| (k.to_string(), tier)));
        }

        Self {
            first_names: lower_set(builtin::FIRST_NAMES),
            surnames: lower_set(builtin::SURNAMES),
            exclusions: lower_set(builtin::EXCLUSIONS),
            service_terms: lower_set(builtin::SERVICE_TERMS),
            location_terms: lower_set(builtin::LOCATION_TERMS),
            review_cues: lower_set(builtin::REVIEW_CUES),
            generic_mailboxes: lower_set(builtin::GENERIC_MAILBOXES),
            nicknames: builtin::NICKNAMES
                .iter()
                .map(|(short, formal)| (short.to_string(), formal.to_string()))
                .collect(),
            title_keywords,
        }
    }

    /// Built-in lexicon extended from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut lexicon = Self::builtin();
        lexicon.extend(Self::parse_extension(content)?);
        Ok(lexicon)
    }

    /// Built-in lexicon extended from a TOML file
    pub fn load_extensions(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::from_toml_str(&content)?;
        info!(
            first_names = lexicon.first_name_count(),
            surnames = lexicon.surname_count(),
            "Lexicon extended from {}",
            path.display()
        );
        Ok(lexicon)
    }

    /// Parse a TOML extension document
    pub fn parse_extension(content: &str) -> Result<LexiconExtension> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid lexicon file: {}", e)))
    }

    /// Merge extra terms into this lexicon
    ///
    /// Extra title keywords are appended after the existing ones of the same
    /// tier, so built-in precedence is preserved.
    pub fn extend(&mut self, ext: LexiconExtension) {
        let lower = |v: Vec<String>| v.into_iter().map(|w| w.trim().to_lowercase());
        self.first_names.extend(lower(ext.first_names));
        self.surnames.extend(lower(ext.surnames).map(|s| fold_surname(&s)));
        self.exclusions.extend(lower(ext.exclusions));
        self.service_terms.extend(lower(ext.service_terms));
        self.location_terms.extend(lower(ext.location_terms));
        self.review_cues.extend(lower(ext.review_cues));
        self.generic_mailboxes.extend(lower(ext.generic_mailboxes));
        self.nicknames.extend(
            ext.nicknames
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_lowercase())),
        );

        for (extra, tier) in [
            (ext.decision_maker_titles, SeniorityTier::DecisionMaker),
            (ext.management_titles, SeniorityTier::Management),
            (ext.staff_titles, SeniorityTier::Staff),
        ] {
            let insert_at = self
                .title_keywords
                .iter()
                .rposition(|(_, t)| *t == tier)
                .map(|i| i + 1)
                .unwrap_or(self.title_keywords.len());
            for (i, keyword) in lower(extra).enumerate() {
                self.title_keywords.insert(insert_at + i, (keyword, tier));
            }
        }
    }

    // ------------------------------------------------------------------
    // Builder-style setters (tests and embedders)
    // ------------------------------------------------------------------

    pub fn with_first_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.first_names
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn with_surnames<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.surnames
            .extend(names.into_iter().map(|n| fold_surname(&n.as_ref().to_lowercase())));
        self
    }

    pub fn with_exclusions<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions
            .extend(terms.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn with_service_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.service_terms
            .extend(terms.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn with_title_keyword(mut self, keyword: &str, tier: SeniorityTier) -> Self {
        self.title_keywords.push((keyword.to_lowercase(), tier));
        self
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Formal first name for a nickname, or the lowercased token itself
    pub fn canonical_first_name(&self, token: &str) -> String {
        let lower = token.to_lowercase();
        self.nicknames.get(&lower).cloned().unwrap_or(lower)
    }

    /// First-name lookup, nickname-aware
    pub fn is_first_name(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        self.first_names.contains(&lower)
            || self
                .nicknames
                .get(&lower)
                .is_some_and(|formal| self.first_names.contains(formal))
    }

    /// Surname lookup; "McManus", "Mc Manus" and "O'Neill" fold to the stored form
    pub fn is_surname(&self, token: &str) -> bool {
        self.surnames.contains(&fold_surname(&token.to_lowercase()))
    }

    /// First exclusion term found in the candidate text
    pub fn exclusion_hit(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        if self.exclusions.contains(lower.trim()) {
            return Some(lower.trim().to_string());
        }
        lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .find(|w| self.exclusions.contains(*w))
            .map(str::to_string)
    }

    /// Service and location terms contained in one token
    ///
    /// Long terms match as substrings ("Heating" in "Heatingco"); short
    /// terms only as the whole token, so "Gaskell" is not a gas company.
    pub fn service_location_hits(&self, token: &str) -> Vec<String> {
        let lower = token.to_lowercase();
        let mut hits: Vec<String> = self
            .service_terms
            .iter()
            .chain(self.location_terms.iter())
            .filter(|term| {
                if term.len() < MIN_SUBSTRING_TERM_LEN {
                    lower == **term
                } else {
                    lower.contains(term.as_str())
                }
            })
            .cloned()
            .collect();
        hits.sort();
        hits.dedup();
        hits
    }

    pub fn is_review_cue(&self, word: &str) -> bool {
        self.review_cues.contains(&word.to_lowercase())
    }

    pub fn is_generic_mailbox(&self, local_part: &str) -> bool {
        let lower = local_part.to_lowercase();
        self.generic_mailboxes.contains(&lower)
            || self
                .generic_mailboxes
                .iter()
                .any(|g| lower.starts_with(g.as_str()) && !lower[g.len()..].chars().any(|c| c.is_alphabetic()))
    }

    /// Ordered title keywords with their tier
    pub fn title_keywords(&self) -> &[(String, SeniorityTier)] {
        &self.title_keywords
    }

    /// First title keyword (in table order) present in a phrase
    pub fn title_tier(&self, phrase: &str) -> Option<(&str, SeniorityTier)> {
        let padded = format!(" {} ", normalize_words(phrase));
        self.title_keywords
            .iter()
            .find(|(keyword, _)| padded.contains(&format!(" {} ", keyword)))
            .map(|(keyword, tier)| (keyword.as_str(), *tier))
    }

    /// Whether a single word is, or starts, a title keyword
    pub fn is_title_word(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.title_keywords
            .iter()
            .any(|(keyword, _)| keyword.split(' ').any(|part| part == lower))
    }

    /// Longest surname contained in an email local part
    ///
    /// Returns (surname, byte index of the match in the folded local part).
    pub fn longest_surname_in(&self, local_part: &str) -> Option<(String, usize)> {
        let folded: String = local_part
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        self.surnames
            .iter()
            .filter(|s| s.len() >= 3)
            .filter_map(|s| folded.find(s.as_str()).map(|i| (s.clone(), i)))
            .max_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| b.0.cmp(&a.0)))
    }

    pub fn first_name_count(&self) -> usize {
        self.first_names.len()
    }

    pub fn surname_count(&self) -> usize {
        self.surnames.len()
    }
}

/// Strip apostrophes and spaces so "O'Neill"/"Mc Manus" match stored forms
fn fold_surname(lower: &str) -> String {
    lower
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

/// Lowercase words separated by single spaces (hyphens kept)
pub fn normalize_words(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of a lowercase surname: "mcmanus" → "McManus", "oneill" → "O'Neill"
pub fn display_surname(lower: &str) -> String {
    fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    if let Some(rest) = lower.strip_prefix("mc") {
        if !rest.is_empty() {
            return format!("Mc{}", capitalize(rest));
        }
    }
    if let Some(rest) = lower.strip_prefix("o'") {
        return format!("O'{}", capitalize(rest));
    }
    const O_PREFIXED: &[&str] = &["obrien", "oneill", "oconnor", "odonnell", "oreilly", "osullivan"];
    if O_PREFIXED.contains(&lower) {
        return format!("O'{}", capitalize(&lower[1..]));
    }
    lower
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}
