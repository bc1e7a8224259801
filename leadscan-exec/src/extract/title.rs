// Title/Seniority Classifier
//
// Finds a job-title phrase next to a validated name and maps it to a
// seniority tier through the ordered title keyword table. Mentions are
// searched nearest-first from the validated occurrence, and patterns in
// fixed order, so the first hit is deterministic.

use crate::extract::window::slice;
use crate::lexicon::Lexicon;
use crate::types::{SeniorityTier, TitleClassification, TitlePattern, ValidatedName};
use leadscan_common::config::TitleConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// "<Name>, our Title" / "<Name> - Title"
static COMMA_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:['’]s)?\s*[,–—-]\s*(?:(?:our|the|a|an)\s+)?([^\n,.;:()|]+)").expect("comma title pattern is valid")
});

/// "<Name> is our Title" / "<Name> was the Title"
static COPULA_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s+(?:is|was)\s+(?:our|the|a|an)\s+([^\n,.;:()|]+)").expect("copula title pattern is valid")
});

/// "Title: " immediately before the name
static COLON_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\n.;|:]+?)\s*:\s*$").expect("colon title pattern is valid"));

pub struct TitleClassifier {
    lexicon: Arc<Lexicon>,
    config: TitleConfig,
}

impl TitleClassifier {
    pub fn new(lexicon: Arc<Lexicon>, config: TitleConfig) -> Self {
        Self { lexicon, config }
    }

    /// Title and tier for a validated name, or the Unknown classification
    pub fn classify(&self, name: &ValidatedName, text: &str) -> TitleClassification {
        let surface = name.candidate.text.as_str();
        let mut occurrences: Vec<usize> = text.match_indices(surface).map(|(i, _)| i).collect();
        if !occurrences.contains(&name.offset()) {
            occurrences.push(name.offset());
        }
        occurrences.sort_by_key(|&i| (i.abs_diff(name.offset()), i));

        for start in occurrences {
            let end = start + surface.len();
            if let Some(found) = self.match_at(text, start, end) {
                debug!(
                    name = %name.text,
                    title = ?found.title,
                    tier = %found.tier,
                    "Classified title"
                );
                return found;
            }
        }
        TitleClassification::unknown()
    }

    /// Tier for an already-extracted title phrase
    pub fn tier_for(&self, title: &str) -> SeniorityTier {
        self.lexicon
            .title_tier(title)
            .map(|(_, tier)| tier)
            .unwrap_or(SeniorityTier::Unknown)
    }

    fn match_at(&self, text: &str, start: usize, end: usize) -> Option<TitleClassification> {
        let after = slice(text, end, end + self.config.search_span);
        let before = slice(text, start.saturating_sub(self.config.search_span), start);

        let comma = COMMA_TITLE_RE
            .captures(after)
            .and_then(|c| c.get(1))
            .and_then(|m| self.title_after_name(m.as_str()))
            .map(|t| (t, TitlePattern::NameCommaTitle, self.config.comma_pattern_confidence));
        let colon = || {
            COLON_TITLE_RE
                .captures(before)
                .and_then(|c| c.get(1))
                .and_then(|m| self.title_before_name(m.as_str()))
                .map(|t| (t, TitlePattern::TitleColonName, self.config.colon_pattern_confidence))
        };
        let copula = || {
            COPULA_TITLE_RE
                .captures(after)
                .and_then(|c| c.get(1))
                .and_then(|m| self.title_after_name(m.as_str()))
                .map(|t| (t, TitlePattern::NameIsTitle, self.config.copula_pattern_confidence))
        };

        let (title, pattern, confidence) = comma.or_else(colon).or_else(copula)?;
        let tier = self.tier_for(&title);
        Some(TitleClassification {
            title: Some(title),
            tier,
            decision_weight: tier.decision_weight(),
            pattern: Some(pattern),
            confidence,
        })
    }

    /// Title phrase at the start of the text following a name
    ///
    /// Runs up to the last title word within the word limit. "of" only
    /// extends a "Head of" title: "Managing Director of Riley Heating"
    /// stops at "Director", "Head of Operations" keeps "Operations".
    fn title_after_name(&self, phrase: &str) -> Option<String> {
        let words: Vec<&str> = phrase.split_whitespace().take(self.config.max_title_words).collect();
        let mut end = None;
        for (i, word) in words.iter().enumerate() {
            let lower = word.to_lowercase();
            if lower == "of" {
                let after_head = i > 0 && words[i - 1].eq_ignore_ascii_case("head");
                if after_head && i + 1 < words.len() {
                    end = Some(i + 1);
                }
                continue;
            }
            if self.lexicon.is_title_word(&lower) {
                end = Some(end.map_or(i, |e: usize| e.max(i)));
            }
        }

        let end = end?;
        // Drop leading filler ("lovely", "very") ahead of the title itself
        let begin = words[..=end]
            .iter()
            .position(|w| starts_upper(w) || self.lexicon.is_title_word(w))
            .unwrap_or(0);
        self.accept(&words[begin..=end])
    }

    /// Title phrase at the end of the text preceding a name
    fn title_before_name(&self, phrase: &str) -> Option<String> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let mut taken: Vec<&str> = Vec::new();
        for word in words.iter().rev() {
            if taken.len() == self.config.max_title_words {
                break;
            }
            if starts_upper(word) || self.lexicon.is_title_word(word) || word.eq_ignore_ascii_case("of") {
                taken.push(word);
            } else {
                break;
            }
        }
        taken.reverse();
        // "Contact Managing Director" keeps only the title words
        let begin = taken
            .iter()
            .position(|w| self.lexicon.is_title_word(w))?;
        self.accept(&taken[begin..])
    }

    fn accept(&self, words: &[&str]) -> Option<String> {
        let title = words.join(" ");
        self.lexicon.title_tier(&title).map(|_| title)
    }
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
