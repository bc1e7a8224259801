// Candidate Generator
//
// Recall-maximizing scan for name-shaped token sequences. No confidence is
// computed here; the validator decides what survives.
//
// Patterns, in priority order:
// 1. "First Last"      - two adjacent capitalized tokens
// 2. "First M. Last"   - capitalized token, initial, capitalized token
// 3. single token      - capitalized token next to a person cue
//    ("Thank you Name", "our engineer Name", "Name was ...")

use crate::extract::window::slice;
use crate::lexicon::Lexicon;
use crate::types::{CandidatePattern, NameCandidate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Capitalized word: "James", "McManus", "O'Neill", "Smith-Jones", "Zoë"
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\p{Lu}\p{Ll}*(?:['’]\p{Lu}\p{Ll}+|\p{Lu}\p{Ll}+|-\p{Lu}\p{Ll}+)*\b")
        .expect("word pattern is valid")
});

static INITIAL_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b\p{Lu}\p{Ll}+[ \t]+\p{Lu}\.[ \t]*\p{Lu}\p{Ll}*(?:['’]\p{Lu}\p{Ll}+|\p{Lu}\p{Ll}+|-\p{Lu}\p{Ll}+)*\b",
    )
    .expect("initial pattern is valid")
});

/// Salutation ending right before a token
static SALUTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:thank\s+you|thanks(?:\s+to)?|cheers|dear|hi|hello|shout\s*out\s+to)[\s,!]*$")
        .expect("salutation pattern is valid")
});

/// Possessive title ending right before a token: "our engineer", "my director,"
static POSSESSIVE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:our|my|the|your)\s+([a-z-]+)\s*,?\s*$").expect("possessive pattern is valid")
});

/// Review-style continuation right after a token: "Name was", "Name arrived"
static REVIEW_FOLLOW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:['’]s)?\s+(?:was|is|were|has\s+been|did|came|arrived|turned\s+up)\b")
        .expect("review pattern is valid")
});

/// Possessive or appositive title right after a token: "Name, our owner"
static TITLE_FOLLOW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:['’]s)?\s*,?\s*(?:our|the|my)\s+([a-z-]+)").expect("title pattern is valid")
});

/// Two candidates with the same text this close together are one occurrence
const DEDUP_TOLERANCE: usize = 8;

/// Name-shaped span scanner
pub struct CandidateGenerator {
    lexicon: Arc<Lexicon>,
    cue_window: usize,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    start: usize,
    end: usize,
}

impl CandidateGenerator {
    pub fn new(lexicon: Arc<Lexicon>, cue_window: usize) -> Self {
        Self { lexicon, cue_window }
    }

    /// Scan one page for name candidates, ordered by offset
    pub fn generate(&self, text: &str, page_id: &str) -> Vec<NameCandidate> {
        let tokens: Vec<Token> = WORD_RE
            .find_iter(text)
            .filter(|m| m.as_str().chars().count() >= 2)
            .map(|m| Token {
                start: m.start(),
                end: m.end(),
            })
            .collect();

        let mut found = Vec::new();

        // 1. First Last (overlapping pairs, so "Andrew Riley Heating" also
        //    yields "Riley Heating" for the validator to reject)
        for pair in tokens.windows(2) {
            let gap = &text[pair[0].end..pair[1].start];
            if !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t' || c == '\u{a0}') {
                found.push(NameCandidate::new(
                    &text[pair[0].start..pair[1].end],
                    pair[0].start,
                    page_id,
                    CandidatePattern::FirstLast,
                ));
            }
        }

        // 2. First M. Last
        for m in INITIAL_NAME_RE.find_iter(text) {
            found.push(NameCandidate::new(
                m.as_str(),
                m.start(),
                page_id,
                CandidatePattern::FirstInitialLast,
            ));
        }

        // 3. Single tokens with a person cue, unless already inside a longer
        //    span. "Thanks James" does not count as a longer span.
        for token in &tokens {
            let covered = found.iter().any(|c: &NameCandidate| {
                c.offset <= token.start
                    && token.end <= c.end()
                    && self.lexicon.exclusion_hit(&c.text).is_none()
            });
            if covered {
                continue;
            }
            if self.has_person_cue(text, token) {
                found.push(NameCandidate::new(
                    &text[token.start..token.end],
                    token.start,
                    page_id,
                    CandidatePattern::ContextualSingle,
                ));
            }
        }

        let candidates = dedup(found);
        debug!(
            page_id = page_id,
            candidates = candidates.len(),
            "Candidate scan complete"
        );
        candidates
    }

    fn has_person_cue(&self, text: &str, token: &Token) -> bool {
        let before = slice(text, token.start.saturating_sub(self.cue_window), token.start);
        let after = slice(text, token.end, token.end + self.cue_window);

        if SALUTATION_RE.is_match(before) || REVIEW_FOLLOW_RE.is_match(after) {
            return true;
        }

        let title_before = POSSESSIVE_PREFIX_RE
            .captures(before)
            .and_then(|c| c.get(1))
            .is_some_and(|w| self.lexicon.is_title_word(w.as_str()));
        let title_after = TITLE_FOLLOW_RE
            .captures(after)
            .and_then(|c| c.get(1))
            .is_some_and(|w| self.lexicon.is_title_word(w.as_str()));

        title_before || title_after
    }
}

/// Collapse repeats of the same text at approximately the same position,
/// keeping the higher-priority pattern. Repeats elsewhere on the page stay.
fn dedup(mut found: Vec<NameCandidate>) -> Vec<NameCandidate> {
    found.sort_by(|a, b| a.offset.cmp(&b.offset).then(a.pattern.cmp(&b.pattern)));

    let mut kept: Vec<NameCandidate> = Vec::with_capacity(found.len());
    for candidate in found {
        let key = candidate.text.to_lowercase();
        let duplicate = kept.iter_mut().find(|k| {
            k.text.to_lowercase() == key && k.offset.abs_diff(candidate.offset) <= DEDUP_TOLERANCE
        });
        match duplicate {
            Some(existing) if candidate.pattern < existing.pattern => *existing = candidate,
            Some(_) => {}
            None => kept.push(candidate),
        }
    }
    kept.sort_by_key(|c| c.offset);
    kept
}
