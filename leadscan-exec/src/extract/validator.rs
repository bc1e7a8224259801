// Human-Name Validator
//
// Accepts or rejects candidates with a named, ordered rule list. Every rule
// contributes a signed weight and leaves a reason in the trace, so a rejected
// candidate always says which checks it failed.
//
// Flow per candidate:
// 1. Exclusion terms reject outright (confidence 0)
// 2. Ordered scoring rules (lexicons, shape, context, service/location penalty)
// 3. Single tokens try surname completion from email local parts, then rescore
// 4. Threshold decides acceptance

use crate::extract::window::window_around_span;
use crate::lexicon::{display_surname, Lexicon};
use crate::types::{
    CandidatePattern, NameCandidate, RejectedCandidate, ReasonCode, ValidatedName, Validation,
    ValidationReason,
};
use leadscan_common::config::{ScoringWeights, ValidatorConfig};
use std::sync::Arc;
use tracing::{debug, warn};

/// Version of the scoring rule set; bump when rule order or semantics change
pub const RULESET_VERSION: u32 = 1;

/// Scoring rules, evaluated in `ScoringRule::ORDERED` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringRule {
    FirstNameLexicon,
    SurnameLexicon,
    TitleCase,
    WordCount,
    CleanCharacters,
    ContextCue,
    ServiceLocationPenalty,
}

impl ScoringRule {
    pub const ORDERED: [ScoringRule; 7] = [
        ScoringRule::FirstNameLexicon,
        ScoringRule::SurnameLexicon,
        ScoringRule::TitleCase,
        ScoringRule::WordCount,
        ScoringRule::CleanCharacters,
        ScoringRule::ContextCue,
        ScoringRule::ServiceLocationPenalty,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::FirstNameLexicon => "first_name_lexicon",
            Self::SurnameLexicon => "surname_lexicon",
            Self::TitleCase => "title_case",
            Self::WordCount => "word_count",
            Self::CleanCharacters => "clean_characters",
            Self::ContextCue => "context_cue",
            Self::ServiceLocationPenalty => "service_location_penalty",
        }
    }

    fn code(self) -> ReasonCode {
        match self {
            Self::FirstNameLexicon => ReasonCode::FirstNameLexicon,
            Self::SurnameLexicon => ReasonCode::SurnameLexicon,
            Self::TitleCase => ReasonCode::TitleCase,
            Self::WordCount => ReasonCode::WordCount,
            Self::CleanCharacters => ReasonCode::CleanCharacters,
            Self::ContextCue => ReasonCode::ContextCue,
            Self::ServiceLocationPenalty => ReasonCode::ServiceLocationTerm,
        }
    }

    fn weight(self, weights: &ScoringWeights) -> f64 {
        match self {
            Self::FirstNameLexicon => weights.first_name,
            Self::SurnameLexicon => weights.surname,
            Self::TitleCase => weights.title_case,
            Self::WordCount => weights.word_count,
            Self::CleanCharacters => weights.clean_characters,
            Self::ContextCue => weights.context_cue,
            Self::ServiceLocationPenalty => weights.service_location_penalty,
        }
    }

    fn evaluate(self, input: &RuleInput<'_>, lexicon: &Lexicon, weights: &ScoringWeights) -> RuleOutcome {
        let weight = self.weight(weights);
        let first = input.tokens.first().copied().unwrap_or_default();
        let last = input.tokens.last().copied().unwrap_or_default();

        let (fired, delta, detail) = match self {
            Self::FirstNameLexicon => {
                let hit = lexicon.is_first_name(first);
                (hit, weight, format!("first token '{}' {}in first-name lexicon", first, not(hit)))
            }
            Self::SurnameLexicon => {
                let hit = input.tokens.len() > 1 && lexicon.is_surname(last);
                (hit, weight, format!("last token '{}' {}in surname lexicon", last, not(hit)))
            }
            Self::TitleCase => {
                let hit = input.tokens.iter().all(|t| is_title_cased(t));
                (hit, weight, format!("title case {}", if hit { "holds" } else { "broken" }))
            }
            Self::WordCount => {
                let (min, max) = input.pattern.expected_words();
                let count = input.tokens.len();
                let hit = (min..=max).contains(&count);
                (hit, weight, format!("{} words, expected {}-{}", count, min, max))
            }
            Self::CleanCharacters => {
                let hit = input.tokens.iter().all(|t| has_clean_characters(t));
                (hit, weight, format!("characters {}", if hit { "clean" } else { "contain digits or symbols" }))
            }
            Self::ContextCue => match context_cue(input.context, lexicon) {
                Some(cue) => (true, weight, format!("context cue '{}' nearby", cue)),
                None => (false, weight, "no title or review cue nearby".to_string()),
            },
            Self::ServiceLocationPenalty => {
                let hits: Vec<String> = input
                    .tokens
                    .iter()
                    .flat_map(|t| lexicon.service_location_hits(t))
                    .collect();
                let detail = if hits.is_empty() {
                    "no service or location terms".to_string()
                } else {
                    format!("service/location terms: {}", hits.join(", "))
                };
                (!hits.is_empty(), -weight * hits.len() as f64, detail)
            }
        };

        RuleOutcome {
            fired,
            reason: ValidationReason::new(self.code(), if fired { delta } else { 0.0 }, detail),
        }
    }
}

fn not(hit: bool) -> &'static str {
    if hit {
        ""
    } else {
        "not "
    }
}

struct RuleInput<'a> {
    tokens: Vec<&'a str>,
    pattern: CandidatePattern,
    /// Lowercased text around the observed candidate span
    context: &'a str,
}

struct RuleOutcome {
    fired: bool,
    reason: ValidationReason,
}

/// Sum of fired rule deltas plus the full trace
struct Scored {
    score: f64,
    outcomes: Vec<RuleOutcome>,
}

impl Scored {
    fn fired_reasons(&self) -> Vec<ValidationReason> {
        self.outcomes
            .iter()
            .filter(|o| o.fired)
            .map(|o| o.reason.clone())
            .collect()
    }

    fn all_reasons(&self) -> Vec<ValidationReason> {
        self.outcomes.iter().map(|o| o.reason.clone()).collect()
    }
}

/// Surname recovered from an email local part
struct Completion {
    surname: String,
    local_part: String,
}

/// Lexicon and context scorer for name candidates
pub struct NameValidator {
    lexicon: Arc<Lexicon>,
    config: ValidatorConfig,
}

impl NameValidator {
    pub fn new(lexicon: Arc<Lexicon>, config: ValidatorConfig) -> Self {
        debug!(
            ruleset_version = RULESET_VERSION,
            threshold = config.acceptance_threshold,
            "Name validator ready"
        );
        Self { lexicon, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a candidate against the page text it came from
    ///
    /// `local_parts` are the email local parts found anywhere on the page;
    /// they feed surname completion for single-token candidates.
    pub fn validate(&self, candidate: &NameCandidate, text: &str, local_parts: &[String]) -> Validation {
        if let Some(term) = self.lexicon.exclusion_hit(&candidate.text) {
            return reject(
                candidate,
                0.0,
                vec![ValidationReason::new(
                    ReasonCode::Excluded,
                    0.0,
                    format!("contains excluded term '{}'", term),
                )],
            );
        }

        let window = window_around_span(text, candidate.offset, candidate.end(), self.config.context_window);
        let context = window.snippet.to_lowercase();
        let observed = candidate.tokens();

        if candidate.pattern == CandidatePattern::ContextualSingle && observed.len() == 1 {
            return self.validate_single(candidate, observed[0], &context, local_parts);
        }

        let scored = self.score(&observed, candidate.pattern, &context);
        self.decide(candidate, candidate.text.clone(), scored, Vec::new(), None)
    }

    fn validate_single(
        &self,
        candidate: &NameCandidate,
        token: &str,
        context: &str,
        local_parts: &[String],
    ) -> Validation {
        match self.complete_surname(token, local_parts) {
            Some(completion) => {
                let surname = display_surname(&completion.surname);
                let tokens = vec![token, surname.as_str()];
                let scored = self.score(&tokens, candidate.pattern, context);
                let completion_reason = ValidationReason::new(
                    ReasonCode::EmailSurnameCompletion,
                    0.0,
                    format!(
                        "surname '{}' derived from email local part '{}'",
                        surname, completion.local_part
                    ),
                );
                let text = format!("{} {}", token, surname);
                self.decide(candidate, text, scored, vec![completion_reason], Some(surname.clone()))
            }
            None => {
                let scored = self.score(&[token], candidate.pattern, context);
                if self.config.accept_single_token {
                    return self.decide(candidate, token.to_string(), scored, Vec::new(), None);
                }
                let mut reasons = scored.all_reasons();
                reasons.push(ValidationReason::new(
                    ReasonCode::IncompleteSingleToken,
                    0.0,
                    format!("no surname found for single token '{}'", token),
                ));
                reject(candidate, scored.score.clamp(0.0, 1.0), reasons)
            }
        }
    }

    fn score(&self, tokens: &[&str], pattern: CandidatePattern, context: &str) -> Scored {
        let input = RuleInput {
            tokens: tokens.to_vec(),
            pattern,
            context,
        };
        let outcomes: Vec<RuleOutcome> = ScoringRule::ORDERED
            .iter()
            .map(|rule| rule.evaluate(&input, &self.lexicon, &self.config.weights))
            .collect();
        let score = outcomes.iter().filter(|o| o.fired).map(|o| o.reason.delta).sum();
        Scored { score, outcomes }
    }

    fn decide(
        &self,
        candidate: &NameCandidate,
        text: String,
        scored: Scored,
        extra: Vec<ValidationReason>,
        derived_surname: Option<String>,
    ) -> Validation {
        let confidence = scored.score.clamp(0.0, 1.0);

        if confidence < self.config.acceptance_threshold {
            let mut reasons = scored.all_reasons();
            reasons.extend(extra);
            reasons.push(ValidationReason::new(
                ReasonCode::BelowThreshold,
                0.0,
                format!(
                    "score {:.2} below threshold {:.2}",
                    confidence, self.config.acceptance_threshold
                ),
            ));
            return reject(candidate, confidence, reasons);
        }

        let mut reasons = scored.fired_reasons();
        reasons.extend(extra);
        match ValidatedName::new(candidate.clone(), text, confidence, reasons, derived_surname) {
            Ok(name) => {
                debug!(
                    name = %name.text,
                    offset = candidate.offset,
                    confidence = name.confidence,
                    "Accepted name candidate"
                );
                Validation::Accepted(name)
            }
            Err(e) => {
                warn!(candidate = %candidate.text, error = %e, "Discarding candidate");
                reject(candidate, 0.0, Vec::new())
            }
        }
    }

    /// Find a surname for a bare first name among the page's email local parts
    ///
    /// The local part must plausibly belong to the same person: the text
    /// before the surname is empty, the first name, or a short run of
    /// initials starting with the first initial ("jn" in "jnmcmanus").
    fn complete_surname(&self, token: &str, local_parts: &[String]) -> Option<Completion> {
        let first = token.to_lowercase();
        let canonical = self.lexicon.canonical_first_name(token);
        let initial = first.chars().next()?;

        local_parts.iter().find_map(|local| {
            if self.lexicon.is_generic_mailbox(local) {
                return None;
            }
            let folded: String = local
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect();
            let (surname, index) = self.lexicon.longest_surname_in(&folded)?;
            if surname == first {
                return None;
            }
            let prefix = &folded[..index];
            let suffix = &folded[index + surname.len()..];
            let plausible_prefix = prefix.is_empty()
                || prefix == first
                || prefix == canonical
                || (prefix.len() <= 3 && prefix.starts_with(initial));
            (plausible_prefix && suffix.is_empty()).then(|| Completion {
                surname,
                local_part: local.clone(),
            })
        })
    }
}

fn reject(candidate: &NameCandidate, confidence: f64, reasons: Vec<ValidationReason>) -> Validation {
    Validation::Rejected(RejectedCandidate {
        candidate: candidate.clone(),
        confidence,
        reasons,
    })
}

/// "James", "McManus", "O'Neill", "Smith-Jones", "N."
fn is_title_cased(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    if rest.is_empty() || rest == ['.'] {
        return true;
    }
    rest.iter().any(|c| c.is_lowercase())
}

fn has_clean_characters(token: &str) -> bool {
    let trimmed = token.strip_suffix('.').unwrap_or(token);
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '’' | '-'))
}

/// First title keyword or review word in the context
fn context_cue(context: &str, lexicon: &Lexicon) -> Option<String> {
    if let Some((keyword, _)) = lexicon.title_tier(context) {
        return Some(keyword.to_string());
    }
    context
        .split(|c: char| !c.is_alphabetic())
        .find(|w| !w.is_empty() && lexicon.is_review_cue(w))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> NameValidator {
        NameValidator::new(Arc::new(Lexicon::builtin()), ValidatorConfig::default())
    }

    fn candidate(text: &str, page: &str, pattern: CandidatePattern) -> NameCandidate {
        let offset = page.find(text).unwrap();
        NameCandidate::new(text, offset, "p1", pattern)
    }

    fn has_reason(validation: &Validation, code: ReasonCode) -> bool {
        validation.reasons().iter().any(|r| r.code == code)
    }

    #[test]
    fn test_known_first_and_surname_accepted() {
        let page = "Founded by Andrew Riley in 1998.";
        let result = validator().validate(&candidate("Andrew Riley", page, CandidatePattern::FirstLast), page, &[]);
        assert!(result.is_accepted());
        assert!((result.confidence() - 0.85).abs() < 1e-9);
        assert!(has_reason(&result, ReasonCode::FirstNameLexicon));
        assert!(has_reason(&result, ReasonCode::SurnameLexicon));
    }

    #[test]
    fn test_surname_plus_service_term_rejected() {
        let page = "Andrew Riley Heating Ltd";
        let result = validator().validate(&candidate("Riley Heating", page, CandidatePattern::FirstLast), page, &[]);
        assert!(!result.is_accepted());
        assert_eq!(result.confidence(), 0.0);
        assert!(result
            .reasons()
            .iter()
            .any(|r| r.code == ReasonCode::ServiceLocationTerm && r.delta < 0.0));
        assert!(has_reason(&result, ReasonCode::BelowThreshold));
    }

    #[test]
    fn test_excluded_term_rejects_with_zero() {
        let page = "Privacy Policy";
        let result = validator().validate(&candidate("Privacy Policy", page, CandidatePattern::FirstLast), page, &[]);
        assert!(!result.is_accepted());
        assert_eq!(result.confidence(), 0.0);
        assert_eq!(result.reasons()[0].code, ReasonCode::Excluded);
    }

    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    #[test]
    fn test_every_builtin_first_and_surname_pair_accepted() {
        use crate::lexicon::builtin::{FIRST_NAMES, SURNAMES};

        let validator = validator();
        for first in FIRST_NAMES {
            for surname in SURNAMES {
                let name = format!("{} {}", capitalize(first), display_surname(surname));
                let page = format!("Founded by {} in 1998.", name);
                let result = validator.validate(&candidate(&name, &page, CandidatePattern::FirstLast), &page, &[]);
                assert!(result.is_accepted(), "{} rejected: {:?}", name, result.reasons());
                assert!(result.confidence() >= 0.85 - 1e-9, "{} scored {}", name, result.confidence());
            }
        }
    }

    #[test]
    fn test_builtin_exclusions_reject_with_zero() {
        use crate::lexicon::builtin::EXCLUSIONS;

        let validator = validator();
        for term in EXCLUSIONS.iter().step_by(4).chain(["privacy", "cookies", "ltd", "trustpilot"].iter()) {
            let text = format!("James {}", capitalize(term));
            let page = format!("{} and more.", text);
            let result = validator.validate(&candidate(&text, &page, CandidatePattern::FirstLast), &page, &[]);
            assert!(!result.is_accepted(), "{} accepted", text);
            assert_eq!(result.confidence(), 0.0, "{}", text);
            assert_eq!(result.reasons()[0].code, ReasonCode::Excluded, "{}", text);
        }
    }

    #[test]
    fn test_rejection_lists_failed_rules() {
        let page = "Zara Quill";
        let result = validator().validate(&candidate("Zara Quill", page, CandidatePattern::FirstLast), page, &[]);
        assert!(!result.is_accepted());
        let first_name = result
            .reasons()
            .iter()
            .find(|r| r.code == ReasonCode::FirstNameLexicon)
            .unwrap();
        assert_eq!(first_name.delta, 0.0);
        assert!(first_name.detail.contains("not in"));
    }

    #[test]
    fn test_single_token_completed_from_email() {
        let page = "Thank you James, great work. Email jnmcmanus@example.co.uk";
        let locals = vec!["jnmcmanus".to_string()];
        let result = validator().validate(&candidate("James", page, CandidatePattern::ContextualSingle), page, &locals);
        let name = result.accepted().unwrap();
        assert_eq!(name.text, "James McManus");
        assert_eq!(name.derived_surname.as_deref(), Some("McManus"));
        assert!(name
            .reasons
            .iter()
            .any(|r| r.code == ReasonCode::EmailSurnameCompletion && r.detail.contains("jnmcmanus")));
    }

    #[test]
    fn test_single_token_without_completion_rejected() {
        let page = "Thank you James, great work.";
        let result = validator().validate(&candidate("James", page, CandidatePattern::ContextualSingle), page, &[]);
        assert!(!result.is_accepted());
        assert!(has_reason(&result, ReasonCode::IncompleteSingleToken));
    }

    #[test]
    fn test_single_token_accepted_when_configured() {
        let config = ValidatorConfig {
            accept_single_token: true,
            acceptance_threshold: 0.5,
            ..ValidatorConfig::default()
        };
        let validator = NameValidator::new(Arc::new(Lexicon::builtin()), config);
        let page = "Thank you James, very helpful.";
        let result = validator.validate(&candidate("James", page, CandidatePattern::ContextualSingle), page, &[]);
        assert_eq!(result.accepted().unwrap().text, "James");
    }

    #[test]
    fn test_generic_mailbox_never_completes() {
        let page = "Thanks James! info@smithplumbing.co.uk";
        let locals = vec!["info".to_string(), "sales".to_string()];
        let result = validator().validate(&candidate("James", page, CandidatePattern::ContextualSingle), page, &locals);
        assert!(!result.is_accepted());
    }

    #[test]
    fn test_unrelated_local_part_prefix_does_not_complete() {
        let locals = vec!["bookingsmith".to_string(), "xyzjones".to_string()];
        assert!(validator().complete_surname("James", &locals).is_none());
        let locals = vec!["james.smith".to_string()];
        assert_eq!(validator().complete_surname("James", &locals).unwrap().surname, "smith");
    }

    #[test]
    fn test_title_case_shapes() {
        assert!(is_title_cased("McManus"));
        assert!(is_title_cased("O'Neill"));
        assert!(is_title_cased("N."));
        assert!(!is_title_cased("SMITH"));
        assert!(!is_title_cased("smith"));
    }

    #[test]
    fn test_ruleset_order_is_stable() {
        let ids: Vec<&str> = ScoringRule::ORDERED.iter().map(|r| r.id()).collect();
        assert_eq!(ids[0], "first_name_lexicon");
        assert_eq!(ids[6], "service_location_penalty");
    }
}
