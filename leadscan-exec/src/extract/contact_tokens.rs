// Contact token scanner
//
// Finds every email, UK phone number and professional-profile URL on a page
// and grades it. Grading drives attribution confidence: a personal mailbox
// beats "info@", a number written in running text beats the one in the
// footer contact block.

use crate::canonical::normalize_phone;
use crate::extract::window::slice;
use crate::lexicon::Lexicon;
use crate::types::{ContactKind, ContactToken, TokenQuality};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b[a-z0-9][a-z0-9._%+-]*@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}\b",
    )
    .expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+44\s?(?:\(0\)\s?)?|\(?\b0)\d{2,4}\)?[\s-]?\d{3,4}[\s-]?\d{3,4}")
        .expect("phone pattern is valid")
});

static PROFILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[a-z0-9_%-]+/?")
        .expect("profile pattern is valid")
});

/// Labels that mark a company contact block rather than a person
const CONTACT_BLOCK_CUES: &[&str] = &[
    "call us", "tel:", "tel.", "telephone:", "phone:", "t:", "contact us", "office:",
    "enquiries", "freephone", "head office",
];

/// How far back to look for a contact-block label
const BLOCK_CUE_LOOKBEHIND: usize = 20;

pub struct ContactTokenScanner {
    lexicon: Arc<Lexicon>,
}

impl ContactTokenScanner {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// All contact tokens on the page, ordered by offset
    pub fn scan(&self, text: &str) -> Vec<ContactToken> {
        let mut tokens = Vec::new();

        for m in EMAIL_RE.find_iter(text) {
            let local = m.as_str().split('@').next().unwrap_or_default();
            let quality = if self.lexicon.is_generic_mailbox(local) {
                TokenQuality::GenericEmail
            } else {
                TokenQuality::PersonalEmail
            };
            tokens.push(ContactToken::new(ContactKind::Email, m.as_str(), m.start(), quality));
        }

        for m in PHONE_RE.find_iter(text) {
            // Reject runs that continue into more digits
            if text[m.end()..].starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }
            if normalize_phone(m.as_str()).is_none() {
                continue;
            }
            let before = slice(text, m.start().saturating_sub(BLOCK_CUE_LOOKBEHIND), m.start()).to_lowercase();
            let quality = if CONTACT_BLOCK_CUES.iter().any(|cue| before.contains(cue)) {
                TokenQuality::ContactBlockPhone
            } else {
                TokenQuality::FreeTextPhone
            };
            tokens.push(ContactToken::new(ContactKind::Phone, m.as_str(), m.start(), quality));
        }

        for m in PROFILE_RE.find_iter(text) {
            tokens.push(ContactToken::new(
                ContactKind::ProfileUrl,
                m.as_str(),
                m.start(),
                TokenQuality::ProfileUrl,
            ));
        }

        tokens.sort_by_key(|t| t.offset);
        debug!(tokens = tokens.len(), "Contact token scan complete");
        tokens
    }
}

/// Email local parts, in document order
pub fn email_local_parts(tokens: &[ContactToken]) -> Vec<String> {
    tokens.iter().filter_map(ContactToken::local_part).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> ContactTokenScanner {
        ContactTokenScanner::new(Arc::new(Lexicon::builtin()))
    }

    #[test]
    fn test_emails_graded() {
        let tokens = scanner().scan("Write to admin@andrewrileyheating.co.uk or jnmcmanus@example.co.uk.");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, "admin@andrewrileyheating.co.uk");
        assert_eq!(tokens[0].quality, TokenQuality::GenericEmail);
        assert_eq!(tokens[1].value, "jnmcmanus@example.co.uk");
        assert_eq!(tokens[1].quality, TokenQuality::PersonalEmail);
        assert_eq!(email_local_parts(&tokens), vec!["admin", "jnmcmanus"]);
    }

    #[test]
    fn test_phone_formats() {
        let text = "Mobile 07700 900123. Landline (01234) 567890. Intl +44 20 7946 0958";
        let phones: Vec<String> = scanner()
            .scan(text)
            .into_iter()
            .filter(|t| t.kind == ContactKind::Phone)
            .map(|t| t.value)
            .collect();
        assert_eq!(phones, vec!["07700 900123", "(01234) 567890", "+44 20 7946 0958"]);
    }

    #[test]
    fn test_contact_block_phone_graded_lower() {
        let tokens = scanner().scan("Call us: 01234 567890. Our engineer Sam is on 07700 900123");
        assert_eq!(tokens[0].quality, TokenQuality::ContactBlockPhone);
        assert_eq!(tokens[1].quality, TokenQuality::FreeTextPhone);
    }

    #[test]
    fn test_long_digit_runs_are_not_phones() {
        let tokens = scanner().scan("Order ref 0123456789012345");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_profile_urls() {
        let tokens = scanner().scan("Connect: https://www.linkedin.com/in/andrew-riley/ today");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, ContactKind::ProfileUrl);
        assert_eq!(tokens[0].value, "https://www.linkedin.com/in/andrew-riley/");
    }
}
