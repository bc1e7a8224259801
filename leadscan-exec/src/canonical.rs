//! Canonical keys and value normalization
//!
//! Person keys decide whether two mentions are the same individual; company
//! keys decide whether two bundles describe the same business. Field values
//! are normalized before agreement checks so formatting noise ("+44 7700..."
//! vs "07700...") is not reported as a conflict.

use crate::lexicon::Lexicon;
use crate::types::ExecutiveField;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Legal-form words dropped from company keys
const LEGAL_SUFFIXES: &[&str] = &[
    "ltd", "limited", "plc", "llp", "lp", "llc", "inc", "co", "company", "group", "uk",
];

/// Domain endings dropped from company keys ("riley.co.uk" → "riley")
const DOMAIN_SUFFIXES: &[&str] = &[".co.uk", ".org.uk", ".ltd.uk", ".uk", ".com", ".net", ".org", ".biz"];

/// Strip diacritics and lowercase: "Zoë" → "zoe"
pub fn fold_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Canonical person key
///
/// Case, diacritics, apostrophes and middle initials are ignored and the
/// first name is mapped through the nickname table, so "Jim McManus",
/// "James N. McManus" and "JAMES MCMANUS" share one key.
pub fn person_key(lexicon: &Lexicon, name: &str) -> String {
    let folded = fold_text(name);
    let words: Vec<String> = folded
        .split(|c: char| c.is_whitespace() || c == '.' || c == ',')
        .map(|w| w.chars().filter(|c| c.is_alphanumeric() || *c == '-').collect::<String>())
        .filter(|w| !w.is_empty())
        .collect();

    let kept: Vec<&String> = if words.len() > 1 {
        words.iter().filter(|w| w.chars().count() > 1).collect()
    } else {
        words.iter().collect()
    };

    kept.iter()
        .enumerate()
        .map(|(i, w)| {
            if i == 0 {
                lexicon.canonical_first_name(w)
            } else {
                (*w).clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical company key
///
/// Names and domains collapse to the same key:
/// "Andrew Riley Heating Ltd" and "www.andrewrileyheating.co.uk" both give
/// "andrewrileyheating".
pub fn company_key(company: &str) -> String {
    let mut folded: String = company.nfkc().collect::<String>();
    folded = fold_text(folded.trim());

    for scheme in ["https://", "http://"] {
        if let Some(rest) = folded.strip_prefix(scheme) {
            folded = rest.to_string();
        }
    }
    if let Some(rest) = folded.strip_prefix("www.") {
        folded = rest.to_string();
    }
    if let Some(host) = folded.split('/').next() {
        if !folded.contains(' ') && host.contains('.') {
            folded = host.to_string();
        }
    }
    for suffix in DOMAIN_SUFFIXES {
        if !folded.contains(' ') {
            if let Some(rest) = folded.strip_suffix(suffix) {
                folded = rest.to_string();
                break;
            }
        }
    }

    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !LEGAL_SUFFIXES.contains(w))
        .collect::<Vec<_>>()
        .concat()
}

/// UK phone digits in national form ("+44 (0)1234 567890" → "01234567890")
///
/// Returns None unless the result is an 11-digit national number.
pub fn normalize_phone(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let national = if value.trim_start().starts_with('+') {
        let rest = digits.strip_prefix("44")?;
        if rest.starts_with('0') {
            rest.to_string()
        } else {
            format!("0{}", rest)
        }
    } else {
        digits
    };

    let valid = national.len() == 11
        && national.starts_with('0')
        && matches!(national.as_bytes()[1], b'1' | b'2' | b'3' | b'7' | b'8');
    valid.then_some(national)
}

/// Profile URL without scheme, "www.", query or trailing slash
pub fn normalize_profile_url(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let no_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let no_www = no_scheme.strip_prefix("www.").unwrap_or(no_scheme);
    let no_query = no_www.split(['?', '#']).next().unwrap_or(no_www);
    no_query.trim_end_matches('/').to_string()
}

/// Last path segment of a profile URL, lowercased letters only
pub fn profile_slug(value: &str) -> String {
    normalize_profile_url(value)
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Comparison form of a field value
pub fn normalize_value(field: ExecutiveField, value: &str) -> String {
    match field {
        ExecutiveField::Email => value.trim().to_lowercase(),
        ExecutiveField::Phone => {
            normalize_phone(value).unwrap_or_else(|| value.chars().filter(|c| c.is_ascii_digit()).collect())
        }
        ExecutiveField::ProfileUrl => normalize_profile_url(value),
        ExecutiveField::Title => fold_text(value)
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}
