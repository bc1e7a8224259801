// Contact Attributor
//
// Links page-wide contact tokens to validated people.
//
// Resolution per contact kind:
// 1. One distinct value of the kind and one person on the page:
//    sole-contact rule, regardless of distance; the nearest copy is kept
// 2. Otherwise the token goes to the closest person whose window holds it;
//    equal distances go to the person mentioned first
// 3. An email local part or profile slug that names exactly one competitor
//    (surname or initials) overrides proximity
//
// A token is attributed to at most one person; each person keeps the best
// token per kind.

use crate::canonical::{fold_text, normalize_value, person_key, profile_slug};
use crate::extract::window::window_around_span;
use crate::lexicon::Lexicon;
use crate::types::{
    AttributedContact, Attribution, AttributionMethod, Confidence, ContactKind, ContactToken,
    TokenQuality, ValidatedName,
};
use leadscan_common::config::AttributionConfig;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Validated mentions of one person on one page
#[derive(Debug, Clone)]
struct Person {
    key: String,
    display: String,
    confidence: Confidence,
    first_offset: usize,
    spans: Vec<(usize, usize)>,
    first: String,
    last: String,
    initials: String,
}

impl Person {
    /// Gap between the token and the nearest mention (0 if overlapping)
    fn distance_to(&self, token: &ContactToken) -> usize {
        self.spans
            .iter()
            .map(|&(start, end)| span_gap(start, end, token.offset, token.end()))
            .min()
            .unwrap_or(usize::MAX)
    }
}

fn span_gap(start: usize, end: usize, token_start: usize, token_end: usize) -> usize {
    if token_start >= end {
        token_start - end
    } else if token_end <= start {
        start - token_end
    } else {
        0
    }
}

/// Winner of one token
struct Resolution {
    person: usize,
    method: AttributionMethod,
    proximity: f64,
    local_match: bool,
    distance: usize,
}

pub struct ContactAttributor {
    lexicon: Arc<Lexicon>,
    config: AttributionConfig,
}

impl ContactAttributor {
    pub fn new(lexicon: Arc<Lexicon>, config: AttributionConfig) -> Self {
        Self { lexicon, config }
    }

    /// Attribute page-wide tokens to the page's validated names
    ///
    /// Returns one entry per distinct person in order of first mention, with
    /// unattributed slots left empty.
    pub fn attribute(&self, names: &[ValidatedName], text: &str, tokens: &[ContactToken]) -> Vec<AttributedContact> {
        let people = self.group_people(names);
        let mut contacts: Vec<AttributedContact> = people
            .iter()
            .map(|p| AttributedContact::new(p.display.clone(), p.key.clone()))
            .collect();

        if people.is_empty() {
            return contacts;
        }

        for kind in [ContactKind::Email, ContactKind::Phone, ContactKind::ProfileUrl] {
            let of_kind: Vec<&ContactToken> = tokens.iter().filter(|t| t.kind == kind).collect();
            // Repeats of one value (header and footer) still make it the sole contact
            let distinct: BTreeSet<String> = of_kind
                .iter()
                .map(|t| normalize_value(kind.into(), &t.value))
                .collect();
            let sole = distinct.len() == 1 && people.len() == 1;

            for token in of_kind {
                let resolution = if sole {
                    Some(self.resolve_sole(&people[0], text, token))
                } else {
                    self.resolve(&people, text, token)
                };
                let Some(resolution) = resolution else {
                    debug!(value = %token.value, "Contact token left unattributed");
                    continue;
                };

                let confidence = self.confidence(token.quality, resolution.proximity, resolution.local_match);
                let attribution = Attribution {
                    value: token.value.clone(),
                    method: resolution.method,
                    confidence,
                    distance: resolution.distance,
                };
                let slot = contacts[resolution.person].slot_mut(kind);
                let better = slot.as_ref().map_or(true, |current| {
                    attribution.confidence > current.confidence
                        || (attribution.confidence == current.confidence && attribution.distance < current.distance)
                });
                if better {
                    debug!(
                        person = %people[resolution.person].display,
                        value = %token.value,
                        method = ?resolution.method,
                        confidence = confidence,
                        "Attributed contact token"
                    );
                    *slot = Some(attribution);
                }
            }
        }

        contacts
    }

    fn group_people(&self, names: &[ValidatedName]) -> Vec<Person> {
        let mut grouped: BTreeMap<String, Person> = BTreeMap::new();
        for name in names {
            let key = person_key(&self.lexicon, &name.text);
            let span = (name.offset(), name.end());
            match grouped.get_mut(&key) {
                Some(person) => {
                    person.spans.push(span);
                    person.first_offset = person.first_offset.min(name.offset());
                    let prefer = name.confidence > person.confidence
                        || (name.confidence == person.confidence && name.text.len() > person.display.len());
                    if prefer {
                        person.display = name.text.clone();
                        person.confidence = name.confidence;
                    }
                }
                None => {
                    let words: Vec<String> = fold_text(&name.text)
                        .split_whitespace()
                        .map(|w| w.chars().filter(|c| c.is_ascii_alphabetic()).collect::<String>())
                        .filter(|w| !w.is_empty())
                        .collect();
                    let initials = words.iter().filter_map(|w| w.chars().next()).collect();
                    grouped.insert(
                        key.clone(),
                        Person {
                            key,
                            display: name.text.clone(),
                            confidence: name.confidence,
                            first_offset: name.offset(),
                            spans: vec![span],
                            first: words.first().cloned().unwrap_or_default(),
                            last: words.last().cloned().unwrap_or_default(),
                            initials,
                        },
                    );
                }
            }
        }

        let mut people: Vec<Person> = grouped.into_values().collect();
        people.sort_by_key(|p| p.first_offset);
        people
    }

    fn resolve_sole(&self, person: &Person, text: &str, token: &ContactToken) -> Resolution {
        let distance = person.distance_to(token);
        let proximity = if self.in_window(person, text, token) {
            self.proximity_factor(distance).max(self.config.sole_contact_factor)
        } else {
            self.config.sole_contact_factor
        };
        Resolution {
            person: 0,
            method: AttributionMethod::SoleContact,
            proximity,
            local_match: self.encodes_person(token, person),
            distance,
        }
    }

    fn resolve(&self, people: &[Person], text: &str, token: &ContactToken) -> Option<Resolution> {
        let in_window: Vec<usize> = (0..people.len())
            .filter(|&i| self.in_window(&people[i], text, token))
            .collect();

        let matching_in_window: Vec<usize> = in_window
            .iter()
            .copied()
            .filter(|&i| self.encodes_person(token, &people[i]))
            .collect();
        if matching_in_window.len() == 1 {
            let person = matching_in_window[0];
            let distance = people[person].distance_to(token);
            return Some(Resolution {
                person,
                method: AttributionMethod::LocalPartMatch,
                proximity: self.proximity_factor(distance),
                local_match: true,
                distance,
            });
        }

        if !in_window.is_empty() {
            // Closest wins; on equal distance the earlier-mentioned person
            let person = in_window
                .iter()
                .copied()
                .min_by_key(|&i| (people[i].distance_to(token), people[i].first_offset))?;
            let distance = people[person].distance_to(token);
            return Some(Resolution {
                person,
                method: AttributionMethod::Proximity,
                proximity: self.proximity_factor(distance),
                local_match: self.encodes_person(token, &people[person]),
                distance,
            });
        }

        // Out of every window: only an unambiguous local-part match attributes
        let matching: Vec<usize> = (0..people.len())
            .filter(|&i| self.encodes_person(token, &people[i]))
            .collect();
        if let [person] = matching[..] {
            return Some(Resolution {
                person,
                method: AttributionMethod::LocalPartMatch,
                proximity: self.config.min_proximity_factor,
                local_match: true,
                distance: people[person].distance_to(token),
            });
        }
        None
    }

    fn in_window(&self, person: &Person, text: &str, token: &ContactToken) -> bool {
        person.spans.iter().any(|&(start, end)| {
            let window = window_around_span(text, start, end, self.config.radius);
            window.contains(token.offset) || (token.end() > window.start && token.offset < window.end)
        })
    }

    fn proximity_factor(&self, distance: usize) -> f64 {
        let radius = self.config.radius.max(1) as f64;
        (1.0 - distance as f64 / radius).max(self.config.min_proximity_factor)
    }

    fn quality_factor(&self, quality: TokenQuality) -> f64 {
        match quality {
            TokenQuality::PersonalEmail => self.config.personal_email_quality,
            TokenQuality::GenericEmail => self.config.generic_email_quality,
            TokenQuality::ProfileUrl => self.config.profile_url_quality,
            TokenQuality::FreeTextPhone => self.config.free_text_phone_quality,
            TokenQuality::ContactBlockPhone => self.config.contact_block_phone_quality,
        }
    }

    fn confidence(&self, quality: TokenQuality, proximity: f64, local_match: bool) -> Confidence {
        let bonus = if local_match { self.config.local_part_bonus } else { 0.0 };
        (proximity * self.quality_factor(quality) + bonus).clamp(0.0, 1.0)
    }

    /// Whether an email local part or profile slug names this person
    fn encodes_person(&self, token: &ContactToken, person: &Person) -> bool {
        let code: String = match token.kind {
            ContactKind::Email => match token.local_part() {
                Some(local) if !self.lexicon.is_generic_mailbox(&local) => {
                    local.chars().filter(|c| c.is_ascii_alphabetic()).collect()
                }
                _ => return false,
            },
            ContactKind::ProfileUrl => profile_slug(&token.value),
            ContactKind::Phone => return false,
        };
        if code.is_empty() {
            return false;
        }
        (person.last.len() >= 3 && code.contains(&person.last))
            || (person.initials.len() >= 2 && code == person.initials)
            || (person.first.len() >= 3 && code == person.first)
    }
}
