// Page extractor
//
// Runs tier 1 over one page: candidates → validation → contact tokens →
// attribution → titles, and folds the result into per-person claims for the
// site-content source bundle.

use crate::canonical::person_key;
use crate::error::ExecResult;
use crate::extract::attributor::ContactAttributor;
use crate::extract::candidates::CandidateGenerator;
use crate::extract::contact_tokens::{email_local_parts, ContactTokenScanner};
use crate::extract::title::TitleClassifier;
use crate::extract::validator::NameValidator;
use crate::lexicon::Lexicon;
use crate::types::{
    AttributedContact, Confidence, ContactKind, ContactToken, ExecutiveClaim, ExecutiveField, RejectedCandidate,
    TitleClassification, ValidatedName, Validation,
};
use leadscan_common::ExtractionConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Visible text of one fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_id: String,
    pub text: String,
}

impl PageText {
    pub fn new(page_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            text: text.into(),
        }
    }
}

/// Everything tier 1 found on one page
#[derive(Debug, Clone)]
pub struct PageExtraction {
    pub page_id: String,
    pub names: Vec<ValidatedName>,
    pub tokens: Vec<ContactToken>,
    pub contacts: Vec<AttributedContact>,
    /// Title classification per person key
    pub titles: HashMap<String, TitleClassification>,
    /// One claim per person, carrying title and attributed contacts
    pub claims: Vec<ExecutiveClaim>,
    pub rejections: Vec<RejectedCandidate>,
}

/// Tier 1 pipeline over a single page
pub struct PageExtractor {
    lexicon: Arc<Lexicon>,
    generator: CandidateGenerator,
    validator: NameValidator,
    scanner: ContactTokenScanner,
    attributor: ContactAttributor,
    classifier: TitleClassifier,
}

impl PageExtractor {
    pub fn new(lexicon: Arc<Lexicon>, config: &ExtractionConfig) -> Self {
        Self {
            generator: CandidateGenerator::new(Arc::clone(&lexicon), config.validator.single_token_cue_window),
            validator: NameValidator::new(Arc::clone(&lexicon), config.validator.clone()),
            scanner: ContactTokenScanner::new(Arc::clone(&lexicon)),
            attributor: ContactAttributor::new(Arc::clone(&lexicon), config.attribution.clone()),
            classifier: TitleClassifier::new(Arc::clone(&lexicon), config.title.clone()),
            lexicon,
        }
    }

    pub fn extract(&self, page: &PageText) -> ExecResult<PageExtraction> {
        let text = page.text.as_str();
        let tokens = self.scanner.scan(text);
        let local_parts = email_local_parts(&tokens);

        let mut names = Vec::new();
        let mut rejections = Vec::new();
        for candidate in self.generator.generate(text, &page.page_id) {
            match self.validator.validate(&candidate, text, &local_parts) {
                Validation::Accepted(name) => names.push(name),
                Validation::Rejected(rejected) => rejections.push(rejected),
            }
        }

        let contacts = self.attributor.attribute(&names, text, &tokens);

        // Title from the strongest mention of each person
        let mut titles: HashMap<String, TitleClassification> = HashMap::new();
        let mut name_confidence: HashMap<String, Confidence> = HashMap::new();
        for name in &names {
            let key = person_key(&self.lexicon, &name.text);
            let best = name_confidence.entry(key.clone()).or_insert(0.0);
            *best = best.max(name.confidence);
            let classification = self.classifier.classify(name, text);
            let keep = titles
                .get(&key)
                .map_or(true, |current| classification.confidence > current.confidence);
            if keep {
                titles.insert(key, classification);
            }
        }

        let mut claims = Vec::with_capacity(contacts.len());
        for contact in &contacts {
            let confidence = name_confidence.get(&contact.person_key).copied().unwrap_or(0.0);
            let mut claim = ExecutiveClaim::new(&contact.person, confidence)?;
            if let Some(title) = titles.get(&contact.person_key) {
                if let Some(phrase) = &title.title {
                    claim = claim.with_field(ExecutiveField::Title, phrase, title.confidence)?;
                }
            }
            for kind in [ContactKind::Email, ContactKind::Phone, ContactKind::ProfileUrl] {
                if let Some(attribution) = contact.slot(kind) {
                    claim = claim.with_field(kind.into(), &attribution.value, attribution.confidence)?;
                }
            }
            claims.push(claim);
        }

        info!(
            page_id = %page.page_id,
            accepted = names.len(),
            rejected = rejections.len(),
            people = contacts.len(),
            tokens = tokens.len(),
            "Page extraction complete"
        );
        for rejected in &rejections {
            debug!(
                candidate = %rejected.candidate.text,
                confidence = rejected.confidence,
                "Rejected name candidate"
            );
        }

        Ok(PageExtraction {
            page_id: page.page_id.clone(),
            names,
            tokens,
            contacts,
            titles,
            claims,
            rejections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PageExtractor {
        PageExtractor::new(Arc::new(Lexicon::builtin()), &ExtractionConfig::default())
    }

    #[test]
    fn test_page_claims_carry_title_and_contacts() {
        let page = PageText::new(
            "about",
            "Sarah Jones, Managing Director. Reach Sarah on sarah.jones@joneskitchens.co.uk",
        );
        let extraction = extractor().extract(&page).unwrap();
        let claims = extraction.claims;

        assert_eq!(claims.len(), 1);
        let claim = &claims[0];
        assert_eq!(claim.name, "Sarah Jones");
        assert_eq!(claim.field(ExecutiveField::Title).unwrap().value, "Managing Director");
        assert_eq!(
            claim.field(ExecutiveField::Email).unwrap().value,
            "sarah.jones@joneskitchens.co.uk"
        );
        assert!(claim.name_confidence >= 0.6);
    }

    #[test]
    fn test_rejections_are_kept_for_diagnostics() {
        let page = PageText::new("home", "Andrew Riley Heating Ltd - Privacy Policy");
        let extraction = extractor().extract(&page).unwrap();
        assert!(extraction
            .rejections
            .iter()
            .any(|r| r.candidate.text == "Riley Heating"));
        assert!(extraction
            .rejections
            .iter()
            .any(|r| r.candidate.text == "Privacy Policy"));
    }

    #[test]
    fn test_empty_page() {
        let extraction = extractor().extract(&PageText::new("blank", "")).unwrap();
        assert!(extraction.names.is_empty());
        assert!(extraction.claims.is_empty());
    }
}
