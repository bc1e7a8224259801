// Shared Types and Data Contracts
//
// Explicit contracts between the three tiers:
// - Tier 1 (extract): NameCandidate → ValidatedName → AttributedContact → ValidationSource
// - Tier 2 (fusion): ValidationSource bundles → ExecutiveRecord
// - Tier 3 (validation): quality score and recommended action on each record
//
// Offsets are byte offsets into the page text they were produced from.

use crate::error::{ExecError, ExecResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Confidence score (0.0-1.0)
pub type Confidence = f64;

// ============================================================================
// Tier 1: Candidates and validation
// ============================================================================

/// Surface pattern that produced a candidate, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePattern {
    /// "First Last"
    FirstLast,
    /// "First M. Last"
    FirstInitialLast,
    /// Single capitalized token next to a person cue, pending completion
    ContextualSingle,
}

impl CandidatePattern {
    /// Stable identifier used in diagnostics
    pub fn id(self) -> &'static str {
        match self {
            Self::FirstLast => "first_last",
            Self::FirstInitialLast => "first_initial_last",
            Self::ContextualSingle => "contextual_single",
        }
    }

    /// Word counts expected for this pattern (inclusive)
    ///
    /// Single tokens may grow to two words through surname completion.
    pub fn expected_words(self) -> (usize, usize) {
        match self {
            Self::FirstLast => (2, 2),
            Self::FirstInitialLast => (3, 3),
            Self::ContextualSingle => (1, 2),
        }
    }
}

/// Unvalidated, name-shaped text span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCandidate {
    pub text: String,
    pub offset: usize,
    pub page_id: String,
    pub pattern: CandidatePattern,
}

impl NameCandidate {
    pub fn new(
        text: impl Into<String>,
        offset: usize,
        page_id: impl Into<String>,
        pattern: CandidatePattern,
    ) -> Self {
        Self {
            text: text.into(),
            offset,
            page_id: page_id.into(),
            pattern,
        }
    }

    /// Byte offset one past the end of the candidate
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Why a candidate gained, lost, or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    Excluded,
    FirstNameLexicon,
    SurnameLexicon,
    TitleCase,
    WordCount,
    CleanCharacters,
    ContextCue,
    ServiceLocationTerm,
    EmailSurnameCompletion,
    IncompleteSingleToken,
    BelowThreshold,
}

/// One entry of a validation trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReason {
    pub code: ReasonCode,
    /// Signed contribution to the score (0.0 for informational reasons)
    pub delta: f64,
    pub detail: String,
}

impl ValidationReason {
    pub fn new(code: ReasonCode, delta: f64, detail: impl Into<String>) -> Self {
        Self {
            code,
            delta,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:+.2}): {}", self.code, self.delta, self.detail)
    }
}

/// Candidate that passed lexicon/context scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedName {
    pub candidate: NameCandidate,
    /// Output surface form (observed text, plus a derived surname if completed)
    pub text: String,
    pub confidence: Confidence,
    pub reasons: Vec<ValidationReason>,
    /// Surname synthesized from an email local part, if any
    pub derived_surname: Option<String>,
}

impl ValidatedName {
    /// Build a validated name; confidence must already be within [0, 1]
    pub fn new(
        candidate: NameCandidate,
        text: impl Into<String>,
        confidence: Confidence,
        reasons: Vec<ValidationReason>,
        derived_surname: Option<String>,
    ) -> ExecResult<Self> {
        check_confidence(confidence)?;
        Ok(Self {
            candidate,
            text: text.into(),
            confidence,
            reasons,
            derived_surname,
        })
    }

    pub fn offset(&self) -> usize {
        self.candidate.offset
    }

    /// End of the observed span in the page text
    pub fn end(&self) -> usize {
        self.candidate.end()
    }
}

/// Diagnostic trace of a candidate that did not validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    pub candidate: NameCandidate,
    pub confidence: Confidence,
    pub reasons: Vec<ValidationReason>,
}

/// Validator verdict
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Accepted(ValidatedName),
    Rejected(RejectedCandidate),
}

impl Validation {
    pub fn accepted(self) -> Option<ValidatedName> {
        match self {
            Self::Accepted(name) => Some(name),
            Self::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Accepted(name) => name.confidence,
            Self::Rejected(rejected) => rejected.confidence,
        }
    }

    pub fn reasons(&self) -> &[ValidationReason] {
        match self {
            Self::Accepted(name) => &name.reasons,
            Self::Rejected(rejected) => &rejected.reasons,
        }
    }
}

// ============================================================================
// Tier 1: Contact tokens and attribution
// ============================================================================

/// Bounded text window around a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactWindow {
    pub center: usize,
    pub radius: usize,
    pub start: usize,
    pub end: usize,
    pub snippet: String,
}

impl ContactWindow {
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    ProfileUrl,
}

/// Token quality class, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenQuality {
    PersonalEmail,
    GenericEmail,
    ProfileUrl,
    FreeTextPhone,
    ContactBlockPhone,
}

/// Document-wide contact token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactToken {
    pub kind: ContactKind,
    pub value: String,
    pub offset: usize,
    pub quality: TokenQuality,
}

impl ContactToken {
    pub fn new(kind: ContactKind, value: impl Into<String>, offset: usize, quality: TokenQuality) -> Self {
        Self {
            kind,
            value: value.into(),
            offset,
            quality,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.value.len()
    }

    /// Email local part, lowercased; None for non-email tokens
    pub fn local_part(&self) -> Option<String> {
        if self.kind != ContactKind::Email {
            return None;
        }
        self.value.split('@').next().map(|s| s.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionMethod {
    /// Closest validated name inside the contact window
    Proximity,
    /// Only one token of the kind and only one person in the document
    SoleContact,
    /// Email local part or profile slug encodes the person
    LocalPartMatch,
}

/// One contact value linked to a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub value: String,
    pub method: AttributionMethod,
    pub confidence: Confidence,
    /// Gap in bytes between the nearest mention and the token
    pub distance: usize,
}

/// Contact fields linked to one validated person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedContact {
    pub person: String,
    pub person_key: String,
    pub email: Option<Attribution>,
    pub phone: Option<Attribution>,
    pub profile_url: Option<Attribution>,
}

impl AttributedContact {
    pub fn new(person: impl Into<String>, person_key: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            person_key: person_key.into(),
            email: None,
            phone: None,
            profile_url: None,
        }
    }

    pub fn slot(&self, kind: ContactKind) -> Option<&Attribution> {
        match kind {
            ContactKind::Email => self.email.as_ref(),
            ContactKind::Phone => self.phone.as_ref(),
            ContactKind::ProfileUrl => self.profile_url.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: ContactKind) -> &mut Option<Attribution> {
        match kind {
            ContactKind::Email => &mut self.email,
            ContactKind::Phone => &mut self.phone,
            ContactKind::ProfileUrl => &mut self.profile_url,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.profile_url.is_none()
    }
}

// ============================================================================
// Tier 1: Titles
// ============================================================================

/// Coarse organizational authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityTier {
    DecisionMaker,
    Management,
    Staff,
    Unknown,
}

impl SeniorityTier {
    /// Scalar weight for downstream prioritization
    pub fn decision_weight(self) -> f64 {
        match self {
            Self::DecisionMaker => 1.0,
            Self::Management => 0.6,
            Self::Staff => 0.3,
            Self::Unknown => 0.1,
        }
    }
}

impl fmt::Display for SeniorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecisionMaker => write!(f, "decision-maker"),
            Self::Management => write!(f, "management"),
            Self::Staff => write!(f, "staff"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePattern {
    /// "<Name>, <Title>"
    NameCommaTitle,
    /// "<Title>: <Name>"
    TitleColonName,
    /// "<Name> is/was our/the <Title>"
    NameIsTitle,
}

/// Title phrase and tier found for a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleClassification {
    pub title: Option<String>,
    pub tier: SeniorityTier,
    pub decision_weight: f64,
    pub pattern: Option<TitlePattern>,
    pub confidence: Confidence,
}

impl TitleClassification {
    pub fn unknown() -> Self {
        Self {
            title: None,
            tier: SeniorityTier::Unknown,
            decision_weight: SeniorityTier::Unknown.decision_weight(),
            pattern: None,
            confidence: 0.0,
        }
    }
}

// ============================================================================
// Tier 1 → Tier 2 contract: per-source executive bundles
// ============================================================================

/// Kind of discovery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    SiteContent,
    Registry,
    ProfessionalNetwork,
}

impl SourceType {
    /// Default extraction confidence for this source type
    pub fn default_confidence(self) -> Confidence {
        match self {
            Self::SiteContent => 0.8,
            Self::Registry => 0.9,
            Self::ProfessionalNetwork => 0.75,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SiteContent => write!(f, "site-content"),
            Self::Registry => write!(f, "registry"),
            Self::ProfessionalNetwork => write!(f, "professional-network"),
        }
    }
}

/// Per-person field of an executive record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutiveField {
    Title,
    Email,
    Phone,
    ProfileUrl,
}

impl ExecutiveField {
    pub const ALL: [ExecutiveField; 4] = [
        ExecutiveField::Title,
        ExecutiveField::Email,
        ExecutiveField::Phone,
        ExecutiveField::ProfileUrl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ProfileUrl => "profile_url",
        }
    }
}

impl From<ContactKind> for ExecutiveField {
    fn from(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Email => Self::Email,
            ContactKind::Phone => Self::Phone,
            ContactKind::ProfileUrl => Self::ProfileUrl,
        }
    }
}

/// Field value claimed by one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldClaim {
    pub value: String,
    pub confidence: Confidence,
}

impl FieldClaim {
    pub fn new(value: impl Into<String>, confidence: Confidence) -> ExecResult<Self> {
        check_confidence(confidence)?;
        Ok(Self {
            value: value.into(),
            confidence,
        })
    }
}

/// One person as reported by one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveClaim {
    pub name: String,
    pub name_confidence: Confidence,
    pub fields: BTreeMap<ExecutiveField, FieldClaim>,
}

impl ExecutiveClaim {
    pub fn new(name: impl Into<String>, name_confidence: Confidence) -> ExecResult<Self> {
        check_confidence(name_confidence)?;
        Ok(Self {
            name: name.into(),
            name_confidence,
            fields: BTreeMap::new(),
        })
    }

    /// Builder-style field setter
    pub fn with_field(
        mut self,
        field: ExecutiveField,
        value: impl Into<String>,
        confidence: Confidence,
    ) -> ExecResult<Self> {
        self.fields.insert(field, FieldClaim::new(value, confidence)?);
        Ok(self)
    }

    pub fn field(&self, field: ExecutiveField) -> Option<&FieldClaim> {
        self.fields.get(&field)
    }
}

/// One discovery channel's output for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSource {
    pub source_id: String,
    pub source_type: SourceType,
    /// Company context the claims belong to (name or domain)
    pub company: String,
    /// Extraction confidence of the channel as a whole; caps every claim
    /// it carries when merged
    pub confidence: Confidence,
    pub executives: Vec<ExecutiveClaim>,
    pub observed_at: DateTime<Utc>,
}

impl ValidationSource {
    pub fn new(
        source_id: impl Into<String>,
        source_type: SourceType,
        company: impl Into<String>,
        confidence: Confidence,
    ) -> ExecResult<Self> {
        check_confidence(confidence)?;
        Ok(Self {
            source_id: source_id.into(),
            source_type,
            company: company.into(),
            confidence,
            executives: Vec::new(),
            observed_at: Utc::now(),
        })
    }

    pub fn with_executive(mut self, claim: ExecutiveClaim) -> Self {
        self.executives.push(claim);
        self
    }
}

/// Why a channel contributed nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceReason {
    Timeout,
    DeadlineElapsed,
    Empty,
    Failed(String),
}

/// Channel result as seen by the merge stage
///
/// Absence is neutral: it never counts as evidence against any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceOutcome {
    Present(ValidationSource),
    Absent {
        source_id: String,
        source_type: SourceType,
        reason: AbsenceReason,
    },
}

impl SourceOutcome {
    pub fn source_id(&self) -> &str {
        match self {
            Self::Present(source) => &source.source_id,
            Self::Absent { source_id, .. } => source_id,
        }
    }

    pub fn present(&self) -> Option<&ValidationSource> {
        match self {
            Self::Present(source) => Some(source),
            Self::Absent { .. } => None,
        }
    }
}

// ============================================================================
// Tier 2/3 outputs: merged records
// ============================================================================

/// Which source said what about a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProvenance {
    pub source_id: String,
    pub source_type: SourceType,
    pub value: String,
    pub confidence: Confidence,
}

/// Field value after cross-source fusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedField {
    pub value: String,
    pub confidence: Confidence,
    pub conflicting: bool,
    /// Every source that reported this field, agreeing or not
    pub provenance: Vec<FieldProvenance>,
}

impl MergedField {
    /// A merged value must be backed by at least one source reporting it
    pub fn new(
        value: impl Into<String>,
        confidence: Confidence,
        conflicting: bool,
        provenance: Vec<FieldProvenance>,
    ) -> ExecResult<Self> {
        let value = value.into();
        check_confidence(confidence)?;
        if !value.is_empty() && provenance.is_empty() {
            return Err(ExecError::MissingProvenance(value));
        }
        Ok(Self {
            value,
            confidence,
            conflicting,
            provenance,
        })
    }

    /// Sources whose value was selected
    pub fn supporting_sources(&self) -> Vec<&str> {
        self.provenance
            .iter()
            .filter(|p| p.value == self.value)
            .map(|p| p.source_id.as_str())
            .collect()
    }
}

/// Two sources disagreeing on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConflict {
    pub field: ExecutiveField,
    pub source1: String,
    pub value1: String,
    pub source2: String,
    pub value2: String,
    pub similarity: f64,
}

/// What downstream consumers should do with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Confirmed,
    Probable,
    Conflicting,
    InsufficientEvidence,
}

impl RecommendedAction {
    /// Anything short of confirmed must be reviewed, not exported as fact
    pub fn requires_review(self) -> bool {
        self != Self::Confirmed
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Probable => write!(f, "probable"),
            Self::Conflicting => write!(f, "conflicting"),
            Self::InsufficientEvidence => write!(f, "insufficient-evidence"),
        }
    }
}

/// Merged, externally visible executive record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveRecord {
    /// Canonical person key (case/diacritic/nickname-normalized)
    pub person_key: String,
    pub company: String,
    pub name: MergedField,
    pub title: Option<MergedField>,
    pub seniority: SeniorityTier,
    pub decision_weight: f64,
    pub email: Option<MergedField>,
    pub phone: Option<MergedField>,
    pub profile_url: Option<MergedField>,
    /// Identity confidence of the person
    pub confidence: Confidence,
    pub quality_score: f64,
    pub action: RecommendedAction,
    pub conflicts: Vec<FieldConflict>,
    /// Present sources that contributed to this record
    pub source_ids: Vec<String>,
}

impl ExecutiveRecord {
    pub fn field(&self, field: ExecutiveField) -> Option<&MergedField> {
        match field {
            ExecutiveField::Title => self.title.as_ref(),
            ExecutiveField::Email => self.email.as_ref(),
            ExecutiveField::Phone => self.phone.as_ref(),
            ExecutiveField::ProfileUrl => self.profile_url.as_ref(),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &str {
        &self.name.value
    }

    /// Every populated field is backed by a source listed on the record
    pub fn check_provenance(&self) -> ExecResult<()> {
        let fields = std::iter::once(Some(&self.name))
            .chain(ExecutiveField::ALL.iter().map(|f| self.field(*f)))
            .flatten();
        for field in fields {
            let traced = field
                .provenance
                .iter()
                .any(|p| self.source_ids.contains(&p.source_id));
            if !field.value.is_empty() && !traced {
                return Err(ExecError::MissingProvenance(field.value.clone()));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_confidence(confidence: Confidence) -> ExecResult<()> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(ExecError::InvalidConfidence(confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_name_rejects_out_of_range_confidence() {
        let candidate = NameCandidate::new("Jane Doe", 0, "p1", CandidatePattern::FirstLast);
        assert!(ValidatedName::new(candidate.clone(), "Jane Doe", 1.2, vec![], None).is_err());
        assert!(ValidatedName::new(candidate, "Jane Doe", 1.0, vec![], None).is_ok());
    }

    #[test]
    fn test_merged_field_requires_provenance() {
        let err = MergedField::new("Director", 0.9, false, vec![]).unwrap_err();
        assert!(matches!(err, ExecError::MissingProvenance(_)));
    }

    #[test]
    fn test_decision_weight_ordering() {
        assert!(SeniorityTier::DecisionMaker.decision_weight() > SeniorityTier::Management.decision_weight());
        assert!(SeniorityTier::Management.decision_weight() > SeniorityTier::Staff.decision_weight());
        assert!(SeniorityTier::Staff.decision_weight() > SeniorityTier::Unknown.decision_weight());
    }

    #[test]
    fn test_only_confirmed_skips_review() {
        assert!(!RecommendedAction::Confirmed.requires_review());
        assert!(RecommendedAction::Probable.requires_review());
        assert!(RecommendedAction::Conflicting.requires_review());
        assert!(RecommendedAction::InsufficientEvidence.requires_review());
    }

    #[test]
    fn test_local_part_only_for_email() {
        let email = ContactToken::new(ContactKind::Email, "JSmith@Example.co.uk", 0, TokenQuality::PersonalEmail);
        assert_eq!(email.local_part().as_deref(), Some("jsmith"));
        let phone = ContactToken::new(ContactKind::Phone, "01234 567890", 0, TokenQuality::FreeTextPhone);
        assert!(phone.local_part().is_none());
    }
}
