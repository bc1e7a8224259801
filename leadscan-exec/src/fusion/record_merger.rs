// Record Merger - Cross-Source Identity Clustering and Fusion
//
// Clusters executive claims from every present source by
// (company key, person key), fuses each field, scores quality and assigns a
// recommended action. Absent sources are set aside before clustering, so
// they neither support nor contradict anything.
//
// A source's own extraction confidence caps every claim it carries: a weak
// channel cannot assert a field more strongly than it is trusted.

use crate::canonical::{company_key, person_key};
use crate::error::ExecResult;
use crate::fusion::field_fuser::{agreement_confidence, fuse_field, FieldValue};
use crate::fusion::quality_scorer::{QualityInputs, QualityScorer};
use crate::lexicon::Lexicon;
use crate::types::{
    AbsenceReason, ExecutiveClaim, ExecutiveField, ExecutiveRecord, FieldProvenance, MergedField,
    SeniorityTier, SourceOutcome, SourceType, ValidationSource,
};
use leadscan_common::config::MergeConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Channel that contributed nothing, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsentSource {
    pub source_id: String,
    pub source_type: SourceType,
    pub reason: AbsenceReason,
}

/// Ranked records plus the channels that were absent
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<ExecutiveRecord>,
    pub absent: Vec<AbsentSource>,
}

/// One source's (deduplicated) claim inside a cluster
struct Contribution<'a> {
    source: &'a ValidationSource,
    order: usize,
    claim: ExecutiveClaim,
}

impl Contribution<'_> {
    /// Claim confidence capped by the source's extraction confidence
    fn capped(&self, confidence: f64) -> f64 {
        confidence.min(self.source.confidence)
    }
}

pub struct RecordMerger {
    lexicon: Arc<Lexicon>,
    config: MergeConfig,
    scorer: QualityScorer,
}

impl RecordMerger {
    pub fn new(lexicon: Arc<Lexicon>, config: MergeConfig) -> Self {
        Self {
            scorer: QualityScorer::new(config.clone()),
            lexicon,
            config,
        }
    }

    /// Merge channel outcomes; absent channels are reported, not merged
    pub fn merge(&self, outcomes: &[SourceOutcome]) -> ExecResult<MergeOutcome> {
        let mut present = Vec::new();
        let mut absent = Vec::new();
        for outcome in outcomes {
            match outcome {
                SourceOutcome::Present(source) => present.push(source.clone()),
                SourceOutcome::Absent {
                    source_id,
                    source_type,
                    reason,
                } => {
                    debug!(source_id = %source_id, reason = ?reason, "Skipping absent source");
                    absent.push(AbsentSource {
                        source_id: source_id.clone(),
                        source_type: *source_type,
                        reason: reason.clone(),
                    });
                }
            }
        }

        let records = self.merge_sources(&present)?;
        Ok(MergeOutcome { records, absent })
    }

    /// Merge present source bundles into ranked executive records
    pub fn merge_sources(&self, sources: &[ValidationSource]) -> ExecResult<Vec<ExecutiveRecord>> {
        let clusters = self.cluster(sources);
        let mut records = Vec::with_capacity(clusters.len());
        for ((_, key), contributions) in &clusters {
            records.push(self.build_record(key, contributions)?);
        }

        rank(&mut records);
        info!(
            sources = sources.len(),
            records = records.len(),
            conflicting = records.iter().filter(|r| !r.conflicts.is_empty()).count(),
            "Merged executive records"
        );
        Ok(records)
    }

    /// Group claims by (company key, person key), one contribution per source
    fn cluster<'a>(&self, sources: &'a [ValidationSource]) -> BTreeMap<(String, String), Vec<Contribution<'a>>> {
        let mut clusters: BTreeMap<(String, String), Vec<Contribution<'a>>> = BTreeMap::new();
        for (order, source) in sources.iter().enumerate() {
            let company = company_key(&source.company);
            for claim in &source.executives {
                let key = (company.clone(), person_key(&self.lexicon, &claim.name));
                let contributions = clusters.entry(key).or_default();
                match contributions.iter_mut().find(|c| c.order == order) {
                    Some(existing) => absorb(&mut existing.claim, claim),
                    None => contributions.push(Contribution {
                        source,
                        order,
                        claim: claim.clone(),
                    }),
                }
            }
        }
        clusters
    }

    fn build_record(&self, key: &str, contributions: &[Contribution<'_>]) -> ExecResult<ExecutiveRecord> {
        let name = self.fuse_name(contributions)?;

        let mut conflicts = Vec::new();
        let mut fields: BTreeMap<ExecutiveField, MergedField> = BTreeMap::new();
        for field in ExecutiveField::ALL {
            let values: Vec<FieldValue<'_>> = contributions
                .iter()
                .filter_map(|c| {
                    c.claim.field(field).map(|claim| FieldValue {
                        source_id: &c.source.source_id,
                        source_type: c.source.source_type,
                        value: &claim.value,
                        confidence: c.capped(claim.confidence),
                        order: c.order,
                    })
                })
                .collect();
            if let Some(fused) = fuse_field(field, &values, self.config.agreement_bonus)? {
                conflicts.extend(fused.conflicts);
                fields.insert(field, fused.field);
            }
        }

        let independent_sources = contributions
            .iter()
            .map(|c| c.source.source_type)
            .collect::<BTreeSet<_>>()
            .len();
        let inputs = QualityInputs {
            populated_fields: fields.len(),
            field_confidences: std::iter::once(name.confidence)
                .chain(fields.values().map(|f| f.confidence))
                .collect(),
            independent_sources,
        };
        let quality_score = self.scorer.score(&inputs);
        let action = self
            .scorer
            .recommend(quality_score, independent_sources, !conflicts.is_empty());

        let title = fields.remove(&ExecutiveField::Title);
        let seniority = title
            .as_ref()
            .and_then(|t| self.lexicon.title_tier(&t.value).map(|(_, tier)| tier))
            .unwrap_or(SeniorityTier::Unknown);

        let mut source_ids: Vec<String> = contributions.iter().map(|c| c.source.source_id.clone()).collect();
        source_ids.dedup();

        let record = ExecutiveRecord {
            person_key: key.to_string(),
            company: contributions[0].source.company.clone(),
            confidence: name.confidence,
            name,
            title,
            seniority,
            decision_weight: seniority.decision_weight(),
            email: fields.remove(&ExecutiveField::Email),
            phone: fields.remove(&ExecutiveField::Phone),
            profile_url: fields.remove(&ExecutiveField::ProfileUrl),
            quality_score,
            action,
            conflicts,
            source_ids,
        };
        record.check_provenance()?;

        debug!(
            person = %record.display_name(),
            sources = record.source_ids.len(),
            quality = record.quality_score,
            action = %record.action,
            "Built executive record"
        );
        Ok(record)
    }

    /// Name values share a person key, so they always agree; the display
    /// form comes from the most confident source
    fn fuse_name(&self, contributions: &[Contribution<'_>]) -> ExecResult<MergedField> {
        let best = contributions
            .iter()
            .min_by(|a, b| {
                b.capped(b.claim.name_confidence)
                    .partial_cmp(&a.capped(a.claim.name_confidence))
                    .unwrap_or(Ordering::Equal)
                    .then(b.claim.name.len().cmp(&a.claim.name.len()))
                    .then(a.order.cmp(&b.order))
            })
            .map(|c| c.claim.name.clone())
            .unwrap_or_default();

        let confidences: Vec<f64> = contributions.iter().map(|c| c.capped(c.claim.name_confidence)).collect();
        let provenance = contributions
            .iter()
            .map(|c| FieldProvenance {
                source_id: c.source.source_id.clone(),
                source_type: c.source.source_type,
                value: c.claim.name.clone(),
                confidence: c.capped(c.claim.name_confidence),
            })
            .collect();
        MergedField::new(
            best,
            agreement_confidence(&confidences, self.config.agreement_bonus),
            false,
            provenance,
        )
    }
}

/// Fold a repeated claim from the same source into the first one
fn absorb(into: &mut ExecutiveClaim, other: &ExecutiveClaim) {
    if other.name_confidence > into.name_confidence {
        into.name = other.name.clone();
        into.name_confidence = other.name_confidence;
    }
    for (field, claim) in &other.fields {
        let stronger = into
            .fields
            .get(field)
            .map_or(true, |current| claim.confidence > current.confidence);
        if stronger {
            into.fields.insert(*field, claim.clone());
        }
    }
}

/// Confirmed first, then decision-makers, then quality, then name
pub fn rank(records: &mut [ExecutiveRecord]) {
    records.sort_by(|a, b| {
        a.action
            .cmp(&b.action)
            .then(
                b.decision_weight
                    .partial_cmp(&a.decision_weight)
                    .unwrap_or(Ordering::Equal),
            )
            .then(b.quality_score.partial_cmp(&a.quality_score).unwrap_or(Ordering::Equal))
            .then(a.name.value.cmp(&b.name.value))
    });
}
