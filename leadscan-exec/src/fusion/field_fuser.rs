// Field Fuser - Agreement-Boosted, Conflict-Capped Selection
//
// One field of one person across sources. Values are compared in normalized
// form; agreeing sources raise confidence, disagreeing sources flag the field
// and cap it at the runner-up's confidence.

use crate::canonical::normalize_value;
use crate::error::ExecResult;
use crate::types::{Confidence, ExecutiveField, FieldConflict, FieldProvenance, MergedField, SourceType};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// One source's value for the field being fused
#[derive(Debug, Clone)]
pub struct FieldValue<'a> {
    pub source_id: &'a str,
    pub source_type: SourceType,
    pub value: &'a str,
    pub confidence: Confidence,
    /// Position of the source in the input, for deterministic tie-breaks
    pub order: usize,
}

/// Fused field plus the pairwise disagreements found on the way
#[derive(Debug, Clone)]
pub struct FusedField {
    pub field: MergedField,
    pub conflicts: Vec<FieldConflict>,
}

/// Confidence of a set of agreeing values
///
/// Never below the strongest single value; each extra agreeing source adds
/// `bonus` on top of the mean. Clamped to 1.0.
pub fn agreement_confidence(confidences: &[Confidence], bonus: f64) -> Confidence {
    if confidences.is_empty() {
        return 0.0;
    }
    let n = confidences.len() as f64;
    let mean = confidences.iter().sum::<f64>() / n;
    let max = confidences.iter().copied().fold(0.0, f64::max);
    (mean + bonus * (n - 1.0)).max(max).min(1.0)
}

/// Highest confidence first, then earliest source, then value
fn stronger(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then(a.order.cmp(&b.order))
        .then(a.value.cmp(b.value))
}

fn provenance(values: &[FieldValue<'_>]) -> Vec<FieldProvenance> {
    values
        .iter()
        .map(|v| FieldProvenance {
            source_id: v.source_id.to_string(),
            source_type: v.source_type,
            value: v.value.to_string(),
            confidence: v.confidence,
        })
        .collect()
}

/// Fuse one field; None when no source reported it
pub fn fuse_field(field: ExecutiveField, values: &[FieldValue<'_>], agreement_bonus: f64) -> ExecResult<Option<FusedField>> {
    if values.is_empty() {
        return Ok(None);
    }

    let normalized: Vec<String> = values.iter().map(|v| normalize_value(field, v.value)).collect();
    let mut ranked: Vec<usize> = (0..values.len()).collect();
    ranked.sort_by(|&a, &b| stronger(&values[a], &values[b]));

    let best = ranked[0];
    let selected = &normalized[best];
    let agreeing: Vec<Confidence> = (0..values.len())
        .filter(|&i| normalized[i] == *selected)
        .map(|i| values[i].confidence)
        .collect();
    let base = agreement_confidence(&agreeing, agreement_bonus);

    let disagreeing = agreeing.len() < values.len();
    if !disagreeing {
        let merged = MergedField::new(values[best].value, base, false, provenance(values))?;
        debug!(
            field = field.as_str(),
            value = %merged.value,
            sources = values.len(),
            confidence = merged.confidence,
            "Field agreed across sources"
        );
        return Ok(Some(FusedField {
            field: merged,
            conflicts: Vec::new(),
        }));
    }

    // Disagreement: keep the strongest value but never above the runner-up
    let mut confidences: Vec<Confidence> = values.iter().map(|v| v.confidence).collect();
    confidences.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let cap = confidences.get(1).copied().unwrap_or(base);
    let confidence = base.min(cap);

    let mut conflicts = Vec::new();
    for i in 0..values.len() {
        for j in (i + 1)..values.len() {
            if normalized[i] != normalized[j] {
                conflicts.push(FieldConflict {
                    field,
                    source1: values[i].source_id.to_string(),
                    value1: values[i].value.to_string(),
                    source2: values[j].source_id.to_string(),
                    value2: values[j].value.to_string(),
                    similarity: strsim::normalized_levenshtein(&normalized[i], &normalized[j]),
                });
            }
        }
    }

    let mut distinct = normalized.clone();
    distinct.sort();
    distinct.dedup();
    warn!(
        field = field.as_str(),
        selected = values[best].value,
        distinct_values = distinct.len(),
        confidence = confidence,
        "Conflicting values across sources"
    );

    let merged = MergedField::new(values[best].value, confidence, true, provenance(values))?;
    Ok(Some(FusedField {
        field: merged,
        conflicts,
    }))
}
