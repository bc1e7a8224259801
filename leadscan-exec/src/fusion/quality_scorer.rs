// Quality Scorer - Record Quality and Recommended Action
//
// Quality blends completeness, field confidence and independent
// corroboration. Corroboration counts distinct source types, so two pages of
// the same site do not confirm each other.

use crate::types::{Confidence, ExecutiveField, RecommendedAction};
use leadscan_common::config::MergeConfig;

/// Inputs to the quality score of one merged record
#[derive(Debug, Clone, Default)]
pub struct QualityInputs {
    /// Populated optional fields (title, email, phone, profile URL)
    pub populated_fields: usize,
    /// Merged confidences of the name and every populated field
    pub field_confidences: Vec<Confidence>,
    /// Distinct source types among contributing sources
    pub independent_sources: usize,
}

pub struct QualityScorer {
    config: MergeConfig,
}

impl QualityScorer {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Quality score in [0, 1]
    pub fn score(&self, inputs: &QualityInputs) -> f64 {
        let completeness = inputs.populated_fields.min(ExecutiveField::ALL.len()) as f64
            / ExecutiveField::ALL.len() as f64;
        let confidence = if inputs.field_confidences.is_empty() {
            0.0
        } else {
            inputs.field_confidences.iter().sum::<f64>() / inputs.field_confidences.len() as f64
        };
        let corroboration = if inputs.independent_sources == 0 {
            0.0
        } else {
            1.0 - 1.0 / inputs.independent_sources as f64
        };

        let total_weight =
            self.config.completeness_weight + self.config.confidence_weight + self.config.corroboration_weight;
        if total_weight <= 0.0 {
            return 0.0;
        }
        let weighted = self.config.completeness_weight * completeness
            + self.config.confidence_weight * confidence
            + self.config.corroboration_weight * corroboration;
        (weighted / total_weight).clamp(0.0, 1.0)
    }

    /// Recommended action from quality, corroboration and conflicts
    pub fn recommend(&self, quality: f64, independent_sources: usize, has_conflict: bool) -> RecommendedAction {
        if has_conflict {
            RecommendedAction::Conflicting
        } else if independent_sources >= 2 && quality >= self.config.high_quality_threshold {
            RecommendedAction::Confirmed
        } else if quality >= self.config.medium_quality_threshold {
            RecommendedAction::Probable
        } else {
            RecommendedAction::InsufficientEvidence
        }
    }
}
