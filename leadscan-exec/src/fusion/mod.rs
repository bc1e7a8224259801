// Fusion Module - Cross-Source Merge & Validation
//
// Tier 2 (field fusion) and tier 3 (quality and recommended action) over the
// per-source bundles produced by tier 1 and the discovery channels:
// - record_merger: clusters claims per person within a company
// - field_fuser: agreement bonus, conflict cap, conflict reports
// - quality_scorer: data-quality score and recommended action

pub mod field_fuser;
pub mod quality_scorer;
pub mod record_merger;

pub use field_fuser::{agreement_confidence, fuse_field, FieldValue, FusedField};
pub use quality_scorer::{QualityInputs, QualityScorer};
pub use record_merger::{rank, AbsentSource, MergeOutcome, RecordMerger};
