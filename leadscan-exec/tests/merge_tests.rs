//! Cross-source merge scenarios

use leadscan_common::config::MergeConfig;
use leadscan_exec::types::{
    AbsenceReason, ExecutiveClaim, ExecutiveField, ExecutiveRecord, RecommendedAction, SeniorityTier, SourceOutcome,
    SourceType, ValidationSource,
};
use leadscan_exec::{Lexicon, RecordMerger};
use std::sync::Arc;

const COMPANY: &str = "Riley Heating Ltd";

fn merger() -> RecordMerger {
    RecordMerger::new(Arc::new(Lexicon::builtin()), MergeConfig::default())
}

fn source(id: &str, source_type: SourceType, claim: ExecutiveClaim) -> ValidationSource {
    ValidationSource::new(id, source_type, COMPANY, source_type.default_confidence())
        .unwrap()
        .with_executive(claim)
}

fn full_claim(name: &str, confidence: f64) -> ExecutiveClaim {
    ExecutiveClaim::new(name, confidence)
        .unwrap()
        .with_field(ExecutiveField::Title, "Director", confidence)
        .unwrap()
        .with_field(ExecutiveField::Email, "andrew@rileyheating.co.uk", confidence)
        .unwrap()
        .with_field(ExecutiveField::Phone, "07700 900123", confidence)
        .unwrap()
        .with_field(ExecutiveField::ProfileUrl, "https://www.linkedin.com/in/andrew-riley", confidence)
        .unwrap()
}

fn only(records: Vec<ExecutiveRecord>) -> ExecutiveRecord {
    assert_eq!(records.len(), 1, "expected exactly one merged record");
    records.into_iter().next().unwrap()
}

#[test]
fn test_title_conflict_keeps_stronger_value_capped_at_weaker() {
    let registry = ExecutiveClaim::new("Andrew Riley", 0.9)
        .unwrap()
        .with_field(ExecutiveField::Title, "Director", 0.9)
        .unwrap();
    let site = ExecutiveClaim::new("Andrew Riley", 0.8)
        .unwrap()
        .with_field(ExecutiveField::Title, "Manager", 0.4)
        .unwrap();

    let record = only(
        merger()
            .merge_sources(&[
                source("registry", SourceType::Registry, registry),
                source("site:about", SourceType::SiteContent, site),
            ])
            .unwrap(),
    );

    let title = record.title.as_ref().unwrap();
    assert_eq!(title.value, "Director");
    assert!(title.conflicting);
    assert!((title.confidence - 0.4).abs() < 1e-9);
    assert_eq!(record.action, RecommendedAction::Conflicting);
    assert_eq!(record.seniority, SeniorityTier::DecisionMaker);
    assert_eq!(record.conflicts.len(), 1);
    assert_eq!(record.conflicts[0].field, ExecutiveField::Title);
}

#[test]
fn test_agreeing_sources_beat_each_source_alone() {
    let site = source("site:about", SourceType::SiteContent, full_claim("Andrew Riley", 0.8));
    let registry = source("registry", SourceType::Registry, full_claim("Andrew Riley", 0.8));

    let site_alone = only(merger().merge_sources(&[site.clone()]).unwrap());
    let registry_alone = only(merger().merge_sources(&[registry.clone()]).unwrap());
    let both = only(merger().merge_sources(&[site, registry]).unwrap());

    assert!(both.quality_score > site_alone.quality_score);
    assert!(both.quality_score > registry_alone.quality_score);
    assert!(both.conflicts.is_empty());
    assert!(both.email.as_ref().unwrap().confidence > 0.8);
}

#[test]
fn test_absent_source_leaves_corroborated_fields_untouched() {
    let site = source("site:about", SourceType::SiteContent, full_claim("Andrew Riley", 0.7));
    let registry = source("registry", SourceType::Registry, full_claim("Andrew Riley", 0.9));

    let without = merger()
        .merge(&[SourceOutcome::Present(site.clone()), SourceOutcome::Present(registry.clone())])
        .unwrap();
    let with_absent = merger()
        .merge(&[
            SourceOutcome::Present(site),
            SourceOutcome::Absent {
                source_id: "network".to_string(),
                source_type: SourceType::ProfessionalNetwork,
                reason: AbsenceReason::Timeout,
            },
            SourceOutcome::Present(registry),
        ])
        .unwrap();

    let a = only(without.records);
    let b = only(with_absent.records);
    for field in ExecutiveField::ALL {
        assert_eq!(
            a.field(field).map(|f| f.confidence),
            b.field(field).map(|f| f.confidence),
            "{} confidence changed",
            field.as_str()
        );
    }
    assert_eq!(a.name.confidence, b.name.confidence);
    assert_eq!(a.quality_score, b.quality_score);
    assert_eq!(a.action, b.action);
    assert_eq!(with_absent.absent.len(), 1);
}

#[test]
fn test_two_independent_agreeing_sources_confirm() {
    let site = source("site:about", SourceType::SiteContent, full_claim("Andrew Riley", 0.95));
    let registry = source("registry", SourceType::Registry, full_claim("Andrew Riley", 0.95));

    let record = only(merger().merge_sources(&[site, registry]).unwrap());
    assert_eq!(record.action, RecommendedAction::Confirmed);
    assert!(!record.action.requires_review());
}

#[test]
fn test_same_type_sources_do_not_confirm() {
    let about = source("site:about", SourceType::SiteContent, full_claim("Andrew Riley", 0.95));
    let team = source("site:team", SourceType::SiteContent, full_claim("Andrew Riley", 0.95));

    let record = only(merger().merge_sources(&[about, team]).unwrap());
    assert_eq!(record.action, RecommendedAction::Probable);
}

#[test]
fn test_nickname_and_case_variants_merge() {
    let site = source(
        "site:reviews",
        SourceType::SiteContent,
        ExecutiveClaim::new("Jim McManus", 0.7).unwrap(),
    );
    let network = source(
        "network",
        SourceType::ProfessionalNetwork,
        ExecutiveClaim::new("JAMES MCMANUS", 0.8).unwrap(),
    );
    let record = only(merger().merge_sources(&[site, network]).unwrap());
    assert_eq!(record.name.provenance.len(), 2);
}

#[test]
fn test_different_companies_never_merge() {
    let a = ValidationSource::new("registry", SourceType::Registry, "Riley Heating Ltd", 0.9)
        .unwrap()
        .with_executive(ExecutiveClaim::new("Andrew Riley", 0.9).unwrap());
    let b = ValidationSource::new("network", SourceType::ProfessionalNetwork, "Riley Roofing Ltd", 0.75)
        .unwrap()
        .with_executive(ExecutiveClaim::new("Andrew Riley", 0.9).unwrap());

    let records = merger().merge_sources(&[a, b]).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_every_populated_field_has_provenance() {
    let site = source("site:about", SourceType::SiteContent, full_claim("Andrew Riley", 0.8));
    let record = only(merger().merge_sources(&[site]).unwrap());
    for field in ExecutiveField::ALL {
        if let Some(merged) = record.field(field) {
            assert!(!merged.provenance.is_empty());
            assert!(merged.supporting_sources().contains(&"site:about"));
        }
    }
    assert!(record.check_provenance().is_ok());
}

#[test]
fn test_ranking_puts_decision_makers_first() {
    let owner = ExecutiveClaim::new("Andrew Riley", 0.8)
        .unwrap()
        .with_field(ExecutiveField::Title, "Owner", 0.8)
        .unwrap();
    let engineer = ExecutiveClaim::new("Mark Smith", 0.8)
        .unwrap()
        .with_field(ExecutiveField::Title, "Engineer", 0.8)
        .unwrap();
    let site = ValidationSource::new("site:team", SourceType::SiteContent, COMPANY, 0.6)
        .unwrap()
        .with_executive(engineer)
        .with_executive(owner);

    let records = merger().merge_sources(&[site]).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].display_name(), "Andrew Riley");
    assert_eq!(records[1].seniority, SeniorityTier::Staff);
}

#[test]
fn test_trusted_source_outweighs_confident_claim_from_weak_source() {
    let weak = ValidationSource::new("directory", SourceType::ProfessionalNetwork, COMPANY, 0.4)
        .unwrap()
        .with_executive(
            ExecutiveClaim::new("Andrew Riley", 0.95)
                .unwrap()
                .with_field(ExecutiveField::Title, "Manager", 0.95)
                .unwrap(),
        );
    let trusted = ValidationSource::new("registry", SourceType::Registry, COMPANY, 0.9)
        .unwrap()
        .with_executive(
            ExecutiveClaim::new("Andrew Riley", 0.8)
                .unwrap()
                .with_field(ExecutiveField::Title, "Director", 0.8)
                .unwrap(),
        );

    let record = only(merger().merge_sources(&[weak, trusted]).unwrap());
    let title = record.title.as_ref().unwrap();
    assert_eq!(title.value, "Director");
    assert!(title.conflicting);
    assert!((title.confidence - 0.4).abs() < 1e-9);
}
