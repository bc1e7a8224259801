//! Fan-out/fan-in over discovery channels feeding the merge

use async_trait::async_trait;
use leadscan_common::config::ChannelConfig;
use leadscan_common::ExtractionConfig;
use leadscan_exec::types::{AbsenceReason, ExecutiveClaim, ExecutiveField, SourceOutcome, SourceType, ValidationSource};
use leadscan_exec::{
    ChannelFanIn, DiscoveryChannel, ExecutiveDiscovery, PageText, SiteContentChannel, StaticChannel,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const COMPANY: &str = "Riley Heating Ltd";

/// Channel that never answers within any reasonable budget
struct StalledChannel;

#[async_trait]
impl DiscoveryChannel for StalledChannel {
    fn source_id(&self) -> &str {
        "network"
    }

    fn source_type(&self) -> SourceType {
        SourceType::ProfessionalNetwork
    }

    async fn discover(&self, _company: &str) -> anyhow::Result<Vec<ValidationSource>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

/// Channel whose upstream is down
struct BrokenChannel;

#[async_trait]
impl DiscoveryChannel for BrokenChannel {
    fn source_id(&self) -> &str {
        "registry-api"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Registry
    }

    async fn discover(&self, _company: &str) -> anyhow::Result<Vec<ValidationSource>> {
        anyhow::bail!("upstream returned 503")
    }
}

fn registry() -> StaticChannel {
    let source = ValidationSource::new("registry", SourceType::Registry, COMPANY, 0.9)
        .unwrap()
        .with_executive(
            ExecutiveClaim::new("Andrew Riley", 0.9)
                .unwrap()
                .with_field(ExecutiveField::Title, "Director", 0.9)
                .unwrap(),
        );
    StaticChannel::new("registry", SourceType::Registry, vec![source])
}

fn channel_config(timeout_ms: u64) -> ChannelConfig {
    ChannelConfig {
        timeout_ms,
        ..ChannelConfig::default()
    }
}

#[tokio::test]
async fn test_stalled_channel_does_not_block_merge() {
    let channels: Vec<Arc<dyn DiscoveryChannel>> =
        vec![Arc::new(StalledChannel), Arc::new(registry()), Arc::new(BrokenChannel)];
    let fan_in = ChannelFanIn::new(channels, &channel_config(100)).unwrap();
    let discovery = ExecutiveDiscovery::with_builtin_lexicon(ExtractionConfig::default()).unwrap();

    let started = Instant::now();
    let pages = [PageText::new(
        "home",
        "Andrew Riley heating plumbing & gas is a family business ... admin@andrewrileyheating.co.uk",
    )];
    let result = discovery.discover(COMPANY, &pages, &fan_in).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));

    assert_eq!(result.records.len(), 1);
    let record = &result.records[0];
    assert_eq!(record.display_name(), "Andrew Riley");
    assert_eq!(record.title.as_ref().unwrap().value, "Director");
    assert!(record.email.is_some());

    assert_eq!(result.absent_sources.len(), 2);
    let stalled = result.absent_sources.iter().find(|a| a.source_id == "network").unwrap();
    assert_eq!(stalled.reason, AbsenceReason::Timeout);
    let broken = result.absent_sources.iter().find(|a| a.source_id == "registry-api").unwrap();
    assert!(matches!(&broken.reason, AbsenceReason::Failed(msg) if msg.contains("503")));
}

#[tokio::test]
async fn test_absent_channel_does_not_lower_confidence() {
    let discovery = ExecutiveDiscovery::with_builtin_lexicon(ExtractionConfig::default()).unwrap();
    let pages = [PageText::new("about", "Andrew Riley, Director. andrew@rileyheating.co.uk")];

    let healthy: Vec<Arc<dyn DiscoveryChannel>> = vec![Arc::new(registry())];
    let degraded: Vec<Arc<dyn DiscoveryChannel>> = vec![Arc::new(registry()), Arc::new(StalledChannel)];

    let a = discovery
        .discover(COMPANY, &pages, &ChannelFanIn::new(healthy, &channel_config(100)).unwrap())
        .await
        .unwrap();
    let b = discovery
        .discover(COMPANY, &pages, &ChannelFanIn::new(degraded, &channel_config(100)).unwrap())
        .await
        .unwrap();

    assert_eq!(a.records.len(), 1);
    assert_eq!(b.records.len(), 1);
    assert_eq!(a.records[0].name.confidence, b.records[0].name.confidence);
    assert_eq!(
        a.records[0].title.as_ref().map(|t| t.confidence),
        b.records[0].title.as_ref().map(|t| t.confidence)
    );
    assert_eq!(a.records[0].quality_score, b.records[0].quality_score);
    assert_ne!(a.scan_id, b.scan_id);
}

#[tokio::test]
async fn test_site_content_as_a_channel() {
    let discovery = ExecutiveDiscovery::with_builtin_lexicon(ExtractionConfig::default()).unwrap();
    let site = SiteContentChannel::new(
        "site",
        discovery.extractor(),
        vec![PageText::new("team", "Sarah Jones, Managing Director. sarah@joneskitchens.co.uk")],
    );
    let channels: Vec<Arc<dyn DiscoveryChannel>> = vec![Arc::new(site)];
    let fan_in = ChannelFanIn::new(channels, &ChannelConfig::default()).unwrap();

    let outcomes = fan_in.collect("Jones Kitchens").await;
    assert_eq!(outcomes.len(), 1);
    let SourceOutcome::Present(source) = &outcomes[0] else {
        panic!("site channel should be present");
    };
    assert_eq!(source.source_id, "site:team");
    assert_eq!(source.executives[0].name, "Sarah Jones");
}

#[tokio::test]
async fn test_empty_channel_is_absent_not_negative() {
    let empty = StaticChannel::new("network", SourceType::ProfessionalNetwork, Vec::new());
    let channels: Vec<Arc<dyn DiscoveryChannel>> = vec![Arc::new(empty), Arc::new(registry())];
    let fan_in = ChannelFanIn::new(channels, &ChannelConfig::default()).unwrap();
    assert_eq!(fan_in.count(), 2);

    let outcomes = fan_in.collect(COMPANY).await;
    assert!(matches!(
        &outcomes[0],
        SourceOutcome::Absent { reason: AbsenceReason::Empty, .. }
    ));
    assert!(outcomes[1].present().is_some());
}
