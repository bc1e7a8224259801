//! Company-level executive discovery
//!
//! Site pages go through tier 1 synchronously; external channels are fanned
//! out concurrently; everything then meets once in the record merger. Every
//! scan produces a fresh [`CompanyExecutives`] that replaces the previous
//! result for the company as a whole.

use crate::channels::{site_sources, ChannelFanIn};
use crate::error::ExecResult;
use crate::extract::page::{PageExtractor, PageText};
use crate::fusion::record_merger::{AbsentSource, RecordMerger};
use crate::lexicon::Lexicon;
use crate::types::{ExecutiveRecord, RejectedCandidate, SourceOutcome};
use chrono::{DateTime, Utc};
use leadscan_common::ExtractionConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Source id prefix for bundles built from the company's own pages
pub const SITE_SOURCE_PREFIX: &str = "site";

/// Result of one scan of one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyExecutives {
    pub scan_id: Uuid,
    pub company: String,
    /// Ranked, best first
    pub records: Vec<ExecutiveRecord>,
    pub absent_sources: Vec<AbsentSource>,
    /// Rejected candidates, only when `channels.collect_rejections` is set
    pub rejections: Vec<RejectedCandidate>,
    pub completed_at: DateTime<Utc>,
}

impl CompanyExecutives {
    /// Records that must be reviewed before use
    pub fn needing_review(&self) -> impl Iterator<Item = &ExecutiveRecord> {
        self.records.iter().filter(|r| r.action.requires_review())
    }
}

/// Orchestrates extraction, channel fan-in and merge for one company
pub struct ExecutiveDiscovery {
    config: ExtractionConfig,
    extractor: Arc<PageExtractor>,
    merger: RecordMerger,
}

impl ExecutiveDiscovery {
    pub fn new(config: ExtractionConfig, lexicon: Arc<Lexicon>) -> ExecResult<Self> {
        config.validate()?;
        Ok(Self {
            extractor: Arc::new(PageExtractor::new(Arc::clone(&lexicon), &config)),
            merger: RecordMerger::new(lexicon, config.merge.clone()),
            config,
        })
    }

    /// Discovery with the built-in lexicon
    pub fn with_builtin_lexicon(config: ExtractionConfig) -> ExecResult<Self> {
        Self::new(config, Arc::new(Lexicon::builtin()))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Shared page extractor, e.g. for a `SiteContentChannel`
    pub fn extractor(&self) -> Arc<PageExtractor> {
        Arc::clone(&self.extractor)
    }

    /// Scan pages plus outcomes already gathered from other channels
    pub fn from_pages(
        &self,
        company: &str,
        pages: &[PageText],
        outcomes: Vec<SourceOutcome>,
    ) -> ExecResult<CompanyExecutives> {
        let (sources, rejections) = site_sources(&self.extractor, SITE_SOURCE_PREFIX, company, pages)?;
        let mut all: Vec<SourceOutcome> = sources.into_iter().map(SourceOutcome::Present).collect();
        all.extend(outcomes);
        self.finish(company, &all, rejections)
    }

    /// Scan pages and query every channel concurrently
    pub async fn discover(
        &self,
        company: &str,
        pages: &[PageText],
        channels: &ChannelFanIn,
    ) -> ExecResult<CompanyExecutives> {
        let outcomes = channels.collect(company).await;
        self.from_pages(company, pages, outcomes)
    }

    fn finish(
        &self,
        company: &str,
        outcomes: &[SourceOutcome],
        rejections: Vec<RejectedCandidate>,
    ) -> ExecResult<CompanyExecutives> {
        let merged = self.merger.merge(outcomes)?;
        let result = CompanyExecutives {
            scan_id: Uuid::new_v4(),
            company: company.to_string(),
            records: merged.records,
            absent_sources: merged.absent,
            rejections: if self.config.channels.collect_rejections {
                rejections
            } else {
                Vec::new()
            },
            completed_at: Utc::now(),
        };

        info!(
            scan_id = %result.scan_id,
            company = company,
            records = result.records.len(),
            needing_review = result.needing_review().count(),
            absent = result.absent_sources.len(),
            "Company scan complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AbsenceReason, SourceType};

    fn discovery(collect_rejections: bool) -> ExecutiveDiscovery {
        let mut config = ExtractionConfig::default();
        config.channels.collect_rejections = collect_rejections;
        ExecutiveDiscovery::with_builtin_lexicon(config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExtractionConfig::default();
        config.validator.acceptance_threshold = 1.5;
        assert!(ExecutiveDiscovery::with_builtin_lexicon(config).is_err());
    }

    #[test]
    fn test_rescan_gets_new_scan_id() {
        let discovery = discovery(false);
        let pages = [PageText::new("about", "Sarah Jones, Owner. sarah@jonesplumbing.co.uk")];
        let first = discovery.from_pages("Jones Plumbing", &pages, Vec::new()).unwrap();
        let second = discovery.from_pages("Jones Plumbing", &pages, Vec::new()).unwrap();
        assert_ne!(first.scan_id, second.scan_id);
        assert_eq!(first.records.len(), second.records.len());
    }

    #[test]
    fn test_rejections_only_when_requested() {
        let pages = [PageText::new("home", "Privacy Policy | Cookie Policy")];
        assert!(discovery(false)
            .from_pages("Acme", &pages, Vec::new())
            .unwrap()
            .rejections
            .is_empty());
        assert!(!discovery(true)
            .from_pages("Acme", &pages, Vec::new())
            .unwrap()
            .rejections
            .is_empty());
    }

    #[test]
    fn test_absent_outcomes_reported() {
        let outcomes = vec![SourceOutcome::Absent {
            source_id: "registry".to_string(),
            source_type: SourceType::Registry,
            reason: AbsenceReason::Timeout,
        }];
        let result = discovery(false).from_pages("Acme", &[], outcomes).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.absent_sources.len(), 1);
        assert_eq!(result.absent_sources[0].reason, AbsenceReason::Timeout);
    }
}
