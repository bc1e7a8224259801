//! Discovery channels
//!
//! Each channel produces zero or more [`ValidationSource`] bundles for a
//! company. [`ChannelFanIn`] runs every channel concurrently, each under its
//! own timeout, and reports a channel that times out, fails or finds nothing
//! as [`SourceOutcome::Absent`]. One slow or broken channel never blocks or
//! fails the others.

use crate::error::{ExecError, ExecResult};
use crate::extract::page::{PageExtractor, PageText};
use crate::types::{AbsenceReason, RejectedCandidate, SourceOutcome, SourceType, ValidationSource};
use async_trait::async_trait;
use futures::future::join_all;
use leadscan_common::config::ChannelConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// An independent source of executive bundles for a company
///
/// Implementations own their I/O, rate limiting and retries; the fan-in
/// only bounds how long it waits.
#[async_trait]
pub trait DiscoveryChannel: Send + Sync {
    /// Stable identifier used in provenance
    fn source_id(&self) -> &str;

    fn source_type(&self) -> SourceType;

    /// Bundles found for `company`; an empty Vec means nothing was found
    async fn discover(&self, company: &str) -> anyhow::Result<Vec<ValidationSource>>;
}

/// Run the page extractor over each page, one site-content bundle per page
/// that yielded at least one person
///
/// Rejection traces from every page are returned alongside.
pub fn site_sources(
    extractor: &PageExtractor,
    source_prefix: &str,
    company: &str,
    pages: &[PageText],
) -> ExecResult<(Vec<ValidationSource>, Vec<RejectedCandidate>)> {
    let mut sources = Vec::new();
    let mut rejections = Vec::new();
    for page in pages {
        let extraction = extractor.extract(page)?;
        rejections.extend(extraction.rejections);
        if extraction.claims.is_empty() {
            continue;
        }
        let mut source = ValidationSource::new(
            format!("{}:{}", source_prefix, page.page_id),
            SourceType::SiteContent,
            company,
            SourceType::SiteContent.default_confidence(),
        )?;
        for claim in extraction.claims {
            source = source.with_executive(claim);
        }
        sources.push(source);
    }
    Ok((sources, rejections))
}

/// Already-fetched site pages exposed as a channel
pub struct SiteContentChannel {
    source_id: String,
    extractor: Arc<PageExtractor>,
    pages: Vec<PageText>,
}

impl SiteContentChannel {
    pub fn new(source_id: impl Into<String>, extractor: Arc<PageExtractor>, pages: Vec<PageText>) -> Self {
        Self {
            source_id: source_id.into(),
            extractor,
            pages,
        }
    }

    /// Bundles for `company` together with the candidates every page rejected
    ///
    /// `discover` returns only the bundles and logs the rejection count;
    /// callers that want the traces call this directly.
    pub fn extract(&self, company: &str) -> ExecResult<(Vec<ValidationSource>, Vec<RejectedCandidate>)> {
        site_sources(&self.extractor, &self.source_id, company, &self.pages)
    }
}

#[async_trait]
impl DiscoveryChannel for SiteContentChannel {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_type(&self) -> SourceType {
        SourceType::SiteContent
    }

    async fn discover(&self, company: &str) -> anyhow::Result<Vec<ValidationSource>> {
        let (sources, rejections) = self.extract(company)?;
        debug!(
            channel = %self.source_id,
            company = company,
            rejected = rejections.len(),
            "Site candidates rejected"
        );
        Ok(sources)
    }
}

/// Channel answering with a pre-built set of bundles
///
/// Used for registry or professional-network results gathered elsewhere.
pub struct StaticChannel {
    source_id: String,
    source_type: SourceType,
    sources: Vec<ValidationSource>,
}

impl StaticChannel {
    pub fn new(source_id: impl Into<String>, source_type: SourceType, sources: Vec<ValidationSource>) -> Self {
        Self {
            source_id: source_id.into(),
            source_type,
            sources,
        }
    }
}

#[async_trait]
impl DiscoveryChannel for StaticChannel {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn discover(&self, _company: &str) -> anyhow::Result<Vec<ValidationSource>> {
        Ok(self.sources.clone())
    }
}

/// Concurrent fan-out over all channels, fan-in to source outcomes
pub struct ChannelFanIn {
    channels: Vec<Arc<dyn DiscoveryChannel>>,
    timeout: Duration,
    deadline: Duration,
}

impl ChannelFanIn {
    pub fn new(channels: Vec<Arc<dyn DiscoveryChannel>>, config: &ChannelConfig) -> ExecResult<Self> {
        if config.timeout_ms == 0 || config.deadline_ms == 0 {
            return Err(ExecError::Channel(
                "channel timeout and deadline must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            channels,
            timeout: Duration::from_millis(config.timeout_ms),
            deadline: Duration::from_millis(config.deadline_ms),
        })
    }

    pub fn count(&self) -> usize {
        self.channels.len()
    }

    /// Query every channel for `company`
    ///
    /// Returns outcomes in channel order. A channel returning several bundles
    /// yields one `Present` outcome per bundle. Channels run concurrently, so
    /// the whole call is bounded by the smaller of timeout and deadline.
    pub async fn collect(&self, company: &str) -> Vec<SourceOutcome> {
        let budget = self.timeout.min(self.deadline);
        let elapsed_reason = if self.deadline < self.timeout {
            AbsenceReason::DeadlineElapsed
        } else {
            AbsenceReason::Timeout
        };

        let futures = self.channels.iter().map(|channel| {
            let channel = Arc::clone(channel);
            let reason_on_elapsed = elapsed_reason.clone();
            async move {
                let source_id = channel.source_id().to_string();
                let source_type = channel.source_type();
                let absent = |reason: AbsenceReason| {
                    vec![SourceOutcome::Absent {
                        source_id: source_id.clone(),
                        source_type,
                        reason,
                    }]
                };

                match tokio::time::timeout(budget, channel.discover(company)).await {
                    Ok(Ok(sources)) if sources.is_empty() => {
                        debug!(channel = %source_id, company = company, "Channel found nothing");
                        absent(AbsenceReason::Empty)
                    }
                    Ok(Ok(sources)) => {
                        debug!(
                            channel = %source_id,
                            company = company,
                            bundles = sources.len(),
                            "Channel discovery successful"
                        );
                        sources.into_iter().map(SourceOutcome::Present).collect()
                    }
                    Ok(Err(e)) => {
                        warn!(
                            channel = %source_id,
                            company = company,
                            error = %e,
                            "Channel failed (recorded as absent)"
                        );
                        absent(AbsenceReason::Failed(e.to_string()))
                    }
                    Err(_) => {
                        warn!(
                            channel = %source_id,
                            company = company,
                            budget_ms = budget.as_millis() as u64,
                            "Channel timed out (recorded as absent)"
                        );
                        absent(reason_on_elapsed)
                    }
                }
            }
        });

        let outcomes: Vec<SourceOutcome> = join_all(futures).await.into_iter().flatten().collect();
        info!(
            company = company,
            channels = self.count(),
            present = outcomes.iter().filter(|o| o.present().is_some()).count(),
            "Channel fan-in complete"
        );
        outcomes
    }
}

// ============================================================================
// Mock Channels for Testing
// ============================================================================
