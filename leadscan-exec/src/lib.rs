//! leadscan-exec library interface
//!
//! Executive contact extraction for trade-company websites:
//! - Tier 1 (`extract`): candidates, name validation, contact attribution, titles
//! - Tier 2 (`fusion`): cross-source clustering and field fusion
//! - Tier 3 (`fusion::quality_scorer`): data quality and recommended action
//!
//! `pipeline::ExecutiveDiscovery` ties the tiers together for one company.

pub mod canonical;
pub mod channels;
pub mod error;
pub mod extract;
pub mod fusion;
pub mod lexicon;
pub mod pipeline;
pub mod types;

pub use crate::channels::{ChannelFanIn, DiscoveryChannel, SiteContentChannel, StaticChannel};
pub use crate::error::{ExecError, ExecResult};
pub use crate::extract::{PageExtractor, PageText};
pub use crate::fusion::RecordMerger;
pub use crate::lexicon::Lexicon;
pub use crate::pipeline::{CompanyExecutives, ExecutiveDiscovery};
pub use crate::types::{ExecutiveRecord, RecommendedAction, SourceOutcome, SourceType, ValidationSource};
