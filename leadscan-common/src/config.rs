//! Extraction configuration and its resolution
//!
//! Every tuned constant of the extraction pipeline lives here with a compiled
//! default. Resolution order:
//! 1. Explicit path argument (highest priority)
//! 2. `LEADSCAN_CONFIG` environment variable
//! 3. Platform config file (`<config_dir>/leadscan/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing file is never fatal: a warning is logged and defaults are used.
//! A malformed file or an out-of-range value is a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "LEADSCAN_CONFIG";

/// Top-level extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    pub validator: ValidatorConfig,
    pub attribution: AttributionConfig,
    pub title: TitleConfig,
    pub merge: MergeConfig,
    pub channels: ChannelConfig,
    pub logging: LoggingConfig,
}

/// Human-name validator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Minimum confidence for a candidate to become a validated name
    pub acceptance_threshold: f64,
    /// Keep single-token candidates that could not be completed from an email
    pub accept_single_token: bool,
    /// Character window either side of a candidate searched for context cues
    pub context_window: usize,
    /// Character window either side of a single token searched for person cues
    pub single_token_cue_window: usize,
    /// Signed weights of the scoring rules
    pub weights: ScoringWeights,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.6,
            accept_single_token: false,
            context_window: 80,
            single_token_cue_window: 40,
            weights: ScoringWeights::default(),
        }
    }
}

/// Per-rule weights for name scoring
///
/// Positive weights are added when a rule fires. The service/location
/// penalty is subtracted once per matched term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub first_name: f64,
    pub surname: f64,
    pub title_case: f64,
    pub word_count: f64,
    pub clean_characters: f64,
    pub context_cue: f64,
    pub service_location_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            first_name: 0.35,
            surname: 0.30,
            title_case: 0.10,
            word_count: 0.05,
            clean_characters: 0.05,
            context_cue: 0.15,
            service_location_penalty: 0.25,
        }
    }
}

/// Contact attribution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// Radius (characters) of the contact window around a name
    pub radius: usize,
    /// Proximity factor applied when the sole-contact rule attributes a token
    pub sole_contact_factor: f64,
    /// Floor of the linear proximity decay inside the window
    pub min_proximity_factor: f64,
    /// Confidence added when an email local part encodes the person
    pub local_part_bonus: f64,
    /// Quality factor of a personal (named) mailbox
    pub personal_email_quality: f64,
    /// Quality factor of a generic mailbox such as info@ or admin@
    pub generic_email_quality: f64,
    /// Quality factor of a professional-profile URL
    pub profile_url_quality: f64,
    /// Quality factor of a phone number written in running text
    pub free_text_phone_quality: f64,
    /// Quality factor of a phone number in a contact block
    pub contact_block_phone_quality: f64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            radius: 250,
            sole_contact_factor: 0.8,
            min_proximity_factor: 0.2,
            local_part_bonus: 0.2,
            personal_email_quality: 1.0,
            generic_email_quality: 0.85,
            profile_url_quality: 0.9,
            free_text_phone_quality: 0.75,
            contact_block_phone_quality: 0.55,
        }
    }
}

/// Title/seniority classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Characters after (or before) a name inspected for a title phrase
    pub search_span: usize,
    /// Maximum words in a title phrase
    pub max_title_words: usize,
    /// Confidence of a title found via "<Name>, <Title>"
    pub comma_pattern_confidence: f64,
    /// Confidence of a title found via "<Title>: <Name>"
    pub colon_pattern_confidence: f64,
    /// Confidence of a title found via "<Name> is our <Title>"
    pub copula_pattern_confidence: f64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            search_span: 60,
            max_title_words: 5,
            comma_pattern_confidence: 0.8,
            colon_pattern_confidence: 0.8,
            copula_pattern_confidence: 0.7,
        }
    }
}

/// Cross-source merge and validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Bonus per additional agreeing source
    pub agreement_bonus: f64,
    /// Quality needed (with corroboration) for a confirmed record
    pub high_quality_threshold: f64,
    /// Quality needed for a probable record
    pub medium_quality_threshold: f64,
    /// Weight of the populated-field fraction in data quality
    pub completeness_weight: f64,
    /// Weight of the average field confidence in data quality
    pub confidence_weight: f64,
    /// Weight of independent corroboration in data quality
    pub corroboration_weight: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            agreement_bonus: 0.1,
            high_quality_threshold: 0.75,
            medium_quality_threshold: 0.5,
            completeness_weight: 0.35,
            confidence_weight: 0.45,
            corroboration_weight: 0.20,
        }
    }
}

/// Discovery channel fan-in settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Per-channel timeout in milliseconds
    pub timeout_ms: u64,
    /// Overall deadline for one company in milliseconds
    pub deadline_ms: u64,
    /// Keep rejected candidates in the company result for tuning
    pub collect_rejections: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            deadline_ms: 30_000,
            collect_rejections: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExtractionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve configuration using the documented priority order
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            info!("Loading extraction config from {}", path.display());
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                info!("Loading extraction config from {} ({})", path.display(), CONFIG_ENV_VAR);
                return Self::from_file(&path);
            }
            warn!(
                "{} points at missing file {}, ignoring",
                CONFIG_ENV_VAR,
                path.display()
            );
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                info!("Loading extraction config from {}", path.display());
                return Self::from_file(&path);
            }
        }

        warn!("No extraction config file found, using compiled defaults");
        Ok(Self::default())
    }

    /// Check every value is inside its valid range
    pub fn validate(&self) -> Result<()> {
        let v = &self.validator;
        check_unit("validator.acceptance_threshold", v.acceptance_threshold)?;
        let w = &v.weights;
        for (name, value) in [
            ("validator.weights.first_name", w.first_name),
            ("validator.weights.surname", w.surname),
            ("validator.weights.title_case", w.title_case),
            ("validator.weights.word_count", w.word_count),
            ("validator.weights.clean_characters", w.clean_characters),
            ("validator.weights.context_cue", w.context_cue),
            ("validator.weights.service_location_penalty", w.service_location_penalty),
        ] {
            check_unit(name, value)?;
        }

        let a = &self.attribution;
        if a.radius == 0 {
            return Err(Error::Config("attribution.radius must be positive".to_string()));
        }
        for (name, value) in [
            ("attribution.sole_contact_factor", a.sole_contact_factor),
            ("attribution.min_proximity_factor", a.min_proximity_factor),
            ("attribution.local_part_bonus", a.local_part_bonus),
            ("attribution.personal_email_quality", a.personal_email_quality),
            ("attribution.generic_email_quality", a.generic_email_quality),
            ("attribution.profile_url_quality", a.profile_url_quality),
            ("attribution.free_text_phone_quality", a.free_text_phone_quality),
            ("attribution.contact_block_phone_quality", a.contact_block_phone_quality),
        ] {
            check_unit(name, value)?;
        }

        let t = &self.title;
        if t.max_title_words == 0 {
            return Err(Error::Config("title.max_title_words must be positive".to_string()));
        }
        check_unit("title.comma_pattern_confidence", t.comma_pattern_confidence)?;
        check_unit("title.colon_pattern_confidence", t.colon_pattern_confidence)?;
        check_unit("title.copula_pattern_confidence", t.copula_pattern_confidence)?;

        let m = &self.merge;
        for (name, value) in [
            ("merge.agreement_bonus", m.agreement_bonus),
            ("merge.high_quality_threshold", m.high_quality_threshold),
            ("merge.medium_quality_threshold", m.medium_quality_threshold),
            ("merge.completeness_weight", m.completeness_weight),
            ("merge.confidence_weight", m.confidence_weight),
            ("merge.corroboration_weight", m.corroboration_weight),
        ] {
            check_unit(name, value)?;
        }
        if m.medium_quality_threshold > m.high_quality_threshold {
            return Err(Error::Config(format!(
                "merge.medium_quality_threshold ({}) exceeds merge.high_quality_threshold ({})",
                m.medium_quality_threshold, m.high_quality_threshold
            )));
        }

        if self.channels.timeout_ms == 0 || self.channels.deadline_ms == 0 {
            return Err(Error::Config(
                "channels.timeout_ms and channels.deadline_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Platform config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leadscan").join("config.toml"))
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(Error::Config(format!(
            "{} must be within [0.0, 1.0], got {}",
            name, value
        )));
    }
    Ok(())
}
