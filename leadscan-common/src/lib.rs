//! # leadscan common library
//!
//! Shared code for the leadscan crates:
//! - Error types
//! - Extraction configuration (TOML + environment + compiled defaults)
//! - Logging bootstrap

pub mod config;
pub mod error;
pub mod logging;

pub use config::ExtractionConfig;
pub use error::{Error, Result};
