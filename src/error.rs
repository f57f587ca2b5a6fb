//! Error taxonomy for the classification core
//!
//! Ingestion and rendering report their own failures through `anyhow`; the
//! core only ever fails for the two reasons below.

use thiserror::Error;

/// Errors raised by aggregation and configuration validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// No outcome records reached the aggregator
    #[error("No test outcome records supplied")]
    NoData,

    /// A configuration value is out of range
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl DetectorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
