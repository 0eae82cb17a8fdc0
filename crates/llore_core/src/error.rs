//! Error types for the editing core.
use thiserror::Error;

/// Top-level core error type.
///
/// History and caret queries never return these to callers; measurement
/// failures are absorbed by the coordinate-arithmetic fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    #[error("Invalid config value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
}
