//! Engine error types
//!
//! Only parameter validation can fail. Degenerate geometry and numeric noise
//! are handled in place and never surface here.

use thiserror::Error;

/// Errors reported synchronously by the call that introduced the bad input.
/// The failing operation never mutates state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid {name} {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("empty sampling domain [{start}, {end}]")]
    EmptyDomain { start: f64, end: f64 },

    #[error("boundary policy needs 1, 2 or 4 edge rules, got {0}")]
    InvalidEdgeCount(usize),
}

impl EngineError {
    /// Shorthand for the common "must be finite and positive" rejection
    pub fn not_positive(name: &'static str, value: f64) -> Self {
        EngineError::InvalidParameter {
            name,
            value,
            reason: "must be finite and greater than zero",
        }
    }
}

/// Fails with [`EngineError::not_positive`] unless `value` is finite and > 0
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::not_positive(name, value))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors loading or saving [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] EngineError),
}
