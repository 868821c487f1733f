//! Error types for view updates and dashboard loading.

use netdash_core::CoreError;
use thiserror::Error;

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised by view updates.
///
/// Every update that fails leaves the view's committed state untouched.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A mode key is unknown, or the dataset has no rendering for it.
    #[error("invalid {kind} mode '{key}'")]
    InvalidMode { kind: &'static str, key: String },

    /// A log-scaled size was requested over an empty or all-zero column.
    #[error("cannot scale marker sizes by '{attribute}': column is empty or all zero")]
    DegenerateScale { attribute: String },

    /// No precomputed allow-list exists for a collaboration threshold.
    #[error("no precomputed allow-list for popularity threshold {threshold}")]
    MissingThresholdBucket { threshold: u32 },

    /// An edge threshold outside [0, 1] (or NaN).
    #[error("edge threshold {value} is outside [0, 1]")]
    InvalidThreshold { value: f64 },

    /// A random-graph parameter is out of range.
    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// A dataset failed to load or validate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error while reading or writing the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ViewError {
    pub fn invalid_mode(kind: &'static str, key: impl Into<String>) -> Self {
        Self::InvalidMode {
            kind,
            key: key.into(),
        }
    }

    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
