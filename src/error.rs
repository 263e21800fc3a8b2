//! Error types for configuration loading and item storage.
//!
//! Scheduling itself cannot fail, so nothing here is produced by `sm2::schedule`.

use thiserror::Error;

/// Raised when a scheduler configuration breaks one of its invariants
/// or cannot be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be strictly positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("min_ease_factor ({min}) must be below max_ease_factor ({max})")]
    EaseFactorRange { min: f64, max: f64 },

    #[error("min_interval ({min}) must not exceed max_interval ({max})")]
    IntervalRange { min: u32, max: u32 },

    #[error("{field} ({value}) exceeds the limit of {limit} days")]
    IntervalTooLong {
        field: &'static str,
        value: u32,
        limit: u32,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the item store and its persistence formats.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("item not found: {0}")]
    NotFound(String),

    #[error("duplicate item id: {0}")]
    Duplicate(String),

    #[error("invalid stored value: {0}")]
    InvalidValue(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
