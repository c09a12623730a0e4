//! Error type for the I/O-facing parts of the crate.
//!
//! The geometry and pricing functions never fail: degenerate input falls back
//! to zero areas, mean centroids and the default multiplier. Only loading
//! config files and parsing caller-supplied documents can error.
//!
//! ## Rust Lesson #5: thiserror and `?`
//!
//! `#[error(...)]` writes the `Display` impl and `#[from]` writes a `From`
//! impl, so `serde_json::from_str(json)?` turns a `serde_json::Error` into
//! `QuoteError::Json` and returns early, much like a `throw` that the
//! signature has to admit to.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pricing config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid pricing config: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
