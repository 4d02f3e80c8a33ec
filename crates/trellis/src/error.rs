//! Error types for Trellis operations.
//!
//! Geometry, catalogs and scene composition never fail; unresolvable
//! references are skipped with a logged warning. [`TrellisError`] covers the
//! fallible edges of the pipeline: loading, configuration and export.

use std::io;

use thiserror::Error;

/// The main error type for Trellis operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the JSON source next to the `serde_json` error so
/// that callers can point at the offending line and column.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to fetch `{url}`: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("{err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TrellisError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<trellis_core::catalog::CatalogError> for TrellisError {
    fn from(error: trellis_core::catalog::CatalogError) -> Self {
        Self::Config(error.to_string())
    }
}

impl TrellisError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Transport` error for `url`.
    pub fn new_transport_error(url: impl Into<String>, source: ureq::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }
}
