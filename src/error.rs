//! Crate-level error types.
//!
//! Each concern keeps its own error enum ([`ConfigError`] here,
//! [`LayoutError`] for pad layout, [`KicadError`] for footprint text).
//! [`Error`] joins them for callers that drive the whole pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::footprint::LayoutError;
use crate::kicad::KicadError;

/// Any failure while generating a footprint.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connector parameters cannot be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Footprint text could not be written or read.
    #[error(transparent)]
    Kicad(#[from] KicadError),
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}
