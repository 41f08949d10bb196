//! Error types for the document model.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors that can occur while deriving routing fields or loading a route
/// table.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A content type has no entry in the route table.
    ///
    /// This is fatal: minting a canonical for an unrouted content type would
    /// produce a URL no page will ever serve.
    #[error("unknown content type: {content_type}")]
    UnknownContentType {
        /// The content type that was not found.
        content_type: String,
    },

    /// Failed to read a route table file.
    #[error("failed to read routes file {path}: {source}")]
    ReadRoutes {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a route table file.
    #[error("failed to parse routes file: {source}")]
    ParseRoutes {
        /// Underlying TOML parse error.
        source: de::Error,
    },
}
