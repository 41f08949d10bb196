//! Error types for artifact I/O.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while writing or reading build artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Failed to write an artifact file.
    #[error("failed to write artifact {path}: {source}")]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read an artifact file.
    #[error("failed to read artifact {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to serialize an artifact to JSON.
    #[error("failed to serialize artifact: {source}")]
    Serialize {
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// An artifact file did not parse as the expected shape.
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        /// Path that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
