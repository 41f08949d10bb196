//! Error types for the store client.

use thiserror::Error;

/// Errors that can occur while configuring or querying the document store.
///
/// All of these are fatal to a build; no artifacts are written after one.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required environment variable is not set.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: String,
    },

    /// The HTTP request itself failed (connection, TLS, timeout).
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store query failed with status {status}: {body}")]
    Query {
        /// HTTP status code returned.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not the expected row shape.
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}
