//! Document model and canonical routing for weave.
//!
//! This crate defines the two document shapes the pipeline works with:
//! - [`DocumentRow`]: the wire shape returned by the remote store
//! - [`Document`]: a row enriched with the derived `canonical` and
//!   `collection` fields
//!
//! plus the [`Routes`] table that drives the derivation. Rows are read-only
//! input; the transform only adds the derived fields and never rewrites
//! source data.

#![warn(missing_docs)]

mod error;
mod routes;
mod transform;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::DocumentError;
pub use routes::{LANDING_PAGES, Routes};
pub use transform::{transform, transform_all};

/// Who can see a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone.
    Public,
    /// Visible to supporters only.
    Supporter,
    /// Visible within one-on-one engagements only.
    #[serde(rename = "1v1")]
    OneOnOne,
    /// Visible to the owner only.
    Private,
}

/// Publication state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet published.
    Draft,
    /// Published and live.
    Published,
    /// Retired from the site.
    Archived,
}

/// A document row as returned by the remote store.
///
/// Optional fields arrive as JSON `null`, never as missing keys. Rows are
/// never mutated; [`transform`] consumes them to produce [`Document`]s.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRow {
    /// Opaque globally unique identifier.
    pub id: String,
    /// Identifier of the owning user.
    pub user_id: String,
    /// Document title.
    pub title: String,
    /// URL slug, unique within the content type.
    pub slug: String,
    /// Content type tag, e.g. `principles` or `projects`.
    pub content_type: String,
    /// Who can see this document.
    pub visibility: Visibility,
    /// Publication state.
    pub status: Status,
    /// Markdown body, if any.
    pub body_md: Option<String>,
    /// Short summary, if any.
    pub summary: Option<String>,
    /// Manual ordering hint within a collection, if any.
    pub order: Option<i64>,
    /// Open key-value metadata.
    pub metadata: Option<Value>,
    /// Creation timestamp (RFC 3339), if any.
    pub created_at: Option<String>,
    /// Last-update timestamp (RFC 3339), if any.
    pub updated_at: Option<String>,
    /// Publication timestamp (RFC 3339), if any.
    pub published_at: Option<String>,
}

/// A document with derived routing fields, as persisted in `documents.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque globally unique identifier.
    pub id: String,
    /// Document title.
    pub title: String,
    /// URL slug, unique within the content type.
    pub slug: String,
    /// Content type tag.
    pub content_type: String,
    /// Storage/grouping path derived from the content type,
    /// e.g. `library/principles`.
    pub collection: String,
    /// Who can see this document.
    pub visibility: Visibility,
    /// Publication state.
    pub status: Status,
    /// Canonical site path, unique across the corpus,
    /// e.g. `/library/principles/emotional-sovereignty`.
    pub canonical: String,
    /// Markdown body; empty string when the row carried none.
    pub body_md: String,
    /// Short summary, if any.
    pub summary: Option<String>,
    /// Open key-value metadata.
    pub metadata: Option<Value>,
    /// Creation timestamp (RFC 3339), if any.
    pub created_at: Option<String>,
    /// Last-update timestamp (RFC 3339), if any.
    pub updated_at: Option<String>,
    /// Publication timestamp (RFC 3339), if any.
    pub published_at: Option<String>,
}

impl Document {
    /// Whether this document participates in indexing and backlinks:
    /// public visibility and published status.
    pub fn is_eligible(&self) -> bool {
        self.visibility == Visibility::Public && self.status == Status::Published
    }
}
