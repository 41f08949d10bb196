//! Read-side content queries.
//!
//! Page generation works entirely from the persisted artifacts. The
//! queries operate over eligible documents only — rows that are public and
//! published — even if the artifact set carries more.

use std::{cmp::Reverse, path::Path};

use chrono::{DateTime, FixedOffset};
use weave_document::Document;
use weave_link::{BacklinkEntry, BacklinkGraph};

use crate::{ArtifactError, read_backlinks, read_documents};

/// The loaded artifact set, filtered to eligible documents.
#[derive(Debug, Clone)]
pub struct ContentSet {
    /// Eligible documents, in artifact (store) order.
    documents: Vec<Document>,
    /// The backlink graph.
    backlinks: BacklinkGraph,
}

impl ContentSet {
    /// Loads `documents.json` and `backlinks.json` from an artifact
    /// directory.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let documents = read_documents(dir)?
            .into_iter()
            .filter(Document::is_eligible)
            .collect();
        let backlinks = read_backlinks(dir)?;
        Ok(Self {
            documents,
            backlinks,
        })
    }

    /// Builds a content set from already-loaded values.
    pub fn from_parts(documents: Vec<Document>, backlinks: BacklinkGraph) -> Self {
        Self {
            documents: documents
                .into_iter()
                .filter(Document::is_eligible)
                .collect(),
            backlinks,
        }
    }

    /// All eligible documents, in artifact order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The document at a canonical URL, if any.
    pub fn by_canonical(&self, canonical: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.canonical == canonical)
    }

    /// Documents in a collection, e.g. `library/principles`.
    pub fn by_collection(&self, collection: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| doc.collection == collection)
            .collect()
    }

    /// Documents whose collection starts with a prefix, e.g. `library`.
    pub fn by_collection_prefix(&self, prefix: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| doc.collection.starts_with(prefix))
            .collect()
    }

    /// Documents of one content type.
    pub fn by_content_type(&self, content_type: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| doc.content_type == content_type)
            .collect()
    }

    /// Documents grouped by content type, newest first within each group.
    ///
    /// Types with no documents are omitted; group order follows the given
    /// type order.
    pub fn grouped_by_content_type<'a>(
        &self,
        content_types: &[&'a str],
    ) -> Vec<(&'a str, Vec<&Document>)> {
        content_types
            .iter()
            .filter_map(|&content_type| {
                let mut docs = self.by_content_type(content_type);
                if docs.is_empty() {
                    return None;
                }
                sort_by_date_desc(&mut docs);
                Some((content_type, docs))
            })
            .collect()
    }

    /// The `limit` most recently dated documents.
    pub fn recent(&self, limit: usize) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self.documents.iter().collect();
        sort_by_date_desc(&mut docs);
        docs.truncate(limit);
        docs
    }

    /// Inbound links for a canonical; empty when it has none.
    pub fn backlinks_for(&self, canonical: &str) -> &[BacklinkEntry] {
        self.backlinks.backlinks_for(canonical)
    }

    /// The backlink graph itself.
    pub fn backlinks(&self) -> &BacklinkGraph {
        &self.backlinks
    }
}

/// The display date of a document: publication, else last update, else
/// creation.
///
/// Timestamps are stored as strings and parsed on demand; an unparseable
/// value counts as absent.
pub fn document_date(doc: &Document) -> Option<DateTime<FixedOffset>> {
    [&doc.published_at, &doc.updated_at, &doc.created_at]
        .into_iter()
        .flatten()
        .next()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
}

/// Sorts documents newest first; documents without a date sort last.
pub fn sort_by_date_desc(docs: &mut [&Document]) {
    docs.sort_by_key(|doc| {
        Reverse(document_date(doc).map_or(i64::MIN, |date| date.timestamp_millis()))
    });
}
