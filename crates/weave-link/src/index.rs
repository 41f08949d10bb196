//! Case-insensitive alias index.
//!
//! Maps normalized lookup keys (lowercased, trimmed titles, slugs, and ids)
//! to canonical URLs. The index is rebuilt from scratch on every build and
//! round-trips through JSON as a flat string-to-string object.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use weave_document::Document;

/// Normalizes a value for case-insensitive lookup: lowercase plus trim.
///
/// No other transformation is applied; unicode and punctuation pass through.
pub fn normalize_key(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

/// Lookup table from normalized alias key to canonical URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasIndex {
    /// Normalized key -> canonical URL.
    entries: BTreeMap<String, String>,
}

impl AliasIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key, normalizing it first.
    ///
    /// Returns the previously registered canonical when the key was already
    /// present (last write wins).
    pub fn insert(&mut self, key: &str, canonical: &str) -> Option<String> {
        self.entries
            .insert(normalize_key(key), canonical.to_string())
    }

    /// Resolves a raw wiki-link target to a canonical URL.
    pub fn resolve(&self, target: &str) -> Option<&str> {
        self.entries.get(&normalize_key(target)).map(String::as_str)
    }

    /// Number of keys in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (key, canonical) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, canonical)| (key.as_str(), canonical.as_str()))
    }
}

/// Two documents normalized to the same alias key.
///
/// Not an error: resolution is last-write-wins in input order. Surfaced so
/// the operator can rename one of the colliding documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    /// The normalized key both documents produced.
    pub key: String,
    /// Canonical that was overwritten.
    pub previous: String,
    /// Canonical that now owns the key.
    pub canonical: String,
}

impl fmt::Display for AliasCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alias '{}' now resolves to {} (was {})",
            self.key, self.canonical, self.previous
        )
    }
}

/// Result of building an alias index.
#[derive(Debug, Clone)]
pub struct IndexBuild {
    /// The built index.
    pub index: AliasIndex,
    /// Keys that were overwritten with a different canonical, in the order
    /// the overwrites happened.
    pub collisions: Vec<AliasCollision>,
}

/// Builds an alias index from documents, in input order.
///
/// For every eligible document with a canonical, three keys are registered
/// when non-empty after normalization: title, slug, and id. Later documents
/// silently win key collisions; each such overwrite is also reported.
pub fn build_index(documents: &[Document]) -> IndexBuild {
    let mut index = AliasIndex::new();
    let mut collisions = Vec::new();

    for doc in documents {
        if !doc.is_eligible() || doc.canonical.is_empty() {
            continue;
        }

        for key in [&doc.title, &doc.slug, &doc.id] {
            if normalize_key(key).is_empty() {
                continue;
            }
            if let Some(previous) = index.insert(key, &doc.canonical)
                && previous != doc.canonical
            {
                collisions.push(AliasCollision {
                    key: normalize_key(key),
                    previous,
                    canonical: doc.canonical.clone(),
                });
            }
        }
    }

    IndexBuild { index, collisions }
}
