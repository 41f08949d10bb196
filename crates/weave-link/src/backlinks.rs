//! Backlink graph construction.
//!
//! For every document, outbound wiki-links are resolved against the alias
//! index and recorded as inbound entries on the target. Every eligible
//! canonical is present in the graph even with no backlinks, so readers can
//! distinguish "no backlinks" from "unknown document".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weave_document::Document;

use crate::{AliasIndex, DEFAULT_EXCERPT_WINDOW, excerpt, wiki_links};

/// One inbound link: "some document links here".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinkEntry {
    /// Title of the linking document.
    pub title: String,
    /// Canonical URL of the linking document.
    pub canonical: String,
    /// Context around the link in the linking document's body.
    pub excerpt: String,
}

/// Mapping from canonical URL to its inbound links.
///
/// Entry sequences are ordered by source-document processing order, then by
/// occurrence order within each body. Duplicates are kept: a document that
/// links to the same target twice contributes two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BacklinkGraph {
    /// Canonical URL -> inbound entries.
    entries: BTreeMap<String, Vec<BacklinkEntry>>,
}

impl BacklinkGraph {
    /// Returns the inbound links for a canonical, empty when it has none or
    /// is not in the graph.
    pub fn backlinks_for(&self, canonical: &str) -> &[BacklinkEntry] {
        self.entries.get(canonical).map_or(&[], Vec::as_slice)
    }

    /// Whether the graph has an entry (possibly empty) for a canonical.
    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    /// Number of canonicals in the graph.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (canonical, entries) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[BacklinkEntry])> {
        self.entries
            .iter()
            .map(|(canonical, entries)| (canonical.as_str(), entries.as_slice()))
    }

    /// Total number of entries across all canonicals.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Builds the backlink graph for a set of documents.
///
/// Documents are processed in input order. Unresolved targets and self-links
/// are dropped silently; nothing in this pass can fail.
pub fn build_backlinks(documents: &[Document], index: &AliasIndex) -> BacklinkGraph {
    let mut graph = BacklinkGraph::default();

    // Every eligible canonical gets an entry up front.
    for doc in documents {
        if doc.is_eligible() && !doc.canonical.is_empty() {
            graph.entries.entry(doc.canonical.clone()).or_default();
        }
    }

    for doc in documents {
        if !doc.is_eligible() || doc.canonical.is_empty() || doc.body_md.is_empty() {
            continue;
        }

        for link in wiki_links(&doc.body_md) {
            let Some(target) = index.resolve(link.target) else {
                continue;
            };
            if target == doc.canonical {
                continue;
            }

            let entry = BacklinkEntry {
                title: doc.title.clone(),
                canonical: doc.canonical.clone(),
                excerpt: excerpt(&doc.body_md, link.position, DEFAULT_EXCERPT_WINDOW),
            };
            graph
                .entries
                .entry(target.to_string())
                .or_default()
                .push(entry);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_index;
    use weave_document::{Routes, Status, Visibility};

    /// A published public document with a body.
    fn doc(title: &str, slug: &str, content_type: &str, body: &str) -> Document {
        let routes = Routes::default();
        Document {
            id: format!("id-{slug}"),
            title: title.into(),
            slug: slug.into(),
            content_type: content_type.into(),
            collection: routes.collection(content_type).unwrap(),
            visibility: Visibility::Public,
            status: Status::Published,
            canonical: routes.canonical(content_type, slug).unwrap(),
            body_md: body.into(),
            summary: None,
            metadata: None,
            created_at: None,
            updated_at: None,
            published_at: None,
        }
    }

    #[test]
    fn test_bidirectional_links() {
        let docs = vec![
            doc(
                "Emotional Sovereignty",
                "emotional-sovereignty",
                "principles",
                "Builds on [[The Practice of Becoming]] daily.",
            ),
            doc(
                "The Practice of Becoming",
                "the-practice-of-becoming",
                "principles",
                "See [[Emotional Sovereignty]] first.",
            ),
        ];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        let to_first = graph.backlinks_for("/library/principles/emotional-sovereignty");
        assert_eq!(to_first.len(), 1);
        assert_eq!(
            to_first[0].canonical,
            "/library/principles/the-practice-of-becoming"
        );
        assert_eq!(to_first[0].title, "The Practice of Becoming");

        let to_second = graph.backlinks_for("/library/principles/the-practice-of-becoming");
        assert_eq!(to_second.len(), 1);
        assert_eq!(
            to_second[0].canonical,
            "/library/principles/emotional-sovereignty"
        );
    }

    #[test]
    fn test_every_eligible_canonical_has_an_entry() {
        let docs = vec![
            doc("Linked To", "linked-to", "essays", ""),
            doc("Lonely", "lonely", "notes", "No links here."),
        ];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        assert!(graph.contains("/library/essays/linked-to"));
        assert!(graph.contains("/engineer/notes/lonely"));
        assert!(graph.backlinks_for("/engineer/notes/lonely").is_empty());
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_self_links_are_excluded() {
        let docs = vec![doc(
            "Recursive",
            "recursive",
            "notes",
            "I cite [[Recursive]] myself.",
        )];
        let graph = build_backlinks(&docs, &build_index(&docs).index);
        assert!(graph.backlinks_for("/engineer/notes/recursive").is_empty());
    }

    #[test]
    fn test_unresolved_targets_are_dropped() {
        let docs = vec![doc(
            "Source",
            "source",
            "essays",
            "Points at [[Non Existent Page]].",
        )];
        let graph = build_backlinks(&docs, &build_index(&docs).index);
        assert_eq!(graph.entry_count(), 0);
    }

    #[test]
    fn test_duplicate_links_produce_duplicate_entries() {
        let docs = vec![
            doc("Target", "target", "essays", ""),
            doc(
                "Source",
                "source",
                "essays",
                "[[target]] early and [[Target]] again.",
            ),
        ];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        let entries = graph.backlinks_for("/library/essays/target");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].canonical, entries[1].canonical);
    }

    #[test]
    fn test_entries_accumulate_in_processing_order() {
        let docs = vec![
            doc("Hub", "hub", "essays", ""),
            doc("First", "first", "notes", "[[hub]]"),
            doc("Second", "second", "notes", "[[hub]] and [[hub]]"),
        ];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        let titles: Vec<&str> = graph
            .backlinks_for("/library/essays/hub")
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Second"]);
    }

    #[test]
    fn test_excerpts_are_bracket_free() {
        let docs = vec![
            doc("Target", "target", "essays", ""),
            doc("Source", "source", "notes", "Context before [[target]] after."),
        ];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        let entries = graph.backlinks_for("/library/essays/target");
        assert_eq!(entries[0].excerpt, "Context before target after.");
    }

    #[test]
    fn test_ineligible_sources_do_not_contribute() {
        let mut draft = doc("Draft", "draft", "notes", "[[Target]]");
        draft.status = Status::Draft;
        let docs = vec![doc("Target", "target", "essays", ""), draft];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        assert!(graph.backlinks_for("/library/essays/target").is_empty());
        assert!(!graph.contains("/engineer/notes/draft"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let docs = vec![
            doc("Target", "target", "essays", ""),
            doc("Source", "source", "notes", "[[target]]"),
        ];
        let graph = build_backlinks(&docs, &build_index(&docs).index);

        let json = serde_json::to_string(&graph).unwrap();
        let restored: BacklinkGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);
    }
}
