//! Row to document transformation.
//!
//! Adds the derived `canonical` and `collection` fields to store rows. The
//! transform is the only place derivation happens; everything downstream
//! (alias index, backlink graph, artifacts) consumes the derived fields.

use crate::{Document, DocumentError, DocumentRow, Routes};

/// Transforms a store row into a document with derived routing fields.
///
/// Fails when the row's content type is not in the route table. The `user_id`
/// and `order` fields are dropped; they identify the corpus and order rows
/// server-side but play no part in the published artifacts.
pub fn transform(row: DocumentRow, routes: &Routes) -> Result<Document, DocumentError> {
    let canonical = routes.canonical(&row.content_type, &row.slug)?;
    let collection = routes.collection(&row.content_type)?;

    Ok(Document {
        id: row.id,
        title: row.title,
        slug: row.slug,
        content_type: row.content_type,
        collection,
        visibility: row.visibility,
        status: row.status,
        canonical,
        body_md: row.body_md.unwrap_or_default(),
        summary: row.summary,
        metadata: row.metadata,
        created_at: row.created_at,
        updated_at: row.updated_at,
        published_at: row.published_at,
    })
}

/// Transforms a batch of rows, preserving input order.
///
/// The first unroutable row aborts the whole batch.
pub fn transform_all(
    rows: impl IntoIterator<Item = DocumentRow>,
    routes: &Routes,
) -> Result<Vec<Document>, DocumentError> {
    rows.into_iter().map(|row| transform(row, routes)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Status, Visibility};

    /// A routed row with the given slug and content type.
    fn row(slug: &str, content_type: &str) -> DocumentRow {
        DocumentRow {
            id: format!("id-{slug}"),
            user_id: "owner".into(),
            title: slug.replace('-', " "),
            slug: slug.into(),
            content_type: content_type.into(),
            visibility: Visibility::Public,
            status: Status::Published,
            body_md: Some("Body.".into()),
            summary: None,
            order: None,
            metadata: None,
            created_at: None,
            updated_at: None,
            published_at: Some("2025-11-02T09:00:00+00:00".into()),
        }
    }

    #[test]
    fn test_transform_derives_canonical_and_collection() {
        let doc = transform(row("emotional-sovereignty", "principles"), &Routes::default())
            .unwrap();
        assert_eq!(doc.canonical, "/library/principles/emotional-sovereignty");
        assert_eq!(doc.collection, "library/principles");
    }

    #[test]
    fn test_transform_missing_body_becomes_empty() {
        let mut input = row("sparse", "notes");
        input.body_md = None;
        let doc = transform(input, &Routes::default()).unwrap();
        assert_eq!(doc.body_md, "");
    }

    #[test]
    fn test_transform_all_preserves_order() {
        let docs = transform_all(
            vec![row("b", "essays"), row("a", "essays")],
            &Routes::default(),
        )
        .unwrap();
        let slugs: Vec<&str> = docs.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_transform_all_fails_fast_on_unknown_type() {
        let result = transform_all(
            vec![row("ok", "essays"), row("bad", "unrouted")],
            &Routes::default(),
        );
        assert!(result.is_err());
    }
}
