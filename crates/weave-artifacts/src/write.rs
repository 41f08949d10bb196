//! Artifact writing and reading.
//!
//! Each artifact is written whole: serialize, then one `fs::write`. There
//! are no partial or append writes and no concurrent writers.

use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};
use weave_document::Document;
use weave_link::{AliasIndex, BacklinkGraph};

use crate::ArtifactError;

/// File name of the full document set artifact.
pub const DOCUMENTS_FILE: &str = "documents.json";
/// File name of the alias index artifact.
pub const LINK_INDEX_FILE: &str = "link-index.json";
/// File name of the backlink graph artifact.
pub const BACKLINKS_FILE: &str = "backlinks.json";

/// Writes the three build artifacts into `dir`, creating it if needed.
///
/// `documents` is persisted as received from the store (full set, input
/// order); the index and graph cover the eligible subset.
pub fn write_artifacts(
    dir: &Path,
    documents: &[Document],
    index: &AliasIndex,
    backlinks: &BacklinkGraph,
) -> Result<(), ArtifactError> {
    fs::create_dir_all(dir).map_err(|source| ArtifactError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    write_json(&dir.join(DOCUMENTS_FILE), &documents)?;
    write_json(&dir.join(LINK_INDEX_FILE), index)?;
    write_json(&dir.join(BACKLINKS_FILE), backlinks)?;
    Ok(())
}

/// Reads the document set artifact.
pub fn read_documents(dir: &Path) -> Result<Vec<Document>, ArtifactError> {
    read_json(&dir.join(DOCUMENTS_FILE))
}

/// Reads the alias index artifact.
pub fn read_index(dir: &Path) -> Result<AliasIndex, ArtifactError> {
    read_json(&dir.join(LINK_INDEX_FILE))
}

/// Reads the backlink graph artifact.
pub fn read_backlinks(dir: &Path) -> Result<BacklinkGraph, ArtifactError> {
    read_json(&dir.join(BACKLINKS_FILE))
}

/// Serializes a value as pretty JSON with a trailing newline and writes it
/// in one shot.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let mut payload = serde_json::to_string_pretty(value)
        .map_err(|source| ArtifactError::Serialize { source })?;
    payload.push('\n');

    fs::write(path, payload).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses one JSON artifact.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_document::{Routes, Status, Visibility, transform};
    use weave_link::{build_backlinks, build_index};

    /// A small two-document corpus with one link between them.
    fn corpus() -> Vec<Document> {
        let routes = Routes::default();
        ["target", "source"]
            .into_iter()
            .map(|slug| {
                let body = if slug == "source" {
                    Some("Links to [[target]].".to_string())
                } else {
                    None
                };
                transform(
                    weave_document::DocumentRow {
                        id: format!("id-{slug}"),
                        user_id: "owner".into(),
                        title: slug.to_uppercase(),
                        slug: slug.into(),
                        content_type: "essays".into(),
                        visibility: Visibility::Public,
                        status: Status::Published,
                        body_md: body,
                        summary: None,
                        order: None,
                        metadata: None,
                        created_at: None,
                        updated_at: None,
                        published_at: None,
                    },
                    &routes,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_artifacts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let documents = corpus();
        let index = build_index(&documents).index;
        let backlinks = build_backlinks(&documents, &index);

        write_artifacts(dir.path(), &documents, &index, &backlinks).unwrap();

        assert_eq!(read_documents(dir.path()).unwrap(), documents);
        assert_eq!(read_index(dir.path()).unwrap(), index);
        assert_eq!(read_backlinks(dir.path()).unwrap(), backlinks);
    }

    #[test]
    fn test_artifacts_are_pretty_and_newline_terminated() {
        let dir = tempfile::tempdir().unwrap();
        let documents = corpus();
        let index = build_index(&documents).index;
        let backlinks = build_backlinks(&documents, &index);

        write_artifacts(dir.path(), &documents, &index, &backlinks).unwrap();

        for name in [DOCUMENTS_FILE, LINK_INDEX_FILE, BACKLINKS_FILE] {
            let contents = fs::read_to_string(dir.path().join(name)).unwrap();
            assert!(contents.ends_with('\n'), "{name} must end with a newline");
            assert!(contents.contains("\n  "), "{name} must be pretty-printed");
        }
    }

    #[test]
    fn test_missing_artifact_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_documents(dir.path()),
            Err(ArtifactError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_artifact_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DOCUMENTS_FILE), "not json").unwrap();
        assert!(matches!(
            read_documents(dir.path()),
            Err(ArtifactError::Parse { .. })
        ));
    }
}
