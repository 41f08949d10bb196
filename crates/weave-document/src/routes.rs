//! Content-type routing table.
//!
//! Maps content types to URL base paths. The table is an explicit value
//! passed to whoever derives canonicals, never ambient state. A built-in
//! default covers the site's sections; `weave build --routes` can replace it
//! with a table loaded from TOML.

use std::{collections::BTreeMap, fs, path::Path};

use crate::DocumentError;

/// The section landing pages, in site order.
pub const LANDING_PAGES: [&str; 4] = ["/library", "/engineer", "/artist", "/mentor"];

/// Immutable mapping from content type to URL base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    /// Content type -> base path, e.g. `principles` -> `/library/principles`.
    table: BTreeMap<String, String>,
}

impl Default for Routes {
    fn default() -> Self {
        let entries = [
            ("principles", "/library/principles"),
            ("fragments", "/library/fragments"),
            ("essays", "/library/essays"),
            ("directives", "/library/directives"),
            ("everyday", "/library/everyday"),
            ("references", "/library/references"),
            ("books", "/library/books"),
            ("linked", "/library/linked"),
            ("projects", "/engineer/projects"),
            ("notes", "/engineer/notes"),
            ("poetry", "/artist/poetry"),
            ("artwork", "/artist/artwork"),
            ("broadcasts", "/mentor/broadcasts"),
            ("letters", "/mentor/letters"),
            ("diary", "/private/diary"),
        ];
        Self {
            table: entries
                .into_iter()
                .map(|(content_type, base)| (content_type.to_string(), base.to_string()))
                .collect(),
        }
    }
}

impl Routes {
    /// Creates a route table from an explicit content type -> base path map.
    pub fn new(table: BTreeMap<String, String>) -> Self {
        Self { table }
    }

    /// Parses a route table from TOML.
    ///
    /// The format is a flat table of content type to base path:
    ///
    /// ```toml
    /// principles = "/library/principles"
    /// projects = "/engineer/projects"
    /// ```
    pub fn from_toml_str(input: &str) -> Result<Self, DocumentError> {
        let table: BTreeMap<String, String> =
            toml::from_str(input).map_err(|source| DocumentError::ParseRoutes { source })?;
        Ok(Self { table })
    }

    /// Loads a route table from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path).map_err(|source| DocumentError::ReadRoutes {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Returns the base path for a content type, if routed.
    pub fn base_path(&self, content_type: &str) -> Option<&str> {
        self.table.get(content_type).map(String::as_str)
    }

    /// Builds the canonical site path for a document: `{base_path}/{slug}`.
    ///
    /// Slugs are assumed URL-safe upstream; no escaping is performed.
    /// Unrouted content types are an error rather than a silent fallback.
    pub fn canonical(&self, content_type: &str, slug: &str) -> Result<String, DocumentError> {
        let base = self
            .base_path(content_type)
            .ok_or_else(|| DocumentError::UnknownContentType {
                content_type: content_type.to_string(),
            })?;
        Ok(format!("{base}/{slug}"))
    }

    /// Builds the collection path for a content type: the base path without
    /// its leading slash, e.g. `library/principles`.
    pub fn collection(&self, content_type: &str) -> Result<String, DocumentError> {
        let base = self
            .base_path(content_type)
            .ok_or_else(|| DocumentError::UnknownContentType {
                content_type: content_type.to_string(),
            })?;
        Ok(base.trim_start_matches('/').to_string())
    }

    /// Returns the content types routed beneath a landing page, in table
    /// order.
    pub fn content_types_for_landing(&self, landing: &str) -> Vec<&str> {
        let prefix = landing.trim_end_matches('/');
        self.table
            .iter()
            .filter(|(_, base)| {
                base.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(|(content_type, _)| content_type.as_str())
            .collect()
    }

    /// Returns an iterator over (content type, base path) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table
            .iter()
            .map(|(content_type, base)| (content_type.as_str(), base.as_str()))
    }
}
