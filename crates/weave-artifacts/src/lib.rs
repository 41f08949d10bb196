//! Build artifact persistence and content queries.
//!
//! A build emits three JSON files — `documents.json`, `link-index.json`,
//! `backlinks.json` — pretty-printed and newline-terminated, written whole.
//! The read side loads them back for page generation: [`ContentSet`]
//! answers the queries templates ask (by canonical, by collection, recent,
//! backlinks for a page) over the eligible subset.

#![warn(missing_docs)]

mod content;
mod error;
mod write;

pub use content::{ContentSet, document_date, sort_by_date_desc};
pub use error::ArtifactError;
pub use write::{
    BACKLINKS_FILE, DOCUMENTS_FILE, LINK_INDEX_FILE, read_backlinks, read_documents, read_index,
    write_artifacts,
};
