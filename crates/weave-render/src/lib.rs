//! Markdown rendering with wiki-link resolution.
//!
//! Rendering parses a markdown body with pulldown-cmark, rewrites wiki-link
//! occurrences in text events against an [`AliasIndex`], and serializes the
//! resulting event stream to HTML. Resolved links become anchors carrying
//! the `wiki-link` class; unresolved targets become inert
//! `wiki-link-broken` spans. Everything around the links — including code
//! blocks and inline code, where wiki-links stay literal — passes through
//! untouched.

#![warn(missing_docs)]

mod rewrite;

use pulldown_cmark::{Options, Parser, html};
use weave_link::AliasIndex;

pub use rewrite::{rewrite_events, rewrite_text};

/// Renders a markdown body to HTML, resolving wiki-links along the way.
pub fn render_html(body: &str, index: &AliasIndex) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(body, options);
    let events = rewrite_events(parser, index);

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}
