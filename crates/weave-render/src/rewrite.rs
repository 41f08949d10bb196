//! The wiki-link rewrite pass.
//!
//! A pure function from one text event to a replacement event sequence,
//! flat-mapped over the parser's event stream. The pass never mutates a
//! list it is iterating and never re-scans its own output: each source text
//! node is visited exactly once.

use pulldown_cmark::{Event, Tag, TagEnd};
use pulldown_cmark_escape::{escape_href, escape_html_body_text};
use weave_link::{AliasIndex, WikiLink, wiki_links};

/// Rewrites wiki-links in an event stream, producing a new stream.
///
/// Text inside code blocks passes through untouched; inline code arrives as
/// its own event kind and is never inspected.
pub fn rewrite_events<'a>(
    events: impl Iterator<Item = Event<'a>>,
    index: &AliasIndex,
) -> Vec<Event<'a>> {
    let mut output = Vec::new();
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                output.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                output.push(event);
            }
            Event::Text(ref text) if !in_code_block && text.contains("[[") => {
                output.extend(rewrite_text(text, index));
            }
            other => output.push(other),
        }
    }

    output
}

/// Maps one text span to zero-or-more replacement events.
///
/// Non-link text is preserved verbatim, split only at match boundaries.
/// Each occurrence becomes an anchor (resolved) or a broken-link span
/// (unresolved).
pub fn rewrite_text(text: &str, index: &AliasIndex) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut cursor_byte = 0;
    let mut cursor_char = 0;

    for link in wiki_links(text) {
        let rest = &text[cursor_byte..];
        let lead_bytes = char_to_byte(rest, link.position - cursor_char);
        if lead_bytes > 0 {
            events.push(Event::Text(rest[..lead_bytes].to_string().into()));
        }

        events.push(link_markup(&link, index));

        // `[[`, `]]`, and the optional `|` bound the raw slices, so the
        // match length is recoverable without re-scanning.
        let extra = link.display.map_or(0, |d| d.len() + 1);
        let extra_chars = link.display.map_or(0, |d| d.chars().count() + 1);
        cursor_byte += lead_bytes + 4 + link.target.len() + extra;
        cursor_char = link.position + 4 + link.target.chars().count() + extra_chars;
    }

    if cursor_byte < text.len() {
        events.push(Event::Text(text[cursor_byte..].to_string().into()));
    }

    events
}

/// Renders a single occurrence as inline HTML.
fn link_markup(link: &WikiLink<'_>, index: &AliasIndex) -> Event<'static> {
    let mut html = String::new();

    match index.resolve(link.target) {
        Some(canonical) => {
            html.push_str("<a href=\"");
            escape_href(&mut html, canonical).expect("writing to a String cannot fail");
            html.push_str("\" class=\"wiki-link\">");
            escape_html_body_text(&mut html, link.label())
                .expect("writing to a String cannot fail");
            html.push_str("</a>");
        }
        None => {
            html.push_str("<span class=\"wiki-link-broken\" title=\"Page not found\">");
            escape_html_body_text(&mut html, link.label())
                .expect("writing to a String cannot fail");
            html.push_str("</span>");
        }
    }

    Event::InlineHtml(html.into())
}

/// Byte offset of the nth character in `text` (its length when past the
/// end).
fn char_to_byte(text: &str, nth: usize) -> usize {
    text.char_indices().nth(nth).map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An index with one known alias.
    fn index() -> AliasIndex {
        let mut index = AliasIndex::new();
        index.insert("hub", "/library/essays/hub");
        index
    }

    /// Flattens text events back into a string for comparison.
    fn text_of(events: &[Event<'_>]) -> String {
        events
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_plain_text_passes_through() {
        let events = rewrite_text("no links here", &index());
        assert_eq!(events.len(), 1);
        assert_eq!(text_of(&events), "no links here");
    }

    #[test]
    fn test_split_preserves_surrounding_text() {
        let events = rewrite_text("before [[hub]] after", &index());
        assert_eq!(events.len(), 3);
        assert_eq!(text_of(&events), "before  after");
        assert!(matches!(events[1], Event::InlineHtml(_)));
    }

    #[test]
    fn test_link_at_start_and_end() {
        let events = rewrite_text("[[hub]] middle [[hub]]", &index());
        assert_eq!(events.len(), 3);
        assert_eq!(text_of(&events), " middle ");
    }

    #[test]
    fn test_display_length_accounted_for() {
        let events = rewrite_text("x [[hub|Hub Essay]] y", &index());
        assert_eq!(text_of(&events), "x  y");
    }

    #[test]
    fn test_multibyte_text_around_links() {
        let events = rewrite_text("héllo [[hub]] wörld", &index());
        assert_eq!(text_of(&events), "héllo  wörld");
    }

    #[test]
    fn test_malformed_sequences_stay_text() {
        let events = rewrite_text("a [[unclosed b ] and ]] stray", &index());
        assert_eq!(events.len(), 1);
        assert_eq!(text_of(&events), "a [[unclosed b ] and ]] stray");
    }

    #[test]
    fn test_label_is_escaped() {
        let events = rewrite_text("[[<b>bold</b>]]", &index());
        let Event::InlineHtml(html) = &events[0] else {
            panic!("expected inline html");
        };
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_code_block_state_tracked() {
        use pulldown_cmark::Parser;

        let parser = Parser::new("```\n[[hub]]\n```\n\n[[hub]]");
        let events = rewrite_events(parser, &index());

        let inline_count = events
            .iter()
            .filter(|event| matches!(event, Event::InlineHtml(_)))
            .count();
        assert_eq!(inline_count, 1);
    }
}
