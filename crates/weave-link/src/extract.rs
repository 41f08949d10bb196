//! Wiki-link scanning.
//!
//! A wiki-link is delimited by `[[` and `]]`. An optional `|` inside splits
//! the span into a target (before) and display text (after). The target may
//! not contain `]` or `|`; the display text may not contain `]`. The scanner
//! walks left to right, never matches overlapping occurrences, and treats
//! malformed sequences (unterminated `[[`, stray `]]`, empty target or
//! display) as plain text: they are simply not yielded.

/// A single wiki-link occurrence in a body of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink<'a> {
    /// Raw reference text between `[[` and the `|` or `]]`.
    pub target: &'a str,
    /// Display override text between `|` and `]]`, if present.
    pub display: Option<&'a str>,
    /// Zero-based character offset of the opening `[[`.
    pub position: usize,
}

impl WikiLink<'_> {
    /// The text a reader sees: the display override if present, else the
    /// target itself.
    pub fn label(&self) -> &str {
        self.display.unwrap_or(self.target)
    }
}

/// Returns a scanner over all wiki-links in `body`.
///
/// The scan is lazy and restartable: calling this again on the same body
/// yields an identical sequence.
pub fn wiki_links(body: &str) -> WikiLinks<'_> {
    WikiLinks {
        body,
        byte_pos: 0,
        char_pos: 0,
    }
}

/// Iterator over wiki-link occurrences, in source order.
#[derive(Debug, Clone)]
pub struct WikiLinks<'a> {
    /// The full text being scanned.
    body: &'a str,
    /// Byte offset of the scan cursor.
    byte_pos: usize,
    /// Character offset corresponding to `byte_pos`.
    char_pos: usize,
}

impl<'a> WikiLinks<'a> {
    /// Attempts to match a complete wiki-link with the cursor on `[[`.
    ///
    /// Returns the link plus the byte length of the whole match.
    fn try_match(&self) -> Option<(WikiLink<'a>, usize)> {
        let inner = &self.body[self.byte_pos + 2..];

        // Target runs to the first ']' or '|' and must be non-empty.
        let target_end = inner.find([']', '|'])?;
        if target_end == 0 {
            return None;
        }
        let target = &inner[..target_end];

        // Optional display text after '|', running to the first ']' and
        // also non-empty.
        let (display, close_start) = if inner[target_end..].starts_with('|') {
            let display_text = &inner[target_end + 1..];
            let display_end = display_text.find(']')?;
            if display_end == 0 {
                return None;
            }
            (
                Some(&display_text[..display_end]),
                target_end + 1 + display_end,
            )
        } else {
            (None, target_end)
        };

        if !inner[close_start..].starts_with("]]") {
            return None;
        }

        let link = WikiLink {
            target,
            display,
            position: self.char_pos,
        };
        Some((link, 2 + close_start + 2))
    }
}

impl<'a> Iterator for WikiLinks<'a> {
    type Item = WikiLink<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.body[self.byte_pos..];
            let open = rest.find("[[")?;

            // Move the cursor onto the opening brackets, keeping the
            // character offset in step with the byte offset.
            self.char_pos += rest[..open].chars().count();
            self.byte_pos += open;

            match self.try_match() {
                Some((link, matched_bytes)) => {
                    let matched = &self.body[self.byte_pos..self.byte_pos + matched_bytes];
                    self.char_pos += matched.chars().count();
                    self.byte_pos += matched_bytes;
                    return Some(link);
                }
                None => {
                    // Not a link here; resume the scan one character in so
                    // a later `[` can still open a match.
                    self.byte_pos += 1;
                    self.char_pos += 1;
                }
            }
        }
    }
}
