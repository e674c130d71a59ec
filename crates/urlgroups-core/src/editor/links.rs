//! Clickable-link spans: one span per non-empty line of the editor text.

use std::ops::Range;

/// A line rendered as a link. `range` is the byte range of the whole line
/// text (without the line break) in the editor content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Zero-based line number.
    pub line: usize,
    pub range: Range<usize>,
    /// Raw line text as displayed.
    pub text: String,
}

impl LinkSpan {
    /// Cursor positions at either edge of the line text count as inside.
    pub fn contains(&self, offset: usize) -> bool {
        self.range.start <= offset && offset <= self.range.end
    }
}

/// Scans `text` line by line. Blank lines get no span but still count
/// towards line numbers.
pub fn scan_links(text: &str) -> Vec<LinkSpan> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for (line, raw) in text.split('\n').enumerate() {
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        if !content.trim().is_empty() {
            spans.push(LinkSpan {
                line,
                range: offset..offset + content.len(),
                text: content.to_string(),
            });
        }
        offset += raw.len() + 1;
    }
    spans
}

/// Byte offset of the `char_index`-th character (clamped to the text end).
pub fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
