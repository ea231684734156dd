//! Auto-indent and bracket pairing.

use crate::buffer::TextBuffer;
use crate::constants::editing::{AUTO_PAIRS, INDENT_OPENERS};

/// Closing character inserted alongside `open`, if it is a paired opener.
pub fn closing_pair(open: char) -> Option<char> {
    AUTO_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, close)| *close)
}

/// Indentation for the line that Enter is about to open.
///
/// Leading whitespace comes from the nearest non-blank line at or above the
/// caret line. One more `indent_unit` is added when the caret line ends with a
/// block opener after trimming trailing whitespace.
pub fn newline_indent(buffer: &TextBuffer, indent_unit: &str) -> String {
    let caret_line = buffer.caret().line;

    let mut indent: String = (0..=caret_line)
        .rev()
        .map(|n| buffer.line_text(n))
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect()
        })
        .unwrap_or_default();

    let current = buffer.line_text(caret_line);
    if current
        .trim_end()
        .ends_with(|c: char| INDENT_OPENERS.contains(&c))
    {
        indent.push_str(indent_unit);
    }
    indent
}

/// Break the line at the caret and indent the new line.
pub fn insert_newline(buffer: &mut TextBuffer, indent_unit: &str) {
    let indent = newline_indent(buffer, indent_unit);
    buffer.insert_str(&format!("\n{indent}"));
}

/// Insert `open` and its closer with the caret between them. Returns false
/// when `open` is not a paired character.
pub fn insert_pair(buffer: &mut TextBuffer, open: char) -> bool {
    match closing_pair(open) {
        Some(close) => {
            buffer.insert_pair(open, close);
            true
        }
        None => false,
    }
}
