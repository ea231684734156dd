//! Inline autocomplete: candidate computation and the popup state machine.

mod engine;
mod popup;
pub mod scrape;
pub mod vocab;

use serde::Serialize;

use crate::buffer::TextBuffer;

pub use engine::{commit, CompletionEngine};
pub use popup::{PopupAction, PopupController, PopupState};

/// Where a candidate came from. Earlier variants win when the same text is
/// offered by several sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    Builtin,
    Keyword,
    Vocabulary,
    Scraped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub text: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(text: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// Builtins get a call suffix on commit unless they already open one.
    pub fn wants_call_parens(&self) -> bool {
        self.source == CandidateSource::Builtin && !self.text.ends_with('(')
    }
}

/// The word around the caret: `[start, end)` in character columns of `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Word under the caret, scanning both ways over word characters.
/// `None` when the caret is not touching a word.
pub fn current_word(buffer: &TextBuffer) -> Option<WordSpan> {
    let caret = buffer.caret();
    let chars: Vec<char> = buffer.line_text(caret.line).chars().collect();
    let col = caret.col.min(chars.len());

    let mut start = col;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = col;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    if start == end {
        return None;
    }
    Some(WordSpan {
        line: caret.line,
        start,
        end,
        text: chars[start..end].iter().collect(),
    })
}
