use std::ops::Range;

use super::token::{Token, TokenCategory};

/// A category applied to a range of buffer characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub category: TokenCategory,
    /// Character offsets into the buffer.
    pub range: Range<usize>,
}

/// The visual tags currently applied to the editing surface.
///
/// Rebuilt wholesale on every highlight pass; tags from a previous pass never
/// survive `apply`.
#[derive(Debug, Default, Clone)]
pub struct TagLayer {
    tags: Vec<Tag>,
}

impl TagLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Replace all tags with one per non-empty token of `tokens`.
    ///
    /// A cursor mark starts at the first character and advances by each
    /// token's length in characters, so byte spans never leak into the
    /// character-addressed layer.
    pub fn apply(&mut self, text: &str, tokens: &[Token]) -> usize {
        self.tags.clear();
        let mut mark = 0usize;
        for token in tokens {
            if token.is_empty() {
                continue;
            }
            let Some(slice) = text.get(token.range.clone()) else {
                tracing::warn!("Token {:?} is outside the buffer, stopping", token.range);
                break;
            };
            let len = slice.chars().count();
            self.tags.push(Tag {
                category: token.category,
                range: mark..mark + len,
            });
            mark += len;
        }
        self.tags.len()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Category covering the character at `char_idx`, if tagged.
    pub fn category_at(&self, char_idx: usize) -> Option<TokenCategory> {
        let pos = self
            .tags
            .partition_point(|tag| tag.range.end <= char_idx);
        self.tags
            .get(pos)
            .filter(|tag| tag.range.contains(&char_idx))
            .map(|tag| tag.category)
    }
}
