//! Lexical analysis on top of syntect's bundled grammars.
//!
//! The tokenizer is a pure function of `(text, language)`. Its output covers
//! the input exactly: every byte belongs to exactly one token and tokens are
//! emitted left to right.

use lazy_static::lazy_static;
use syntect::parsing::{ParseState, ScopeStack, SyntaxSet};

use super::token::{Token, TokenCategory};
use crate::error::{QuillError, Result};
use crate::language::Language;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
}

/// Anything that can turn a buffer into a token stream. The highlight pass
/// talks to the tokenizer through this.
pub trait TokenSource {
    fn tokenize(&self, text: &str, language: Language) -> Result<Vec<Token>>;
}

/// Stateless handle over the shared syntax set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Whether a real grammar backs `language` (otherwise plain text is used).
    pub fn has_grammar(&self, language: Language) -> bool {
        language
            .syntax_token()
            .and_then(|token| SYNTAX_SET.find_syntax_by_extension(token))
            .is_some()
    }
}

impl TokenSource for Tokenizer {
    fn tokenize(&self, text: &str, language: Language) -> Result<Vec<Token>> {
        tokenize(text, language)
    }
}

pub fn tokenize(text: &str, language: Language) -> Result<Vec<Token>> {
    let Some(syntax) = language
        .syntax_token()
        .and_then(|token| SYNTAX_SET.find_syntax_by_extension(token))
    else {
        return Ok(plain_text(text));
    };

    let mut state = ParseState::new(syntax);
    let mut scopes = ScopeStack::new();
    let mut tokens: Vec<Token> = Vec::new();
    let mut line_start = 0usize;

    for line in text.split_inclusive('\n') {
        let ops = state
            .parse_line(line, &SYNTAX_SET)
            .map_err(|e| QuillError::tokenize(language.name(), e.to_string()))?;

        let mut cursor = 0usize;
        for (offset, op) in ops {
            let offset = offset.min(line.len());
            if offset > cursor {
                push_token(
                    &mut tokens,
                    category_for(&scopes),
                    line_start + cursor..line_start + offset,
                );
                cursor = offset;
            }
            scopes
                .apply(&op)
                .map_err(|e| QuillError::tokenize(language.name(), format!("{e:?}")))?;
        }

        if cursor < line.len() {
            push_token(
                &mut tokens,
                category_for(&scopes),
                line_start + cursor..line_start + line.len(),
            );
        }
        line_start += line.len();
    }

    Ok(tokens)
}

/// The whole input as one generic-text token.
fn plain_text(text: &str) -> Vec<Token> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Token::new(TokenCategory::Text, 0..text.len())]
}

/// Append a span, merging it into the previous token when the category matches.
fn push_token(tokens: &mut Vec<Token>, category: TokenCategory, range: std::ops::Range<usize>) {
    if range.is_empty() {
        return;
    }
    if let Some(last) = tokens.last_mut() {
        if last.category == category && last.range.end == range.start {
            last.range.end = range.end;
            return;
        }
    }
    tokens.push(Token::new(category, range));
}

fn category_for(scopes: &ScopeStack) -> TokenCategory {
    let names: Vec<String> = scopes.as_slice().iter().map(|s| s.build_string()).collect();

    // Comment and string delimiters belong to the literal, not to punctuation.
    if names.iter().any(|n| n.starts_with("comment")) {
        if names.iter().any(|n| n.starts_with("meta.preprocessor")) {
            return TokenCategory::CommentPreproc;
        }
        return TokenCategory::Comment;
    }
    if names.iter().any(|n| n.starts_with("string")) {
        let escaped = names
            .last()
            .is_some_and(|n| n.starts_with("constant.character.escape"));
        return if escaped {
            TokenCategory::StringEscape
        } else {
            TokenCategory::String
        };
    }

    names
        .iter()
        .rev()
        .find_map(|n| TokenCategory::from_scope(n))
        .unwrap_or(TokenCategory::Text)
}
