use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Classification of a token. A closed set; themes map each member to a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    Keyword,
    KeywordConstant,
    Identifier,
    Function,
    Class,
    Builtin,
    String,
    StringEscape,
    Comment,
    CommentPreproc,
    Operator,
    Number,
    NumberFloat,
    Punctuation,
    Error,
    Heading,
    Text,
}

impl TokenCategory {
    pub const ALL: &'static [TokenCategory] = &[
        TokenCategory::Keyword,
        TokenCategory::KeywordConstant,
        TokenCategory::Identifier,
        TokenCategory::Function,
        TokenCategory::Class,
        TokenCategory::Builtin,
        TokenCategory::String,
        TokenCategory::StringEscape,
        TokenCategory::Comment,
        TokenCategory::CommentPreproc,
        TokenCategory::Operator,
        TokenCategory::Number,
        TokenCategory::NumberFloat,
        TokenCategory::Punctuation,
        TokenCategory::Error,
        TokenCategory::Heading,
        TokenCategory::Text,
    ];

    /// Tag name applied to buffer ranges of this category.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Keyword => "token.keyword",
            Self::KeywordConstant => "token.keyword.constant",
            Self::Identifier => "token.name",
            Self::Function => "token.name.function",
            Self::Class => "token.name.class",
            Self::Builtin => "token.name.builtin",
            Self::String => "token.literal.string",
            Self::StringEscape => "token.literal.string.escape",
            Self::Comment => "token.comment",
            Self::CommentPreproc => "token.comment.preproc",
            Self::Operator => "token.operator",
            Self::Number => "token.literal.number",
            Self::NumberFloat => "token.literal.number.float",
            Self::Punctuation => "token.punctuation",
            Self::Error => "token.error",
            Self::Heading => "token.generic.heading",
            Self::Text => "token.text",
        }
    }

    /// The broader category a variant refines, if any.
    pub fn parent(&self) -> Option<TokenCategory> {
        match self {
            Self::KeywordConstant => Some(Self::Keyword),
            Self::StringEscape => Some(Self::String),
            Self::CommentPreproc => Some(Self::Comment),
            Self::NumberFloat => Some(Self::Number),
            Self::Function | Self::Class | Self::Builtin => Some(Self::Identifier),
            _ => None,
        }
    }

    /// Map a single TextMate scope name onto the taxonomy.
    pub(crate) fn from_scope(scope: &str) -> Option<TokenCategory> {
        let category = if scope.starts_with("invalid") {
            Self::Error
        } else if scope.starts_with("markup.heading") || scope.starts_with("entity.name.section") {
            Self::Heading
        } else if scope.starts_with("keyword.operator") {
            Self::Operator
        } else if scope.starts_with("keyword") || scope.starts_with("storage") {
            Self::Keyword
        } else if scope.starts_with("entity.name.tag") {
            Self::Keyword
        } else if scope.starts_with("constant.language") {
            Self::KeywordConstant
        } else if scope.starts_with("constant.numeric.float") {
            Self::NumberFloat
        } else if scope.starts_with("constant.numeric") {
            Self::Number
        } else if scope.starts_with("support.function")
            || scope.starts_with("support.type")
            || scope.starts_with("support.class")
            || scope.starts_with("variable.language")
        {
            Self::Builtin
        } else if scope.starts_with("entity.name.function") {
            Self::Function
        } else if scope.starts_with("entity.name.class") || scope.starts_with("entity.name.type") {
            Self::Class
        } else if scope.starts_with("punctuation") {
            Self::Punctuation
        } else if scope.starts_with("variable")
            || scope.starts_with("entity.other.attribute-name")
            || scope.starts_with("meta.generic-name")
        {
            Self::Identifier
        } else {
            return None;
        };
        Some(category)
    }
}

/// A classified span of the tokenized text. `range` is in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub category: TokenCategory,
    pub range: Range<usize>,
}

impl Token {
    pub fn new(category: TokenCategory, range: Range<usize>) -> Self {
        Self { category, range }
    }

    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}
