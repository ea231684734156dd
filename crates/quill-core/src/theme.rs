use std::collections::HashMap;
use std::ops::Range;

use crate::syntax::{TagLayer, TokenCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: Rgb,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    const fn fg(r: u8, g: u8, b: u8) -> Self {
        Self {
            foreground: Rgb(r, g, b),
            bold: false,
            italic: false,
        }
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A styled run ready for the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub style: TextStyle,
}

/// Category → style table plus the editor chrome colours.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub foreground: Rgb,
    styles: HashMap<TokenCategory, TextStyle>,
}

impl Theme {
    pub fn dark() -> Self {
        let keyword = TextStyle::fg(0x56, 0x9C, 0xD6);
        let types = TextStyle::fg(0x4E, 0xC9, 0xB0);
        let string = TextStyle::fg(0xD6, 0x9D, 0x85);
        let comment = TextStyle::fg(0x6A, 0x99, 0x55).italic();
        let operator = TextStyle::fg(0xB4, 0xB4, 0xB4);
        let number = TextStyle::fg(0xB5, 0xCE, 0xA8);
        let text = TextStyle::fg(0xFF, 0xFF, 0xFF);
        Self {
            name: "Dark",
            background: Rgb(0x1E, 0x1E, 0x1E),
            foreground: Rgb(0xFF, 0xFF, 0xFF),
            styles: HashMap::from([
                (TokenCategory::Keyword, keyword),
                (TokenCategory::KeywordConstant, keyword),
                (TokenCategory::Builtin, types),
                (TokenCategory::Class, types),
                (TokenCategory::Function, TextStyle::fg(0xDC, 0xDC, 0xAA)),
                (TokenCategory::Identifier, text),
                (TokenCategory::String, string),
                (TokenCategory::Comment, comment),
                (TokenCategory::Operator, operator),
                (TokenCategory::Punctuation, operator),
                (TokenCategory::Number, number),
                (TokenCategory::Error, TextStyle::fg(0xF4, 0x47, 0x47)),
                (TokenCategory::Heading, keyword.bold()),
                (TokenCategory::Text, text),
            ]),
        }
    }

    pub fn light() -> Self {
        let keyword = TextStyle::fg(0x00, 0x00, 0xFF);
        let types = TextStyle::fg(0x26, 0x7F, 0x99);
        let text = TextStyle::fg(0x22, 0x22, 0x22);
        Self {
            name: "Light",
            background: Rgb(0xFF, 0xFF, 0xFF),
            foreground: Rgb(0x22, 0x22, 0x22),
            styles: HashMap::from([
                (TokenCategory::Keyword, keyword),
                (TokenCategory::KeywordConstant, keyword),
                (TokenCategory::Builtin, types),
                (TokenCategory::Class, types),
                (TokenCategory::Function, TextStyle::fg(0x79, 0x5E, 0x26)),
                (TokenCategory::Identifier, text),
                (TokenCategory::String, TextStyle::fg(0xA3, 0x15, 0x15)),
                (TokenCategory::Comment, TextStyle::fg(0x00, 0x80, 0x00).italic()),
                (TokenCategory::Operator, TextStyle::fg(0x55, 0x55, 0x55)),
                (TokenCategory::Punctuation, TextStyle::fg(0x55, 0x55, 0x55)),
                (TokenCategory::Number, TextStyle::fg(0x09, 0x86, 0x58)),
                (TokenCategory::Error, TextStyle::fg(0xCD, 0x31, 0x31)),
                (TokenCategory::Heading, keyword.bold()),
                (TokenCategory::Text, text),
            ]),
        }
    }

    pub fn sepia() -> Self {
        let keyword = TextStyle::fg(0x8B, 0x45, 0x13);
        let text = TextStyle::fg(0x3E, 0x2F, 0x1C);
        Self {
            name: "Sepia",
            background: Rgb(0xF4, 0xEC, 0xD8),
            foreground: Rgb(0x3E, 0x2F, 0x1C),
            styles: HashMap::from([
                (TokenCategory::Keyword, keyword),
                (TokenCategory::KeywordConstant, keyword),
                (TokenCategory::Builtin, TextStyle::fg(0x5F, 0x7A, 0x3A)),
                (TokenCategory::Class, TextStyle::fg(0x5F, 0x7A, 0x3A)),
                (TokenCategory::Function, TextStyle::fg(0x7A, 0x4E, 0x1D)),
                (TokenCategory::Identifier, text),
                (TokenCategory::String, TextStyle::fg(0xA0, 0x52, 0x2D)),
                (TokenCategory::Comment, TextStyle::fg(0x8C, 0x7B, 0x5A).italic()),
                (TokenCategory::Operator, TextStyle::fg(0x6B, 0x5B, 0x45)),
                (TokenCategory::Punctuation, TextStyle::fg(0x6B, 0x5B, 0x45)),
                (TokenCategory::Number, TextStyle::fg(0x9A, 0x62, 0x00)),
                (TokenCategory::Error, TextStyle::fg(0xB2, 0x22, 0x22)),
                (TokenCategory::Heading, keyword.bold()),
                (TokenCategory::Text, text),
            ]),
        }
    }

    /// Unknown names fall back to the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "sepia" => Self::sepia(),
            _ => Self::dark(),
        }
    }

    pub fn names() -> &'static [&'static str] {
        &["Dark", "Light", "Sepia"]
    }

    /// Style for a category, walking up to its parent, then plain text.
    pub fn style_for(&self, category: TokenCategory) -> TextStyle {
        self.styles
            .get(&category)
            .or_else(|| category.parent().and_then(|p| self.styles.get(&p)))
            .or_else(|| self.styles.get(&TokenCategory::Text))
            .copied()
            .unwrap_or(TextStyle {
                foreground: self.foreground,
                bold: false,
                italic: false,
            })
    }

    pub fn styled_spans(&self, tags: &TagLayer) -> Vec<StyledSpan> {
        tags.tags()
            .iter()
            .map(|tag| StyledSpan {
                range: tag.range.clone(),
                style: self.style_for(tag.category),
            })
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
