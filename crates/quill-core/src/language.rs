use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages the editor knows how to highlight and complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Html,
    Css,
    Json,
    Xml,
    Sql,
    Markdown,
    #[serde(rename = "text")]
    PlainText,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::Python,
        Language::JavaScript,
        Language::Html,
        Language::Css,
        Language::Json,
        Language::Xml,
        Language::Sql,
        Language::Markdown,
        Language::PlainText,
    ];

    /// Resolve a file extension (with or without the leading dot, any case).
    ///
    /// Extensions outside the fixed table are retried as a language name, so
    /// `.python` and `.js` both work. Anything else is plain text.
    pub fn from_extension(ext: &str) -> Self {
        let lower = ext.to_lowercase();
        let with_dot = if lower.starts_with('.') {
            lower
        } else {
            format!(".{lower}")
        };

        match with_dot.as_str() {
            ".py" | ".pyw" => Self::Python,
            ".js" | ".mjs" | ".javascript" => Self::JavaScript,
            ".html" | ".htm" => Self::Html,
            ".css" => Self::Css,
            ".json" => Self::Json,
            ".xml" => Self::Xml,
            ".sql" => Self::Sql,
            ".md" | ".markdown" => Self::Markdown,
            ".txt" | ".text" => Self::PlainText,
            other => Self::from_name(&other[1..]).unwrap_or(Self::PlainText),
        }
    }

    /// Look up a language by name or common alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "python" | "py" | "python3" => Some(Self::Python),
            "javascript" | "js" | "node" => Some(Self::JavaScript),
            "html" | "htm" => Some(Self::Html),
            "css" => Some(Self::Css),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "sql" => Some(Self::Sql),
            "markdown" | "md" => Some(Self::Markdown),
            "text" | "txt" | "plain" | "plaintext" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Infer from a path's extension; `fallback` covers paths without one.
    pub fn for_path(path: &Path, fallback: Language) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => Self::from_extension(ext),
            _ => fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Sql => "sql",
            Self::Markdown => "markdown",
            Self::PlainText => "text",
        }
    }

    /// Extension token used to find the grammar in the syntax set.
    /// `None` means the plain-text tokenizer handles it directly.
    pub(crate) fn syntax_token(&self) -> Option<&'static str> {
        match self {
            Self::Python => Some("py"),
            Self::JavaScript => Some("js"),
            Self::Html => Some("html"),
            Self::Css => Some("css"),
            Self::Json => Some("json"),
            Self::Xml => Some("xml"),
            Self::Sql => Some("sql"),
            Self::Markdown => Some("md"),
            Self::PlainText => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::Python
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
