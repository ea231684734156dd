use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokenizer error: {language}: {message}")]
    Tokenize { language: String, message: String },

    #[error("No active tab")]
    NoActiveTab,

    #[error("Tab index out of range ({0})")]
    TabIndex(usize),

    #[error("{0}")]
    Other(String),
}

impl QuillError {
    pub fn tokenize(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tokenize {
            language: language.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuillError>;
