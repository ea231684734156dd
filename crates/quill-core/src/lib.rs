pub mod buffer;
pub mod completion;
pub mod config;
pub mod constants;
pub mod driver;
pub mod editing;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod input;
pub mod language;
pub mod syntax;
pub mod tabs;
pub mod theme;

// Re-export key types
pub use buffer::{Caret, Motion, TextBuffer};
pub use completion::{Candidate, CandidateSource, CompletionEngine, PopupController, PopupState};
pub use config::Settings;
pub use editor::Editor;
pub use error::{QuillError, Result};
pub use highlight::{EditKind, EditTrigger, HighlightScheduler, PassOutcome};
pub use input::{InputEvent, Key};
pub use language::Language;
pub use syntax::{tokenize, Tag, TagLayer, Token, TokenCategory, TokenSource, Tokenizer};
pub use tabs::{Document, TabBarObserver, TabBarView, TabEntry, TabSet};
pub use theme::Theme;
