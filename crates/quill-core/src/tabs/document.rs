use std::path::{Path, PathBuf};

use crate::language::Language;

/// One open document. `content` is only authoritative while the document is
/// not the active tab; the live text sits in the editor's buffer otherwise.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub display_name: String,
    pub content: String,
    pub dirty: bool,
    pub language: Language,
}

impl Document {
    pub fn untitled(label: &str, language: Language) -> Self {
        Self {
            path: None,
            display_name: label.to_string(),
            content: String::new(),
            dirty: false,
            language,
        }
    }

    /// Read `path` as UTF-8, replacing invalid sequences.
    pub fn from_file(path: PathBuf, fallback: Language) -> std::io::Result<Self> {
        let bytes = std::fs::read(&path)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self {
            display_name: display_name_for(&path),
            language: Language::for_path(&path, fallback),
            path: Some(path),
            content,
            dirty: false,
        })
    }

    /// Point the document at a new path, re-inferring its language.
    /// Returns true when the language changed.
    pub fn assign_path(&mut self, path: PathBuf, fallback: Language) -> bool {
        let language = Language::for_path(&path, fallback);
        self.display_name = display_name_for(&path);
        self.path = Some(path);
        let changed = language != self.language;
        self.language = language;
        changed
    }

    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }
}

fn display_name_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
