use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{completion, defaults, editing, highlight, paths};
use crate::error::{QuillError, Result};
use crate::language::Language;

/// Editor configuration. The editor holds an immutable snapshot of this;
/// changing settings means handing it a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub editor: EditorSettings,
    #[serde(default)]
    pub highlight: HighlightSettings,
    #[serde(default)]
    pub completion: CompletionSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    pub theme: String,
    pub font_family: String,
    pub font_size: f32,
    pub indent_width: usize,
    /// Language for untitled documents and paths without an extension.
    pub fallback_language: Language,
    /// Locale used for UI placeholders such as the untitled tab name.
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightSettings {
    pub typed_delay_ms: u64,
    pub programmatic_delay_ms: u64,
    pub paste_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    pub enabled: bool,
    pub retrigger_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: EditorSettings {
                theme: defaults::THEME.to_string(),
                font_family: defaults::FONT_FAMILY.to_string(),
                font_size: defaults::FONT_SIZE,
                indent_width: editing::INDENT_WIDTH,
                fallback_language: Language::from_name(defaults::FALLBACK_LANGUAGE)
                    .unwrap_or_default(),
                locale: defaults::LOCALE.to_string(),
            },
            highlight: HighlightSettings::default(),
            completion: CompletionSettings::default(),
        }
    }
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            typed_delay_ms: highlight::TYPED_DELAY_MS,
            programmatic_delay_ms: highlight::PROGRAMMATIC_DELAY_MS,
            paste_delay_ms: highlight::PASTE_DELAY_MS,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            retrigger_delay_ms: completion::RETRIGGER_DELAY_MS,
        }
    }
}

impl HighlightSettings {
    pub fn typed_delay(&self) -> Duration {
        Duration::from_millis(self.typed_delay_ms)
    }

    pub fn programmatic_delay(&self) -> Duration {
        Duration::from_millis(self.programmatic_delay_ms)
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }
}

impl CompletionSettings {
    pub fn retrigger_delay(&self) -> Duration {
        Duration::from_millis(self.retrigger_delay_ms)
    }
}

impl EditorSettings {
    /// One level of indentation as spaces.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Localized name for documents that have never been saved.
    pub fn untitled_label(&self) -> &'static str {
        match self.locale.as_str() {
            "ru" => "Безымянный",
            _ => "Untitled",
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or does not parse.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring malformed config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Cannot read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| QuillError::Config(e.to_string()))
    }
}
