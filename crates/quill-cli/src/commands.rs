use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use quill_core::{
    driver, tokenize, Candidate, Editor, InputEvent, Language, Settings, TokenCategory,
};

use crate::render::render_ansi;

/// Open `path` in a fresh editor and run one highlight pass.
fn open_highlighted(path: &Path, settings: Settings) -> Result<Editor> {
    let mut editor = Editor::new(settings);
    editor
        .open_file(path.to_path_buf())
        .with_context(|| format!("cannot open {}", path.display()))?;
    Ok(editor)
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The file with ANSI colours from the configured theme, or `theme` if given.
/// `plain` returns the buffer text as loaded, with no colours.
pub fn highlight(
    path: &Path,
    theme: Option<&str>,
    plain: bool,
    settings: Settings,
) -> Result<String> {
    let mut editor = open_highlighted(path, settings)?;
    if plain {
        return Ok(editor.text());
    }
    if let Some(name) = theme {
        editor.set_theme(name);
    }
    Ok(render_ansi(&editor.text(), &editor.styled_spans()))
}

#[derive(Debug, Serialize)]
pub struct TokenRow {
    pub category: TokenCategory,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Token stream for a file. The language comes from the extension unless
/// `language` names one.
pub fn tokens(path: &Path, language: Option<&str>, fallback: Language) -> Result<Vec<TokenRow>> {
    let source = read_source(path)?;
    let language = match language {
        Some(name) => match Language::from_name(name) {
            Some(language) => language,
            None => bail!("unknown language {name:?}"),
        },
        None => Language::for_path(path, fallback),
    };
    let rows = tokenize(&source, language)?
        .into_iter()
        .map(|token| TokenRow {
            category: token.category,
            start: token.range.start,
            end: token.range.end,
            text: token.text(&source).to_string(),
        })
        .collect();
    Ok(rows)
}

pub fn format_tokens(rows: &[TokenRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{:>6}..{:<6} {:<18} {:?}",
                row.start,
                row.end,
                row.category.tag_name(),
                row.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Candidates at a 1-based `line`/`col` in `path`.
pub fn complete(
    path: &Path,
    line: usize,
    col: usize,
    settings: Settings,
) -> Result<Vec<Candidate>> {
    if line == 0 || col == 0 {
        bail!("line and column are 1-based");
    }
    let mut editor = open_highlighted(path, settings)?;
    editor.handle(
        InputEvent::ClickText {
            line: line - 1,
            col: col - 1,
        },
        Instant::now(),
    )?;
    editor.show_completions();
    Ok(editor.popup().candidates().to_vec())
}

/// One scripted event, sent after `delay_ms`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(flatten)]
    pub event: InputEvent,
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>> {
    serde_json::from_str(json).context("invalid replay script")
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub text: String,
    pub language: Language,
    pub tabs: Vec<String>,
    pub dirty: bool,
    pub highlight_passes: u64,
    pub popup: Vec<Candidate>,
}

/// Feed a script through the async driver, optionally starting from `file`.
pub async fn replay(
    steps: Vec<ScriptStep>,
    file: Option<PathBuf>,
    settings: Settings,
) -> Result<ReplayReport> {
    let mut editor = Editor::new(settings);
    if let Some(path) = file {
        editor
            .open_file(path.clone())
            .with_context(|| format!("cannot open {}", path.display()))?;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(driver::run(editor, rx));
    for step in steps {
        if step.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
        }
        if tx.send(step.event).is_err() {
            bail!("editor stopped before the script finished");
        }
    }
    drop(tx);
    let editor = handle.await.context("editor task failed")?;

    Ok(ReplayReport {
        text: editor.text(),
        language: editor.language(),
        tabs: editor
            .tabs()
            .documents()
            .iter()
            .map(|doc| doc.display_name.clone())
            .collect(),
        dirty: editor.tabs().active().is_some_and(|doc| doc.dirty),
        highlight_passes: editor.scheduler().passes(),
        popup: editor.popup().candidates().to_vec(),
    })
}

/// Effective settings as TOML, preceded by the file they come from.
pub fn show_config(settings: &Settings, path: &Path) -> Result<String> {
    let body = settings.to_toml()?;
    Ok(format!("# {}\n{}", path.display(), body))
}
