//! Open documents and the active one.
//!
//! The live text of the active document lives in a [`TextBuffer`] owned by the
//! caller; every operation that changes which document is active takes that
//! buffer so the outgoing document is flushed before the incoming one loads.

mod document;

use std::path::PathBuf;

use crate::buffer::TextBuffer;
use crate::error::{QuillError, Result};
use crate::language::Language;

pub use document::Document;

/// What the tab bar shows for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub title: String,
    pub dirty: bool,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabBarView {
    pub entries: Vec<TabEntry>,
    pub active: Option<usize>,
}

/// Receives a fresh view whenever the tab list, the active tab or a dirty
/// flag changes.
pub trait TabBarObserver {
    fn tabs_changed(&mut self, view: &TabBarView);
}

pub struct TabSet {
    documents: Vec<Document>,
    active: Option<usize>,
    fallback_language: Language,
    untitled_label: String,
    observer: Option<Box<dyn TabBarObserver + Send>>,
}

impl TabSet {
    pub fn new(fallback_language: Language, untitled_label: impl Into<String>) -> Self {
        Self {
            documents: Vec::new(),
            active: None,
            fallback_language,
            untitled_label: untitled_label.into(),
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn TabBarObserver + Send>) {
        self.observer = Some(observer);
        self.notify();
    }

    pub fn set_defaults(&mut self, fallback_language: Language, untitled_label: impl Into<String>) {
        self.fallback_language = fallback_language;
        self.untitled_label = untitled_label.into();
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|i| self.documents.get(i))
    }

    pub fn active_language(&self) -> Language {
        self.active()
            .map(|doc| doc.language)
            .unwrap_or(self.fallback_language)
    }

    pub fn view(&self) -> TabBarView {
        TabBarView {
            entries: self
                .documents
                .iter()
                .map(|doc| TabEntry {
                    title: doc.display_name.clone(),
                    dirty: doc.dirty,
                    path: doc.path.clone(),
                })
                .collect(),
            active: self.active,
        }
    }

    /// Open `path`, or switch to it if it is already open.
    /// On a read error nothing in the tab set changes.
    pub fn open_file(&mut self, path: PathBuf, live: &mut TextBuffer) -> Result<usize> {
        if let Some(i) = self
            .documents
            .iter()
            .position(|doc| doc.path.as_ref() == Some(&path))
        {
            self.switch_to(i, live)?;
            return Ok(i);
        }
        let doc = Document::from_file(path, self.fallback_language)?;
        tracing::debug!("Opened {} as {}", doc.display_name, doc.language);
        Ok(self.push_and_activate(doc, live))
    }

    pub fn new_untitled(&mut self, live: &mut TextBuffer) -> usize {
        let doc = Document::untitled(&self.untitled_label, self.fallback_language);
        self.push_and_activate(doc, live)
    }

    fn push_and_activate(&mut self, doc: Document, live: &mut TextBuffer) -> usize {
        self.flush(live);
        live.set_text(&doc.content);
        self.documents.push(doc);
        let idx = self.documents.len() - 1;
        self.active = Some(idx);
        self.notify();
        idx
    }

    /// Make `index` active: the outgoing document receives the live text, then
    /// the incoming document's content is loaded into `live`.
    pub fn switch_to(&mut self, index: usize, live: &mut TextBuffer) -> Result<()> {
        if index >= self.documents.len() {
            return Err(QuillError::TabIndex(index));
        }
        if self.active == Some(index) {
            return Ok(());
        }
        self.flush(live);
        live.set_text(&self.documents[index].content);
        self.active = Some(index);
        self.notify();
        Ok(())
    }

    /// Close `index`. Closing the active tab activates its left neighbour, or
    /// the new first tab, and clears `live` when nothing remains.
    pub fn close(&mut self, index: usize, live: &mut TextBuffer) -> Result<()> {
        if index >= self.documents.len() {
            return Err(QuillError::TabIndex(index));
        }
        self.documents.remove(index);
        match self.active {
            Some(active) if active == index => {
                if self.documents.is_empty() {
                    self.active = None;
                    live.set_text("");
                } else {
                    let next = index.saturating_sub(1);
                    self.active = Some(next);
                    live.set_text(&self.documents[next].content);
                }
            }
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
        self.notify();
        Ok(())
    }

    /// Flag the active document as modified.
    pub fn mark_dirty(&mut self) {
        let Some(doc) = self.active.and_then(|i| self.documents.get_mut(i)) else {
            return;
        };
        if !doc.dirty {
            doc.dirty = true;
            self.notify();
        }
    }

    /// Write the live text of the active document. `path` turns this into a
    /// save-as. Returns true when the document's language changed.
    ///
    /// On a write error the document keeps its dirty flag and its old path.
    pub fn save_active(&mut self, path: Option<PathBuf>, live: &TextBuffer) -> Result<bool> {
        let fallback = self.fallback_language;
        let doc = self
            .active
            .and_then(|i| self.documents.get_mut(i))
            .ok_or(QuillError::NoActiveTab)?;
        let target = match path.clone().or_else(|| doc.path.clone()) {
            Some(target) => target,
            None => {
                return Err(QuillError::Other(format!(
                    "{} has no path; save it under a name first",
                    doc.display_name
                )))
            }
        };

        let content = live.text();
        std::fs::write(&target, &content)?;

        let language_changed = match path {
            Some(new_path) => doc.assign_path(new_path, fallback),
            None => false,
        };
        doc.content = content;
        doc.dirty = false;
        tracing::debug!("Saved {}", target.display());
        self.notify();
        Ok(language_changed)
    }

    fn flush(&mut self, live: &TextBuffer) {
        if let Some(doc) = self.active.and_then(|i| self.documents.get_mut(i)) {
            doc.content = live.text();
        }
    }

    fn notify(&mut self) {
        let view = self.view();
        if let Some(observer) = self.observer.as_mut() {
            observer.tabs_changed(&view);
        }
    }
}
