//! The single entry point for input. Owns every piece of mutable editor state
//! and routes each event to the highlight scheduler, the completion popup and
//! the editing helpers.

use std::path::PathBuf;
use std::time::Instant;

use crate::buffer::{Caret, TextBuffer};
use crate::completion::{
    self, is_word_char, Candidate, CompletionEngine, PopupAction, PopupController, WordSpan,
};
use crate::config::Settings;
use crate::editing;
use crate::error::Result;
use crate::highlight::{
    DebounceTimer, EditKind, EditTrigger, HighlightDecision, HighlightScheduler, PassOutcome,
};
use crate::input::{InputEvent, Key};
use crate::language::Language;
use crate::syntax::{TagLayer, TokenSource, Tokenizer};
use crate::tabs::{TabBarObserver, TabSet};
use crate::theme::{StyledSpan, Theme};

pub struct Editor {
    settings: Settings,
    theme: Theme,
    buffer: TextBuffer,
    tabs: TabSet,
    scheduler: HighlightScheduler,
    tags: TagLayer,
    tokenizer: Box<dyn TokenSource + Send>,
    engine: CompletionEngine,
    popup: PopupController,
    completion_timer: DebounceTimer,
}

impl Editor {
    pub fn new(settings: Settings) -> Self {
        Self::with_tokenizer(settings, Box::new(Tokenizer::new()))
    }

    pub fn with_tokenizer(settings: Settings, tokenizer: Box<dyn TokenSource + Send>) -> Self {
        Self {
            theme: Theme::by_name(&settings.editor.theme),
            buffer: TextBuffer::new(),
            tabs: TabSet::new(
                settings.editor.fallback_language,
                settings.editor.untitled_label(),
            ),
            scheduler: HighlightScheduler::new(&settings.highlight),
            tags: TagLayer::new(),
            tokenizer,
            engine: CompletionEngine::new(),
            popup: PopupController::new(),
            completion_timer: DebounceTimer::new(),
            settings,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn caret(&self) -> Caret {
        self.buffer.caret()
    }

    pub fn tags(&self) -> &TagLayer {
        &self.tags
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn popup(&self) -> &PopupController {
        &self.popup
    }

    pub fn scheduler(&self) -> &HighlightScheduler {
        &self.scheduler
    }

    /// Language of the active document, or the fallback when none is open.
    pub fn language(&self) -> Language {
        self.tabs.active_language()
    }

    pub fn styled_spans(&self) -> Vec<StyledSpan> {
        self.theme.styled_spans(&self.tags)
    }

    pub fn set_tab_observer(&mut self, observer: Box<dyn TabBarObserver + Send>) {
        self.tabs.set_observer(observer);
    }

    // ── Settings ────────────────────────────────────────────────────────────

    /// Swap in a new settings snapshot and re-highlight with it.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.theme = Theme::by_name(&settings.editor.theme);
        self.scheduler.set_delays(&settings.highlight);
        self.tabs.set_defaults(
            settings.editor.fallback_language,
            settings.editor.untitled_label(),
        );
        if !settings.completion.enabled {
            self.popup.hide();
            self.completion_timer.cancel();
        }
        self.settings = settings;
        self.force_highlight();
    }

    pub fn set_theme(&mut self, name: &str) {
        let mut settings = self.settings.clone();
        settings.editor.theme = name.to_string();
        self.apply_settings(settings);
    }

    // ── Events ──────────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Result<()> {
        match event {
            InputEvent::KeyPress { key } => self.key_press(key, now),
            InputEvent::KeyRelease { key } => self.key_release(key, now),
            InputEvent::Type { text } => {
                for ch in text.chars() {
                    let key = match ch {
                        '\n' => Key::Enter,
                        '\t' => Key::Tab,
                        c => Key::Char(c),
                    };
                    self.key_press(key, now);
                    self.key_release(key, now);
                }
            }
            InputEvent::Paste { text } => self.paste(&text, now),
            InputEvent::Undo => self.undo_redo(true, now),
            InputEvent::Redo => self.undo_redo(false, now),
            InputEvent::TriggerCompletion => {
                self.show_completions();
            }
            InputEvent::ClickText { line, col } => {
                self.hide_completions();
                self.buffer.set_caret(line, col);
            }
            InputEvent::ClickCompletion { index } => {
                if let Some((candidate, anchor)) = self.popup.click(index) {
                    self.apply_commit(&candidate, &anchor, now);
                }
            }
            InputEvent::NewTab => self.new_tab(),
            InputEvent::OpenFile { path } => {
                self.open_file(path)?;
            }
            InputEvent::SwitchTab { index } => self.switch_tab(index)?,
            InputEvent::CloseTab { index } => self.close_tab(index)?,
            InputEvent::Save => self.save()?,
            InputEvent::SaveAs { path } => self.save_as(path)?,
        }
        Ok(())
    }

    fn key_press(&mut self, key: Key, now: Instant) {
        // An open popup sees every key first, so Enter and Tab commit there.
        match self.popup.handle_key(key) {
            PopupAction::Moved | PopupAction::Dismissed => return,
            PopupAction::Commit(candidate, anchor) => {
                self.apply_commit(&candidate, &anchor, now);
                return;
            }
            PopupAction::Insert(c) => {
                self.buffer.insert_char(c);
                self.tabs.mark_dirty();
                self.schedule_highlight(&EditTrigger::typed(key, true), now);
                return;
            }
            PopupAction::Ignored => {}
        }

        if let Some(motion) = key.motion() {
            self.buffer.move_caret(motion);
            return;
        }
        if key == Key::Escape {
            return;
        }

        self.ensure_active_tab();
        let changed = match key {
            Key::Enter => {
                let unit = self.settings.editor.indent_unit();
                editing::insert_newline(&mut self.buffer, &unit);
                true
            }
            Key::Tab => {
                let unit = self.settings.editor.indent_unit();
                self.buffer.insert_str(&unit);
                true
            }
            Key::Backspace => self.buffer.delete_back(),
            Key::Delete => self.buffer.delete_forward(),
            Key::Char(c) => {
                if !editing::insert_pair(&mut self.buffer, c) {
                    self.buffer.insert_char(c);
                }
                true
            }
            _ => false,
        };
        if changed {
            self.tabs.mark_dirty();
        }
        self.schedule_highlight(&EditTrigger::typed(key, changed), now);
    }

    fn key_release(&mut self, key: Key, now: Instant) {
        if !self.settings.completion.enabled {
            return;
        }
        // Selection keys are consumed by the open popup.
        if self.popup.is_visible() && matches!(key, Key::Up | Key::Down) {
            return;
        }
        match key {
            Key::Char(c) if is_word_char(c) => {
                self.completion_timer
                    .schedule(now, self.settings.completion.retrigger_delay());
            }
            _ => self.hide_completions(),
        }
    }

    fn paste(&mut self, text: &str, now: Instant) {
        self.hide_completions();
        if text.is_empty() {
            return;
        }
        self.ensure_active_tab();
        self.buffer.insert_str(text);
        self.tabs.mark_dirty();
        self.schedule_highlight(&EditTrigger::of_kind(EditKind::Paste), now);
    }

    fn undo_redo(&mut self, undo: bool, now: Instant) {
        self.hide_completions();
        let changed = if undo {
            self.buffer.undo()
        } else {
            self.buffer.redo()
        };
        if changed {
            self.tabs.mark_dirty();
            self.schedule_highlight(&EditTrigger::of_kind(EditKind::UndoRedo), now);
        }
    }

    fn apply_commit(&mut self, candidate: &Candidate, anchor: &WordSpan, now: Instant) {
        completion::commit(&mut self.buffer, anchor, candidate);
        self.completion_timer.cancel();
        self.tabs.mark_dirty();
        self.schedule_highlight(&EditTrigger::of_kind(EditKind::Programmatic), now);
    }

    /// A content-changing key with no open document gets an untitled one.
    fn ensure_active_tab(&mut self) {
        if self.tabs.active_index().is_none() {
            self.tabs.new_untitled(&mut self.buffer);
        }
    }

    // ── Completion ──────────────────────────────────────────────────────────

    /// Recompute candidates for the word at the caret and show or hide the
    /// popup accordingly. Returns whether the popup is visible.
    pub fn show_completions(&mut self) -> bool {
        self.completion_timer.cancel();
        match self.engine.complete_at(&self.buffer, self.language()) {
            Some((anchor, candidates)) => self.popup.show(candidates, anchor),
            None => {
                self.popup.hide();
                false
            }
        }
    }

    fn hide_completions(&mut self) {
        self.completion_timer.cancel();
        self.popup.hide();
    }

    // ── Highlighting ────────────────────────────────────────────────────────

    fn schedule_highlight(&mut self, trigger: &EditTrigger, now: Instant) {
        if self.scheduler.notify_edit(trigger, now) == HighlightDecision::Immediate {
            self.run_highlight_pass();
        }
    }

    /// Cancel any pending pass and highlight now.
    pub fn force_highlight(&mut self) -> PassOutcome {
        self.scheduler.cancel();
        self.run_highlight_pass()
    }

    fn run_highlight_pass(&mut self) -> PassOutcome {
        let text = self.buffer.text();
        let language = self.language();
        self.scheduler
            .run_pass(self.tokenizer.as_ref(), &text, language, &mut self.tags)
    }

    // ── Timers ──────────────────────────────────────────────────────────────

    /// Fire every timer whose deadline is at or before `now`. Returns whether
    /// anything fired.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        let mut fired = false;
        if self.scheduler.poll(now) {
            self.run_highlight_pass();
            fired = true;
        }
        if self.completion_timer.fire_if_due(now) {
            self.show_completions();
            fired = true;
        }
        fired
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.scheduler.next_deadline(), self.completion_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Documents ───────────────────────────────────────────────────────────

    pub fn new_tab(&mut self) {
        self.hide_completions();
        self.tabs.new_untitled(&mut self.buffer);
        self.force_highlight();
    }

    pub fn open_file(&mut self, path: PathBuf) -> Result<usize> {
        let index = self.tabs.open_file(path, &mut self.buffer)?;
        self.hide_completions();
        self.force_highlight();
        Ok(index)
    }

    pub fn switch_tab(&mut self, index: usize) -> Result<()> {
        self.tabs.switch_to(index, &mut self.buffer)?;
        self.hide_completions();
        self.force_highlight();
        Ok(())
    }

    pub fn close_tab(&mut self, index: usize) -> Result<()> {
        self.tabs.close(index, &mut self.buffer)?;
        self.hide_completions();
        self.force_highlight();
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        self.tabs.save_active(None, &self.buffer)?;
        Ok(())
    }

    /// Save under `path`; the document takes the new name and language.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        let language_changed = self.tabs.save_active(Some(path), &self.buffer)?;
        if language_changed {
            tracing::debug!("Language is now {}", self.language());
        }
        self.force_highlight();
        Ok(())
    }
}
