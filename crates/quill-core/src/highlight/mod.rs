//! When to re-tokenize, and the pass that turns tokens into tags.
//!
//! Edits either run a pass synchronously (bracket and quote characters), or
//! push a single pending deadline further out. The host calls [`poll`] with
//! the current time; a due deadline means "run the pass now".
//!
//! [`poll`]: HighlightScheduler::poll

mod timer;

use std::time::{Duration, Instant};

use crate::config::HighlightSettings;
use crate::constants::highlight::IMMEDIATE_TRIGGERS;
use crate::input::Key;
use crate::language::Language;
use crate::syntax::{TagLayer, TokenSource};

pub use timer::DebounceTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// An ordinary key press.
    Typed,
    /// A change not made by typing: completion commit, modified notification.
    Programmatic,
    Paste,
    UndoRedo,
}

/// The cause of a possible re-highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTrigger {
    pub ch: Option<char>,
    pub key: Option<Key>,
    pub kind: EditKind,
    pub content_changed: bool,
}

impl EditTrigger {
    pub fn typed(key: Key, content_changed: bool) -> Self {
        Self {
            ch: key.as_char(),
            key: Some(key),
            kind: EditKind::Typed,
            content_changed,
        }
    }

    pub fn of_kind(kind: EditKind) -> Self {
        Self {
            ch: None,
            key: None,
            kind,
            content_changed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightDecision {
    Skip,
    Immediate,
    Delayed(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Blank buffer: tags removed, tokenizer not called.
    Cleared,
    /// Number of tags applied.
    Tagged(usize),
    /// The tokenizer failed; tags were left as they were.
    Failed,
}

#[derive(Debug)]
pub struct HighlightScheduler {
    timer: DebounceTimer,
    delays: HighlightSettings,
    passes: u64,
    failures: u64,
}

impl HighlightScheduler {
    pub fn new(delays: &HighlightSettings) -> Self {
        Self {
            timer: DebounceTimer::new(),
            delays: delays.clone(),
            passes: 0,
            failures: 0,
        }
    }

    pub fn set_delays(&mut self, delays: &HighlightSettings) {
        self.delays = delays.clone();
    }

    pub fn decide(&self, trigger: &EditTrigger) -> HighlightDecision {
        if trigger.key.is_some_and(|key| key.is_navigation()) || !trigger.content_changed {
            return HighlightDecision::Skip;
        }
        if trigger.ch.is_some_and(|ch| IMMEDIATE_TRIGGERS.contains(&ch)) {
            return HighlightDecision::Immediate;
        }
        let delay = match trigger.kind {
            EditKind::Typed => self.delays.typed_delay(),
            EditKind::Programmatic => self.delays.programmatic_delay(),
            EditKind::Paste | EditKind::UndoRedo => self.delays.paste_delay(),
        };
        HighlightDecision::Delayed(delay)
    }

    /// Record an edit. `Immediate` cancels the pending deadline and the caller
    /// must run the pass now; `Delayed` replaces the pending deadline.
    pub fn notify_edit(&mut self, trigger: &EditTrigger, now: Instant) -> HighlightDecision {
        let decision = self.decide(trigger);
        match decision {
            HighlightDecision::Skip => {}
            HighlightDecision::Immediate => self.timer.cancel(),
            HighlightDecision::Delayed(delay) => {
                self.timer.schedule(now, delay);
            }
        }
        tracing::trace!("highlight {:?} for {:?}", decision, trigger);
        decision
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// True once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.timer.fire_if_due(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Re-tokenize the whole of `text` and rebuild `tags` from scratch.
    pub fn run_pass(
        &mut self,
        source: &dyn TokenSource,
        text: &str,
        language: Language,
        tags: &mut TagLayer,
    ) -> PassOutcome {
        self.passes += 1;
        if text.trim().is_empty() {
            tags.clear();
            return PassOutcome::Cleared;
        }
        let started = Instant::now();
        match source.tokenize(text, language) {
            Ok(tokens) => {
                let applied = tags.apply(text, &tokens);
                tracing::debug!(
                    "Highlight pass: {} tags for {} bytes of {} in {:?}",
                    applied,
                    text.len(),
                    language,
                    started.elapsed()
                );
                PassOutcome::Tagged(applied)
            }
            Err(e) => {
                self.failures += 1;
                tracing::warn!("Highlight pass failed, keeping previous tags: {e}");
                PassOutcome::Failed
            }
        }
    }
}
