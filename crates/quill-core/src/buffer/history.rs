use std::collections::VecDeque;

use ropey::Rope;

use super::Caret;
use crate::constants::editing::{MAX_UNDO_HISTORY, UNDO_COALESCE_EDITS};

/// Buffer state at a checkpoint. Rope clones share their chunks, so keeping
/// a few hundred of these is cheap.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub rope: Rope,
    pub caret: Caret,
}

/// Checkpointed undo history.
///
/// `current` is the state at the last checkpoint. Single-character edits are
/// counted and folded into one checkpoint every [`UNDO_COALESCE_EDITS`];
/// structural edits checkpoint straight away.
#[derive(Debug)]
pub(crate) struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    current: Snapshot,
    uncommitted: usize,
}

impl History {
    pub fn new(rope: &Rope, caret: Caret) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            current: Snapshot {
                rope: rope.clone(),
                caret,
            },
            uncommitted: 0,
        }
    }

    /// Record a small edit; checkpoints once enough of them pile up.
    pub fn edited(&mut self, rope: &Rope, caret: Caret) {
        self.future.clear();
        self.uncommitted += 1;
        if self.uncommitted >= UNDO_COALESCE_EDITS {
            self.checkpoint(rope, caret);
        }
    }

    /// Make the given state an undo step of its own.
    pub fn checkpoint(&mut self, rope: &Rope, caret: Caret) {
        let next = Snapshot {
            rope: rope.clone(),
            caret,
        };
        self.past.push_back(std::mem::replace(&mut self.current, next));
        if self.past.len() > MAX_UNDO_HISTORY {
            self.past.pop_front();
        }
        self.future.clear();
        self.uncommitted = 0;
    }

    /// Step back. Edits since the last checkpoint are committed first so they
    /// can be redone.
    pub fn undo(&mut self, rope: &Rope, caret: Caret) -> Option<&Snapshot> {
        if self.uncommitted > 0 {
            self.checkpoint(rope, caret);
        }
        let previous = self.past.pop_back()?;
        self.future
            .push(std::mem::replace(&mut self.current, previous));
        Some(&self.current)
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop()?;
        self.past.push_back(std::mem::replace(&mut self.current, next));
        Some(&self.current)
    }
}
