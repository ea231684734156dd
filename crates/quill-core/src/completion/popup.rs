use super::{Candidate, WordSpan};
use crate::input::Key;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible {
        candidates: Vec<Candidate>,
        /// Always in `[0, candidates.len())`.
        selected: usize,
        /// Word to replace on commit.
        anchor: WordSpan,
    },
}

/// What a key press did to the popup.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    /// Nothing was visible; the editor handles the key.
    Ignored,
    /// Selection moved; the key is consumed.
    Moved,
    /// The popup closed with a choice to apply.
    Commit(Candidate, WordSpan),
    /// The popup closed and the key is consumed.
    Dismissed,
    /// The popup closed; the character goes in literally, without pairing.
    Insert(char),
}

#[derive(Debug, Default)]
pub struct PopupController {
    state: PopupState,
}

impl PopupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, PopupState::Visible { .. })
    }

    pub fn candidates(&self) -> &[Candidate] {
        match &self.state {
            PopupState::Visible { candidates, .. } => candidates.as_slice(),
            PopupState::Hidden => &[],
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match &self.state {
            PopupState::Visible { selected, .. } => Some(*selected),
            PopupState::Hidden => None,
        }
    }

    /// Show a fresh candidate list with the first entry selected. An empty
    /// list hides the popup instead. Returns whether the popup is visible.
    pub fn show(&mut self, candidates: Vec<Candidate>, anchor: WordSpan) -> bool {
        if candidates.is_empty() {
            self.hide();
            return false;
        }
        self.state = PopupState::Visible {
            candidates,
            selected: 0,
            anchor,
        };
        true
    }

    pub fn hide(&mut self) {
        self.state = PopupState::Hidden;
    }

    pub fn select_previous(&mut self) {
        if let PopupState::Visible { selected, .. } = &mut self.state {
            *selected = selected.saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if let PopupState::Visible {
            selected,
            candidates,
            ..
        } = &mut self.state
        {
            *selected = (*selected + 1).min(candidates.len() - 1);
        }
    }

    /// Close the popup and hand back the selected entry.
    pub fn take_selection(&mut self) -> Option<(Candidate, WordSpan)> {
        match std::mem::take(&mut self.state) {
            PopupState::Visible {
                mut candidates,
                selected,
                anchor,
            } if selected < candidates.len() => Some((candidates.swap_remove(selected), anchor)),
            _ => None,
        }
    }

    /// Select `index` and commit it, as a mouse click on an entry does.
    pub fn click(&mut self, index: usize) -> Option<(Candidate, WordSpan)> {
        if index >= self.candidates().len() {
            return None;
        }
        if let PopupState::Visible { selected, .. } = &mut self.state {
            *selected = index;
        }
        self.take_selection()
    }

    pub fn handle_key(&mut self, key: Key) -> PopupAction {
        if !self.is_visible() {
            return PopupAction::Ignored;
        }
        match key {
            Key::Up => {
                self.select_previous();
                PopupAction::Moved
            }
            Key::Down => {
                self.select_next();
                PopupAction::Moved
            }
            Key::Enter | Key::Tab => match self.take_selection() {
                Some((candidate, anchor)) => PopupAction::Commit(candidate, anchor),
                None => PopupAction::Dismissed,
            },
            Key::Char(c) => {
                self.hide();
                PopupAction::Insert(c)
            }
            _ => {
                self.hide();
                PopupAction::Dismissed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CandidateSource;

    fn anchor() -> WordSpan {
        WordSpan {
            line: 0,
            start: 0,
            end: 2,
            text: "pr".to_string(),
        }
    }

    fn visible(names: &[&str]) -> PopupController {
        let mut popup = PopupController::new();
        let candidates = names
            .iter()
            .map(|n| Candidate::new(*n, CandidateSource::Builtin))
            .collect();
        popup.show(candidates, anchor());
        popup
    }

    #[test]
    fn test_empty_list_stays_hidden() {
        let mut popup = PopupController::new();
        assert!(!popup.show(Vec::new(), anchor()));
        assert_eq!(popup.state(), &PopupState::Hidden);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut popup = visible(&["print", "property"]);
        assert_eq!(popup.selected(), Some(0));
        assert_eq!(popup.handle_key(Key::Up), PopupAction::Moved);
        assert_eq!(popup.selected(), Some(0));
        popup.handle_key(Key::Down);
        popup.handle_key(Key::Down);
        assert_eq!(popup.selected(), Some(1));
    }

    #[test]
    fn test_enter_and_tab_commit_selected() {
        let mut popup = visible(&["print", "property"]);
        popup.handle_key(Key::Down);
        match popup.handle_key(Key::Tab) {
            PopupAction::Commit(candidate, span) => {
                assert_eq!(candidate.text, "property");
                assert_eq!(span, anchor());
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(!popup.is_visible());

        let mut popup = visible(&["print"]);
        assert!(matches!(popup.handle_key(Key::Enter), PopupAction::Commit(..)));
    }

    #[test]
    fn test_escape_and_other_keys_hide() {
        let mut popup = visible(&["print"]);
        assert_eq!(popup.handle_key(Key::Escape), PopupAction::Dismissed);
        assert!(!popup.is_visible());

        let mut popup = visible(&["print"]);
        assert_eq!(popup.handle_key(Key::Char('(')), PopupAction::Insert('('));
        assert!(!popup.is_visible());

        assert_eq!(popup.handle_key(Key::Down), PopupAction::Ignored);
    }

    #[test]
    fn test_editing_keys_only_close() {
        for key in [Key::Backspace, Key::Delete, Key::Left, Key::Home, Key::PageDown] {
            let mut popup = visible(&["print"]);
            assert_eq!(popup.handle_key(key), PopupAction::Dismissed);
            assert!(!popup.is_visible());
        }
    }

    #[test]
    fn test_click_commits_entry() {
        let mut popup = visible(&["print", "property"]);
        assert!(popup.click(5).is_none());
        assert!(popup.is_visible());
        let (candidate, _) = popup.click(1).unwrap();
        assert_eq!(candidate.text, "property");
        assert!(!popup.is_visible());
    }
}
