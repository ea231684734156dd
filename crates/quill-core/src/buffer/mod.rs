//! The live editing surface: a rope, a caret and an undo history.

mod history;

use ropey::Rope;

use history::History;

/// Lines moved by PageUp / PageDown.
const PAGE_LINES: usize = 20;

/// Caret position as a 0-based line and a character column within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    pub line: usize,
    pub col: usize,
}

impl Caret {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

pub struct TextBuffer {
    rope: Rope,
    caret: Caret,
    history: History,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        Self {
            history: History::new(&rope, Caret::default()),
            rope,
            caret: Caret::default(),
        }
    }

    /// Replace the whole content (tab switch / file load). Resets history and
    /// puts the caret at the start.
    pub fn set_text(&mut self, text: &str) {
        *self = Self::from_text(text);
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of `line` without its line terminator. Empty past the end.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let mut text = self.rope.line(line).to_string();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        text
    }

    /// Length of `line` in characters, excluding the terminator.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Move the caret, clamping it into the buffer.
    pub fn set_caret(&mut self, line: usize, col: usize) {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let col = col.min(self.line_len(line));
        self.caret = Caret { line, col };
    }

    pub fn caret_char_idx(&self) -> usize {
        self.char_idx(self.caret.line, self.caret.col)
    }

    fn char_idx(&self, line: usize, col: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line) + col.min(self.line_len(line))
    }

    fn set_caret_char_idx(&mut self, idx: usize) {
        let idx = idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        self.caret = Caret {
            line,
            col: idx - self.rope.line_to_char(line),
        };
    }

    pub fn move_caret(&mut self, motion: Motion) {
        let Caret { line, col } = self.caret;
        match motion {
            Motion::Left => {
                let idx = self.caret_char_idx();
                if col > 0 {
                    self.caret.col -= 1;
                } else if line > 0 {
                    self.set_caret(line - 1, usize::MAX);
                } else {
                    self.set_caret_char_idx(idx);
                }
            }
            Motion::Right => {
                if col < self.line_len(line) {
                    self.caret.col += 1;
                } else if line + 1 < self.rope.len_lines() {
                    self.caret = Caret { line: line + 1, col: 0 };
                }
            }
            Motion::Up => self.set_caret(line.saturating_sub(1), col),
            Motion::Down => self.set_caret(line + 1, col),
            Motion::Home => self.caret.col = 0,
            Motion::End => self.caret.col = self.line_len(line),
            Motion::PageUp => self.set_caret(line.saturating_sub(PAGE_LINES), col),
            Motion::PageDown => self.set_caret(line + PAGE_LINES, col),
        }
    }

    /// Insert at the caret and move the caret past the inserted text.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let idx = self.caret_char_idx();
        self.rope.insert(idx, text);
        self.set_caret_char_idx(idx + text.chars().count());
        if text.contains('\n') || text.chars().count() > 1 {
            self.checkpoint();
        } else {
            self.edited();
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Insert `open` and `close` together, leaving the caret between them.
    pub fn insert_pair(&mut self, open: char, close: char) {
        let idx = self.caret_char_idx();
        self.rope.insert_char(idx, open);
        self.rope.insert_char(idx + 1, close);
        self.set_caret_char_idx(idx + 1);
        self.edited();
    }

    /// Delete the character before the caret. Returns whether anything changed.
    pub fn delete_back(&mut self) -> bool {
        let idx = self.caret_char_idx();
        if idx == 0 {
            return false;
        }
        self.rope.remove(idx - 1..idx);
        self.set_caret_char_idx(idx - 1);
        self.edited();
        true
    }

    /// Delete the character under the caret. Returns whether anything changed.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.caret_char_idx();
        if idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(idx..idx + 1);
        self.edited();
        true
    }

    /// Replace columns `[start_col, end_col)` of `line` with `text` and put the
    /// caret right after the replacement.
    pub fn replace_in_line(&mut self, line: usize, start_col: usize, end_col: usize, text: &str) {
        let start = self.char_idx(line, start_col);
        let end = self.char_idx(line, end_col).max(start);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.set_caret_char_idx(start + text.chars().count());
        self.checkpoint();
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo(&self.rope, self.caret) else {
            return false;
        };
        let (rope, caret) = (snapshot.rope.clone(), snapshot.caret);
        self.restore(rope, caret);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        let (rope, caret) = (snapshot.rope.clone(), snapshot.caret);
        self.restore(rope, caret);
        true
    }

    fn restore(&mut self, rope: Rope, caret: Caret) {
        self.rope = rope;
        self.set_caret(caret.line, caret.col);
    }

    fn edited(&mut self) {
        self.history.edited(&self.rope, self.caret);
    }

    fn checkpoint(&mut self) {
        self.history.checkpoint(&self.rope, self.caret);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_advances_caret_across_lines() {
        let mut buf = TextBuffer::new();
        buf.insert_str("ab\ncd");
        assert_eq!(buf.caret(), Caret::new(1, 2));
        assert_eq!(buf.line_text(0), "ab");
        assert_eq!(buf.line_text(1), "cd");
    }

    #[test]
    fn test_insert_pair_places_caret_between() {
        let mut buf = TextBuffer::from_text("f");
        buf.set_caret(0, 1);
        buf.insert_pair('(', ')');
        assert_eq!(buf.text(), "f()");
        assert_eq!(buf.caret(), Caret::new(0, 2));
    }

    #[test]
    fn test_replace_in_line_only_touches_the_range() {
        let mut buf = TextBuffer::from_text("x = pri\ny");
        buf.replace_in_line(0, 4, 7, "print");
        assert_eq!(buf.text(), "x = print\ny");
        assert_eq!(buf.caret(), Caret::new(0, 9));
    }

    #[test]
    fn test_motion_clamps_to_line_length() {
        let mut buf = TextBuffer::from_text("long line\nab\n");
        buf.set_caret(0, 8);
        buf.move_caret(Motion::Down);
        assert_eq!(buf.caret(), Caret::new(1, 2));
        buf.move_caret(Motion::Right);
        assert_eq!(buf.caret(), Caret::new(2, 0));
        buf.move_caret(Motion::Left);
        assert_eq!(buf.caret(), Caret::new(1, 2));
        buf.move_caret(Motion::Home);
        assert_eq!(buf.caret().col, 0);
        buf.move_caret(Motion::PageUp);
        assert_eq!(buf.caret(), Caret::new(0, 0));
    }

    #[test]
    fn test_undo_redo_restores_content_and_caret() {
        let mut buf = TextBuffer::new();
        buf.insert_str("hello");
        buf.insert_char('!');
        assert!(buf.undo());
        assert_eq!(buf.text(), "hello");
        assert!(buf.undo());
        assert_eq!(buf.text(), "");
        assert!(!buf.undo());
        assert!(buf.redo());
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.caret(), Caret::new(0, 5));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = TextBuffer::from_text("a\nb");
        buf.set_caret(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.caret(), Caret::new(0, 1));
        buf.set_caret(0, 0);
        assert!(!buf.delete_back());
    }
}
