/// Quill centralized constants.
/// Timing defaults, character sets and hard limits live here.

// ─── Highlighting ─────────────────────────────────────────────────────────────

pub mod highlight {
    /// Quiet period after an ordinary typed key.
    pub const TYPED_DELAY_MS: u64 = 500;
    /// Quiet period after a programmatic modification (completion commit etc).
    pub const PROGRAMMATIC_DELAY_MS: u64 = 200;
    /// Quiet period after paste, undo and redo.
    pub const PASTE_DELAY_MS: u64 = 100;

    /// Characters whose insertion re-highlights synchronously.
    pub const IMMEDIATE_TRIGGERS: &[char] = &['(', ')', '[', ']', '{', '}', '"', '\'', ':', ';', '#'];
}

// ─── Completion ───────────────────────────────────────────────────────────────

pub mod completion {
    /// Hard cap on candidates handed to the popup.
    pub const MAX_CANDIDATES: usize = 20;
    /// Delay between a word-character key release and the recompute.
    pub const RETRIGGER_DELAY_MS: u64 = 100;
}

// ─── Editing ──────────────────────────────────────────────────────────────────

pub mod editing {
    pub const INDENT_WIDTH: usize = 4;

    /// Opening characters that get their closer inserted automatically.
    pub const AUTO_PAIRS: &[(char, char)] = &[
        ('(', ')'),
        ('[', ']'),
        ('{', '}'),
        ('"', '"'),
        ('\'', '\''),
    ];

    /// A line ending in one of these opens a nested block.
    pub const INDENT_OPENERS: &[char] = &[':', '(', '[', '{'];

    pub const MAX_UNDO_HISTORY: usize = 200;
    /// Typed characters coalesced into one undo step.
    pub const UNDO_COALESCE_EDITS: usize = 10;
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const THEME: &str = "Dark";
    pub const FONT_FAMILY: &str = "Consolas";
    pub const FONT_SIZE: f32 = 12.0;
    pub const FALLBACK_LANGUAGE: &str = "python";
    pub const LOCALE: &str = "en";
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "quill";
    pub const CONFIG_FILE: &str = "config.toml";
}
