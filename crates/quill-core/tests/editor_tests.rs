use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use quill_core::{
    tokenize, Caret, Editor, InputEvent, Key, Language, PassOutcome, QuillError, Result,
    Settings, TabBarObserver, TabBarView, Token, TokenCategory, TokenSource,
};
use tempfile::TempDir;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn editor() -> Editor {
    Editor::new(Settings::default())
}

fn type_text(ed: &mut Editor, text: &str, at: Instant) {
    ed.handle(InputEvent::Type { text: text.into() }, at).unwrap();
}

// ========================================================================
// Highlight scheduling
// ========================================================================

#[test]
fn test_typing_burst_produces_one_pass() {
    let mut ed = editor();
    let t0 = Instant::now();
    for (i, ch) in "value".chars().enumerate() {
        ed.handle(InputEvent::press(Key::Char(ch)), t0 + ms(i as u64 * 100))
            .unwrap();
    }
    // Last key at 400 ms, so the only pass is due at 900 ms.
    assert_eq!(ed.next_deadline(), Some(t0 + ms(900)));
    assert!(!ed.poll_timers(t0 + ms(899)));
    assert_eq!(ed.scheduler().passes(), 0);
    assert!(ed.poll_timers(t0 + ms(900)));
    assert_eq!(ed.scheduler().passes(), 1);
    assert!(!ed.tags().is_empty());
}

#[test]
fn test_immediate_character_bypasses_debounce() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "x = 1", t0);
    assert!(ed.scheduler().is_pending());

    ed.handle(InputEvent::press(Key::Char('#')), t0 + ms(10)).unwrap();
    assert_eq!(ed.scheduler().passes(), 1);
    assert!(!ed.scheduler().is_pending());
    let last = ed.tags().tags().last().unwrap();
    assert_eq!(last.category, TokenCategory::Comment);
}

#[test]
fn test_navigation_never_schedules() {
    let mut ed = editor();
    let t0 = Instant::now();
    ed.handle(InputEvent::Paste { text: "a\nb\nc".into() }, t0).unwrap();
    ed.force_highlight();
    for key in [Key::Up, Key::Down, Key::Left, Key::Right, Key::Home, Key::End, Key::PageUp, Key::PageDown] {
        ed.handle(InputEvent::press(key), t0).unwrap();
    }
    assert!(!ed.scheduler().is_pending());
    assert_eq!(ed.scheduler().passes(), 1);
}

#[test]
fn test_tags_match_tokenizer_output() {
    let mut ed = editor();
    let t0 = Instant::now();
    let source = "def área(x):\n    return x  # ok\n";
    ed.handle(InputEvent::Paste { text: source.into() }, t0).unwrap();
    ed.poll_timers(t0 + ms(100));

    let tokens = tokenize(source, Language::Python).unwrap();
    let tags = ed.tags().tags();
    assert_eq!(tags.len(), tokens.len());
    let total: usize = tags.iter().map(|t| t.range.len()).sum();
    assert_eq!(total, source.chars().count());
    assert_eq!(tags.last().unwrap().range.end, source.chars().count());
}

#[test]
fn test_deleting_everything_clears_tags() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "x", t0);
    ed.force_highlight();
    assert!(!ed.tags().is_empty());

    ed.handle(InputEvent::press(Key::Backspace), t0).unwrap();
    assert_eq!(ed.force_highlight(), PassOutcome::Cleared);
    assert!(ed.tags().is_empty());
}

/// Real tokenizer that starts failing once `broken` is set.
struct Flaky {
    broken: Arc<AtomicBool>,
}

impl TokenSource for Flaky {
    fn tokenize(&self, text: &str, language: Language) -> Result<Vec<Token>> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(QuillError::tokenize(language.name(), "grammar unavailable"));
        }
        tokenize(text, language)
    }
}

#[test]
fn test_tokenizer_failure_keeps_tags_and_editing() {
    let broken = Arc::new(AtomicBool::new(false));
    let mut ed = Editor::with_tokenizer(
        Settings::default(),
        Box::new(Flaky {
            broken: broken.clone(),
        }),
    );
    let t0 = Instant::now();
    type_text(&mut ed, "x = 1", t0);
    assert!(matches!(ed.force_highlight(), PassOutcome::Tagged(_)));
    let before = ed.tags().tags().to_vec();

    broken.store(true, Ordering::SeqCst);
    // `#` highlights synchronously, so the failure happens inside dispatch.
    type_text(&mut ed, "  # note", t0 + ms(10));
    assert_eq!(ed.text(), "x = 1  # note");
    assert_eq!(ed.scheduler().failures(), 1);
    assert_eq!(ed.tags().tags(), before.as_slice());

    ed.poll_timers(t0 + ms(1000));
    assert_eq!(ed.tags().tags(), before.as_slice());

    broken.store(false, Ordering::SeqCst);
    assert!(matches!(ed.force_highlight(), PassOutcome::Tagged(_)));
    assert_eq!(ed.tags().tags().last().unwrap().category, TokenCategory::Comment);
}

// ========================================================================
// Completion
// ========================================================================

#[test]
fn test_dotted_word_completes_from_class_bases() {
    let mut ed = editor();
    let t0 = Instant::now();
    ed.handle(
        InputEvent::Paste {
            text: "class Base(models.Model):\n    pass\n".into(),
        },
        t0,
    )
    .unwrap();
    type_text(&mut ed, "x = models.Mo", t0);
    assert!(ed.show_completions());
    let candidates = ed.popup().candidates();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].text, "models.Model");

    ed.handle(InputEvent::press(Key::Enter), t0).unwrap();
    assert!(ed.text().ends_with("x = models.Model"));
}

#[test]
fn test_commit_builtin_places_caret_inside_parens() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "pri", t0);
    ed.poll_timers(t0 + ms(100));
    assert_eq!(ed.popup().candidates()[0].text, "print");

    ed.handle(InputEvent::press(Key::Tab), t0 + ms(120)).unwrap();
    assert_eq!(ed.text(), "print()");
    assert_eq!(ed.caret(), Caret::new(0, 6));

    // Typing continues inside the call.
    type_text(&mut ed, "1", t0 + ms(130));
    assert_eq!(ed.text(), "print(1)");
}

#[test]
fn test_candidates_are_capped_at_twenty() {
    let mut ed = editor();
    let t0 = Instant::now();
    let code: String = (0..40).map(|i| format!("var_{i:02} = {i}\n")).collect();
    ed.handle(InputEvent::Paste { text: code }, t0).unwrap();
    type_text(&mut ed, "var_", t0);
    assert!(ed.show_completions());
    assert_eq!(ed.popup().candidates().len(), 20);
}

#[test]
fn test_clicking_an_entry_commits_it() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "pr", t0);
    ed.poll_timers(t0 + ms(100));
    let index = ed
        .popup()
        .candidates()
        .iter()
        .position(|c| c.text == "property")
        .unwrap();
    ed.handle(InputEvent::ClickCompletion { index }, t0 + ms(150)).unwrap();
    assert_eq!(ed.text(), "property()");
    assert!(!ed.popup().is_visible());
}

#[test]
fn test_escape_hides_without_editing() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "pri", t0);
    ed.poll_timers(t0 + ms(100));
    ed.handle(InputEvent::press(Key::Escape), t0 + ms(110)).unwrap();
    assert!(!ed.popup().is_visible());
    assert_eq!(ed.text(), "pri");
}

// ========================================================================
// Editing assistance
// ========================================================================

#[test]
fn test_auto_indent_after_def() {
    let mut ed = editor();
    let t0 = Instant::now();
    ed.handle(InputEvent::Paste { text: "def f():".into() }, t0).unwrap();
    ed.handle(InputEvent::press(Key::Enter), t0).unwrap();
    assert_eq!(ed.text(), "def f():\n    ");
    assert_eq!(ed.caret(), Caret::new(1, 4));
}

#[test]
fn test_auto_indent_keeps_nested_level() {
    let mut ed = editor();
    let t0 = Instant::now();
    ed.handle(
        InputEvent::Paste {
            text: "class A:\n    def f(self):\n        x = 1".into(),
        },
        t0,
    )
    .unwrap();
    ed.handle(InputEvent::press(Key::Enter), t0).unwrap();
    assert!(ed.text().ends_with("x = 1\n        "));
}

#[test]
fn test_quote_pairs_and_typing_goes_inside() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "s = \"hi", t0);
    assert_eq!(ed.text(), "s = \"hi\"");
    assert_eq!(ed.caret(), Caret::new(0, 7));
}

// ========================================================================
// Tabs and files
// ========================================================================

struct Log(Arc<Mutex<Vec<TabBarView>>>);

impl TabBarObserver for Log {
    fn tabs_changed(&mut self, view: &TabBarView) {
        self.0.lock().unwrap().push(view.clone());
    }
}

#[test]
fn test_tab_switch_round_trip_preserves_content() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.py");
    let b = dir.path().join("b.js");
    fs::write(&a, "alpha = 1\n").unwrap();
    fs::write(&b, "let beta = 2;\n").unwrap();

    let mut ed = editor();
    let t0 = Instant::now();
    ed.open_file(a).unwrap();
    ed.handle(InputEvent::press(Key::End), t0).unwrap();
    type_text(&mut ed, "0", t0);
    assert_eq!(ed.text(), "alpha = 10\n");

    ed.open_file(b).unwrap();
    assert_eq!(ed.language(), Language::JavaScript);
    assert_eq!(ed.text(), "let beta = 2;\n");

    ed.switch_tab(0).unwrap();
    assert_eq!(ed.text(), "alpha = 10\n");
    assert_eq!(ed.language(), Language::Python);
    assert!(ed.tabs().documents()[0].dirty);
    assert!(!ed.tabs().documents()[1].dirty);
    assert!(!ed.scheduler().is_pending());
}

#[test]
fn test_save_as_changes_language_and_rehighlights() {
    let dir = TempDir::new().unwrap();
    let mut ed = editor();
    let t0 = Instant::now();
    ed.handle(InputEvent::Paste { text: "SELECT 1;".into() }, t0).unwrap();
    assert_eq!(ed.language(), Language::Python);

    let path = dir.path().join("query.sql");
    ed.handle(InputEvent::SaveAs { path: path.clone() }, t0).unwrap();
    assert_eq!(ed.language(), Language::Sql);
    assert_eq!(ed.tabs().active().unwrap().display_name, "query.sql");
    assert!(!ed.tabs().active().unwrap().dirty);
    assert!(!ed.tags().is_empty());
    assert_eq!(fs::read_to_string(path).unwrap(), "SELECT 1;");
}

#[test]
fn test_save_untitled_without_path_is_an_error() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "x", t0);
    assert!(matches!(ed.handle(InputEvent::Save, t0), Err(QuillError::Other(_))));
    assert!(ed.tabs().active().unwrap().dirty);
}

#[test]
fn test_closing_last_tab_clears_surface() {
    let mut ed = editor();
    let t0 = Instant::now();
    type_text(&mut ed, "x = 1", t0);
    ed.force_highlight();
    ed.close_tab(0).unwrap();
    assert!(ed.tabs().is_empty());
    assert_eq!(ed.text(), "");
    assert!(ed.tags().is_empty());
    assert!(matches!(ed.switch_tab(0), Err(QuillError::TabIndex(0))));
}

#[test]
fn test_observer_tracks_dirty_flag() {
    let views = Arc::new(Mutex::new(Vec::new()));
    let mut ed = editor();
    ed.set_tab_observer(Box::new(Log(views.clone())));
    let t0 = Instant::now();
    type_text(&mut ed, "ab", t0);

    let views = views.lock().unwrap();
    let last = views.last().unwrap();
    assert_eq!(last.entries.len(), 1);
    assert!(last.entries[0].dirty);
    assert_eq!(last.active, Some(0));
}

#[test]
fn test_russian_locale_names_untitled_tabs() {
    let mut settings = Settings::default();
    settings.editor.locale = "ru".to_string();
    let mut ed = Editor::new(settings);
    ed.new_tab();
    assert_eq!(ed.tabs().active().unwrap().display_name, "Безымянный");
}
