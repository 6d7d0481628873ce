//! End-to-end editing scenarios driven through `Editor::tick`.

use std::path::{Path, PathBuf};

use quire_core::{
    parse_keys, EditorEvent, Editor, FileStore, KeyEvent, Lifecycle, Mode, NamedKey,
    NotificationLevel, Persistence, PersistenceError, Position, QuitSignal, TextBuffer, Transition,
};

/// Records every save; can be told to fail.
#[derive(Default)]
struct SpyStore {
    saves: Vec<Vec<String>>,
    fail: bool,
}

impl Persistence for SpyStore {
    fn path(&self) -> &Path {
        Path::new("spy.txt")
    }

    fn save(&mut self, buffer: &TextBuffer) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Other("Error saving file!".to_string()));
        }
        self.saves
            .push(buffer.lines().iter().map(|l| l.text()).collect());
        Ok(())
    }
}

#[derive(Default)]
struct SpyLifecycle {
    terminations: usize,
}

impl Lifecycle for SpyLifecycle {
    fn terminate(&mut self) {
        self.terminations += 1;
    }
}

type TestEditor = Editor<SpyStore, SpyLifecycle>;

fn editor() -> TestEditor {
    Editor::new(SpyStore::default(), SpyLifecycle::default())
}

fn press<P: Persistence, L: Lifecycle>(editor: &mut Editor<P, L>, keys: &str) {
    for key in parse_keys(keys) {
        editor.tick(&[key]);
    }
}

fn scenario_a() -> TestEditor {
    let mut editor = editor();
    press(&mut editor, "i");
    assert_eq!(editor.mode(), Mode::Insert);
    press(&mut editor, "ab");
    editor
}

#[test]
fn scenario_a_typing() {
    let editor = scenario_a();
    assert_eq!(editor.snapshot().lines, vec!["ab"]);
    assert_eq!(editor.buffer().cursor(), Position::new(0, 2));
}

#[test]
fn scenario_b_newline() {
    let mut editor = scenario_a();
    press(&mut editor, "<CR>");
    assert_eq!(editor.snapshot().lines, vec!["ab", ""]);
    assert_eq!(editor.buffer().cursor(), Position::new(1, 0));
}

#[test]
fn scenario_c_write() {
    let mut editor = scenario_a();
    press(&mut editor, "<Esc>:w");
    assert_eq!(editor.mode(), Mode::Command);
    assert_eq!(editor.command_line().content(), "w");

    press(&mut editor, "<CR>");
    assert_eq!(editor.persistence().saves, vec![vec!["ab".to_string()]]);
    assert!(editor.command_line().is_empty());
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.lifecycle().terminations, 0);
    assert!(editor.notification().is_none());
}

#[test]
fn scenario_d_unknown_command() {
    let mut editor = scenario_a();
    press(&mut editor, "<Esc>");
    let before = editor.snapshot();

    press(&mut editor, ":zz<CR>");
    assert!(editor.persistence().saves.is_empty());
    assert_eq!(editor.lifecycle().terminations, 0);
    assert!(editor.command_line().is_empty());
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.snapshot(), before);
}

#[test]
fn scenario_e_failed_save() {
    let mut editor = Editor::new(
        SpyStore {
            fail: true,
            ..Default::default()
        },
        SpyLifecycle::default(),
    );
    press(&mut editor, "iab<CR>c<Left><Esc>");
    let lines_before = editor.buffer().lines().to_vec();
    let cursor_before = editor.buffer().cursor();
    let mut events = editor.subscribe();

    press(&mut editor, ":w<CR>");

    assert_eq!(editor.buffer().lines(), &lines_before[..]);
    assert_eq!(editor.buffer().cursor(), cursor_before);
    assert!(editor.command_line().is_empty());
    assert_eq!(editor.mode(), Mode::Normal);

    let notification = editor.notification().expect("failure must be visible");
    assert_eq!(notification.level, NotificationLevel::Error);
    assert!(notification.message.contains("Error saving file!"));
    assert_eq!(editor.snapshot().notification.as_ref(), Some(notification));

    let seen: Vec<EditorEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert!(seen.iter().any(|e| matches!(e, EditorEvent::SaveFailed(_))));
    assert!(!seen.iter().any(|e| matches!(e, EditorEvent::DocumentSaved(_))));

    // Still responsive afterwards
    editor.dismiss_notification();
    press(&mut editor, "id");
    assert_eq!(editor.buffer().line_text(1).unwrap(), "dc");
}

#[test]
fn leaving_command_mode_by_request_discards_pending() {
    let mut editor = editor();
    press(&mut editor, ":w");
    editor.request(Transition::Escape).unwrap();
    assert_eq!(editor.mode(), Mode::Normal);

    press(&mut editor, ":");
    assert_eq!(editor.snapshot().command_line.as_deref(), Some(""));
    press(&mut editor, "<CR>");
    assert!(editor.persistence().saves.is_empty());
}

#[test]
fn prefix_write_does_not_match_w() {
    let mut editor = editor();
    press(&mut editor, ":write<CR>");
    assert!(editor.persistence().saves.is_empty());
    press(&mut editor, ":W<CR>");
    assert!(editor.persistence().saves.is_empty());
}

#[test]
fn quit_terminates_once() {
    let mut editor = editor();
    press(&mut editor, ":q<CR>");
    assert_eq!(editor.lifecycle().terminations, 1);
    assert!(editor.should_quit());
}

#[test]
fn mode_guard_in_normal() {
    let mut editor = editor();
    assert!(editor.insert_char('x').is_err());
    editor.tick(&[KeyEvent::Character('x')]);
    assert!(editor.buffer().is_empty());
    assert!(!editor.buffer().is_modified());
}

#[test]
fn transition_table_via_keys() {
    // From NORMAL: i, v and : reach the three other modes
    for (key, mode) in [("i", Mode::Insert), ("v", Mode::Select), (":", Mode::Command)] {
        let mut editor = editor();
        press(&mut editor, key);
        assert_eq!(editor.mode(), mode);

        // Mode keys from a non-normal mode do not switch
        for other in ["<Insert>", "<Select>"] {
            press(&mut editor, other);
            assert_eq!(editor.mode(), mode);
        }

        press(&mut editor, "<Esc>");
        assert_eq!(editor.mode(), Mode::Normal);
    }

    // Escape in NORMAL stays put
    let mut editor = editor();
    press(&mut editor, "<Esc>");
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn colon_in_insert_is_text() {
    let mut editor = editor();
    press(&mut editor, "i:w<CR>");
    assert_eq!(editor.mode(), Mode::Insert);
    assert_eq!(editor.snapshot().lines, vec![":w", ""]);
    assert!(editor.persistence().saves.is_empty());
}

#[test]
fn dedicated_mode_keys() {
    let mut editor = editor();
    editor.tick(&[KeyEvent::Named(NamedKey::Insert)]);
    assert_eq!(editor.mode(), Mode::Insert);
    editor.tick(&[KeyEvent::Named(NamedKey::Escape)]);
    editor.tick(&[KeyEvent::Named(NamedKey::Select)]);
    assert_eq!(editor.mode(), Mode::Select);
}

#[test]
fn cursor_moves_in_normal_mode() {
    let mut editor = editor();
    press(&mut editor, "iab<CR>cde<Esc>");
    press(&mut editor, "<Up>");
    assert_eq!(editor.buffer().cursor(), Position::new(0, 2));
    press(&mut editor, "<Right>");
    assert_eq!(editor.buffer().cursor(), Position::new(1, 0));
    press(&mut editor, "<Left><Left>");
    assert_eq!(editor.buffer().cursor(), Position::new(0, 1));
}

#[test]
fn write_to_disk_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("notes.txt");

    let mut editor = Editor::new(FileStore::new(&path), QuitSignal::new());
    press(&mut editor, "ihi<CR>there<Esc>:wq<CR>");
    assert!(editor.should_quit());
    assert!(editor.lifecycle().is_requested());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi\nthere\n");

    let reloaded = FileStore::new(&path)
        .load(Default::default())
        .unwrap();
    assert_eq!(reloaded.lines(), editor.buffer().lines());
}
