use super::*;
use crate::kernel::services::ports::{
    AlertKind, CloseDecision, DialogHost, FileError, FileProvider, FileResult,
};
use crate::kernel::services::{ui_bus, UiBusReceiver};
use crate::kernel::Options;
use crate::views::TabPaneId;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Default)]
struct RecordingDialogs {
    alerts: RefCell<Vec<Alert>>,
}

impl DialogHost for RecordingDialogs {
    fn show_alert(&self, alert: &Alert) {
        self.alerts.borrow_mut().push(alert.clone());
    }

    fn confirm_close(&self, _alert: &Alert) -> CloseDecision {
        CloseDecision::Cancel
    }

    fn choose_save_path(&self, _suggested: Option<&Path>) -> Option<PathBuf> {
        None
    }
}

#[derive(Default)]
struct MemoryFiles {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    read_only: Cell<bool>,
}

impl MemoryFiles {
    fn put(&self, path: &str, bytes: &[u8]) {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), bytes.to_vec());
    }

    fn bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl FileProvider for MemoryFiles {
    fn scheme(&self) -> &'static str {
        "memory"
    }

    fn read_file_bytes(&self, path: &Path) -> FileResult<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FileError::NotFound(path.to_path_buf()))
    }

    fn write_file_bytes(&self, path: &Path, content: &[u8]) -> FileResult<()> {
        if self.read_only.get() {
            return Err(FileError::PermissionDenied(path.to_path_buf()));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}

struct Fixture {
    dialogs: Rc<RecordingDialogs>,
    files: Rc<MemoryFiles>,
    options: Options,
    ctx: EditorContext,
    rx: UiBusReceiver,
}

impl Fixture {
    fn new() -> Self {
        let dialogs = Rc::new(RecordingDialogs::default());
        let files = Rc::new(MemoryFiles::default());
        let options = Options::new();
        let (tx, rx) = ui_bus();
        let ctx = EditorContext::new(
            dialogs.clone(),
            files.clone(),
            options.clone(),
            Rc::new(Messages::load_default()),
            tx,
        );
        Self {
            dialogs,
            files,
            options,
            ctx,
            rx,
        }
    }

    fn editor(&self, path: Option<&str>) -> FileEditor {
        FileEditor::new(self.ctx.clone(), path.map(PathBuf::from))
    }

    /// Attach and select the tab, then run one UI turn.
    fn show(&mut self, editor: &mut FileEditor) {
        editor.tab().set_tab_pane(Some(TabPaneId(1)));
        editor.tab().set_selected(true);
        self.pump(editor);
    }

    fn pump(&mut self, editor: &mut FileEditor) {
        for event in self.rx.take_turn() {
            match event {
                UiEvent::Activate(id) if id == editor.tab().id() => editor.activated(),
                UiEvent::Activate(_) => {}
            }
        }
    }

    fn alert_titles(&self) -> Vec<String> {
        self.dialogs
            .alerts
            .borrow()
            .iter()
            .map(|alert| alert.title.clone())
            .collect()
    }
}

fn type_text(editor: &mut FileEditor, text: &str) {
    let pane = editor.editor_mut().expect("activated");
    let end = pane.buffer().len_chars();
    pane.insert(end, text);
}

#[test]
fn test_untitled_tab_label() {
    let fx = Fixture::new();
    let editor = fx.editor(None);

    assert_eq!(editor.tab().text(), "Untitled");
    assert_eq!(editor.tab().tooltip(), None);
    assert_eq!(editor.tab().graphic(), None);
}

#[test]
fn test_tab_label_follows_path() {
    let fx = Fixture::new();
    let editor = fx.editor(Some("/docs/notes.md"));
    assert_eq!(editor.tab().text(), "notes.md");
    assert_eq!(editor.tab().tooltip().as_deref(), Some("/docs/notes.md"));

    editor.set_path(Some(PathBuf::from("/docs/renamed.md")));
    assert_eq!(editor.tab().text(), "renamed.md");

    editor.set_path(None);
    assert_eq!(editor.tab().text(), "Untitled");
    assert_eq!(editor.tab().tooltip(), None);

    editor.set_path(Some(PathBuf::new()));
    assert_eq!(editor.tab().text(), "Untitled");
    assert_eq!(editor.tab().tooltip(), None);
}

#[test]
fn test_selection_defers_activation() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"# A");
    let editor = fx.editor(Some("/docs/a.md"));

    editor.tab().set_tab_pane(Some(TabPaneId(1)));
    editor.tab().set_selected(true);
    assert!(!editor.is_activated());
    assert!(editor.editor().is_none());

    assert_eq!(fx.rx.take_turn(), vec![UiEvent::Activate(editor.tab().id())]);
}

#[test]
fn test_deselect_posts_nothing() {
    let mut fx = Fixture::new();
    let editor = fx.editor(None);
    editor.tab().set_selected(true);
    fx.rx.take_turn();

    editor.tab().set_selected(false);
    assert!(fx.rx.take_turn().is_empty());
}

#[test]
fn test_activation_loads_document() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"# Title\n\nSome *body* text.\n");
    let mut editor = fx.editor(Some("/docs/a.md"));

    fx.show(&mut editor);

    assert!(editor.is_activated());
    let pane = editor.editor().expect("editor pane");
    assert_eq!(pane.markdown(), "# Title\n\nSome *body* text.\n");
    assert_eq!(pane.path_property().get(), Some(PathBuf::from("/docs/a.md")));
    assert_eq!(pane.focus_requests(), 1);

    let preview = editor.preview().expect("preview pane");
    assert_eq!(preview.path(), Some(PathBuf::from("/docs/a.md")));
    assert!(preview.html().contains("<h1>Title</h1>"));
    assert!(preview.html().contains("<em>body</em>"));

    assert!(!editor.is_modified());
    assert!(!editor.can_undo_property().get());
    assert!(!editor.can_redo_property().get());
    assert!(fx.dialogs.alerts.borrow().is_empty());
}

#[test]
fn test_content_is_split_with_configured_divider() {
    let mut fx = Fixture::new();
    fx.options.set_divider_position(0.3);
    let mut editor = fx.editor(None);

    fx.show(&mut editor);

    let content = editor.tab().content().expect("content");
    assert_eq!(content.items(), &[PaneKind::Editor, PaneKind::Preview]);
    assert_eq!(content.divider_positions(), &[0.3]);
}

#[test]
fn test_activation_is_idempotent() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"first");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    fx.files.put("/docs/a.md", b"changed on disk");
    editor.activated();

    let pane = editor.editor().expect("editor pane");
    assert_eq!(pane.markdown(), "first");
    assert_eq!(pane.focus_requests(), 2);
}

#[test]
fn test_stale_activation_is_ignored() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"text");

    // closed before the UI turn
    let mut closed = fx.editor(Some("/docs/a.md"));
    closed.tab().set_tab_pane(Some(TabPaneId(1)));
    closed.tab().set_selected(true);
    closed.tab().set_tab_pane(None);
    fx.pump(&mut closed);
    assert!(!closed.is_activated());

    // another tab was selected before the UI turn
    let mut switched = fx.editor(Some("/docs/a.md"));
    switched.tab().set_tab_pane(Some(TabPaneId(1)));
    switched.tab().set_selected(true);
    switched.tab().set_selected(false);
    fx.pump(&mut switched);
    assert!(!switched.is_activated());
    assert!(switched.editor().is_none());
}

#[test]
fn test_edit_then_save_clears_modified() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"hello");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    type_text(&mut editor, " world");
    assert!(editor.is_modified());
    assert!(editor.can_undo_property().get());
    assert_eq!(editor.tab().graphic().as_deref(), Some("*"));
    assert_eq!(editor.tab().display_label(), "*a.md");

    assert!(editor.save());
    assert!(!editor.is_modified());
    assert_eq!(editor.tab().graphic(), None);
    assert_eq!(fx.files.bytes("/docs/a.md").as_deref(), Some(&b"hello world"[..]));
}

#[test]
fn test_save_without_edits_stays_unmodified() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"same");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    assert!(editor.save());
    assert!(!editor.is_modified());
    assert_eq!(fx.files.bytes("/docs/a.md").as_deref(), Some(&b"same"[..]));
}

#[test]
fn test_undo_to_saved_position_clears_modified() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"abc");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    type_text(&mut editor, "d");
    assert!(editor.is_modified());

    assert!(editor.undo());
    assert!(!editor.is_modified());
    assert!(!editor.can_undo_property().get());
    assert!(editor.can_redo_property().get());

    assert!(editor.redo());
    assert!(editor.is_modified());
}

#[test]
fn test_modified_listeners_are_notified() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"abc");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    editor
        .modified_property()
        .add_listener(move |_, &modified| sink.borrow_mut().push(modified));

    type_text(&mut editor, "!");
    editor.save();
    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn test_unwritable_save_reports_and_keeps_modified() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"abc");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);
    type_text(&mut editor, "d");

    fx.files.read_only.set(true);
    assert!(!editor.save());
    assert!(editor.is_modified());

    let alerts = fx.dialogs.alerts.borrow();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Error);
    assert_eq!(alerts[0].title, "Save");
    assert!(alerts[0].message.contains("/docs/a.md"));
    assert!(alerts[0].message.contains("Permission denied"));
}

#[test]
fn test_unwritable_save_of_clean_document_stays_clean() {
    let mut fx = Fixture::new();
    fx.files.put("/docs/a.md", b"abc");
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    fx.files.read_only.set(true);
    assert!(!editor.save());
    assert!(!editor.is_modified());
}

#[test]
fn test_missing_file_shows_load_alert() {
    let mut fx = Fixture::new();
    let mut editor = fx.editor(Some("/docs/missing.md"));
    fx.show(&mut editor);

    assert!(editor.is_activated());
    assert_eq!(editor.editor().map(|pane| pane.markdown()).as_deref(), Some(""));
    assert!(!editor.is_modified());
    assert_eq!(fx.alert_titles(), vec!["Load".to_string()]);
    assert!(fx.dialogs.alerts.borrow()[0].message.contains("missing.md"));
}

#[test]
fn test_untitled_activation_reads_nothing() {
    let mut fx = Fixture::new();
    let mut editor = fx.editor(None);
    fx.show(&mut editor);

    assert!(editor.is_activated());
    assert!(fx.dialogs.alerts.borrow().is_empty());
    assert!(!editor.can_undo_property().get());
}

#[test]
fn test_unknown_encoding_falls_back_silently() {
    let mut fx = Fixture::new();
    fx.options.set_encoding(Some("no-such-charset".to_string()));
    fx.files.put("/docs/a.md", "héllo".as_bytes());
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);

    assert_eq!(editor.editor().map(|pane| pane.markdown()).as_deref(), Some("héllo"));
    assert!(fx.dialogs.alerts.borrow().is_empty());
}

#[test]
fn test_configured_encoding_is_used_both_ways() {
    let mut fx = Fixture::new();
    fx.options.set_encoding(Some("UTF-16LE".to_string()));
    fx.files.put("/docs/a.md", &[b'h', 0, b'i', 0]);
    let mut editor = fx.editor(Some("/docs/a.md"));
    fx.show(&mut editor);
    assert_eq!(editor.editor().map(|pane| pane.markdown()).as_deref(), Some("hi"));

    type_text(&mut editor, "!");
    assert!(editor.save());
    assert_eq!(
        fx.files.bytes("/docs/a.md").as_deref(),
        Some(&[b'h', 0, b'i', 0, b'!', 0][..])
    );
}

#[test]
fn test_windows_1252_file_saved_unchanged() {
    let bytes = [0x93, b'h', b'i', 0x94, b' ', 0xE9];
    let mut fx = Fixture::new();
    fx.options.set_encoding(Some("windows-1252".to_string()));
    fx.files.put("/docs/quotes.md", &bytes);
    let mut editor = fx.editor(Some("/docs/quotes.md"));
    fx.show(&mut editor);
    assert_eq!(
        editor.editor().map(|pane| pane.markdown()).as_deref(),
        Some("\u{201C}hi\u{201D} é")
    );

    assert!(editor.save());
    assert!(!editor.is_modified());
    assert_eq!(fx.files.bytes("/docs/quotes.md").as_deref(), Some(&bytes[..]));
    assert!(fx.alert_titles().is_empty());
}

#[test]
fn test_save_without_path_fails_with_alert() {
    let mut fx = Fixture::new();
    let mut editor = fx.editor(None);
    fx.show(&mut editor);
    type_text(&mut editor, "draft");

    assert!(!editor.save());
    assert!(editor.is_modified());
    assert_eq!(fx.alert_titles(), vec!["Save".to_string()]);
    assert!(fx.dialogs.alerts.borrow()[0].message.contains("Untitled"));
}

#[test]
fn test_save_before_activation_fails_with_alert() {
    let fx = Fixture::new();
    fx.files.put("/docs/a.md", b"keep me");
    let mut editor = fx.editor(Some("/docs/a.md"));

    assert!(!editor.save());
    assert_eq!(fx.alert_titles(), vec!["Save".to_string()]);
    assert_eq!(fx.files.bytes("/docs/a.md").as_deref(), Some(&b"keep me"[..]));
}

#[test]
fn test_load_before_activation_does_nothing() {
    let fx = Fixture::new();
    fx.files.put("/docs/a.md", b"text");
    let mut editor = fx.editor(Some("/docs/a.md"));

    editor.load();
    assert!(editor.editor().is_none());
    assert!(fx.dialogs.alerts.borrow().is_empty());
}

#[test]
fn test_path_change_reaches_panes() {
    let mut fx = Fixture::new();
    let mut editor = fx.editor(None);
    fx.show(&mut editor);

    editor.set_path(Some(PathBuf::from("/docs/b.md")));
    assert_eq!(
        editor.editor().and_then(|pane| pane.path_property().get()),
        Some(PathBuf::from("/docs/b.md"))
    );
    assert_eq!(
        editor.preview().and_then(MarkdownPreviewPane::path),
        Some(PathBuf::from("/docs/b.md"))
    );
    assert_eq!(editor.tab().text(), "b.md");
}

#[test]
fn test_preview_follows_edits_and_scroll() {
    let mut fx = Fixture::new();
    let mut editor = fx.editor(None);
    fx.show(&mut editor);

    type_text(&mut editor, "## Section\n");
    let html = editor.preview().map(MarkdownPreviewPane::html);
    assert_eq!(html.as_deref(), Some("<h2>Section</h2>\n"));

    if let Some(pane) = editor.editor() {
        pane.set_scroll_y(42.0);
    }
    assert_eq!(editor.preview().map(MarkdownPreviewPane::scroll_y), Some(42.0));
}
