use super::*;
use crate::editor::MarkdownEditorPane;
use std::path::Path;

#[test]
fn test_new_preview_is_blank() {
    let preview = MarkdownPreviewPane::new();
    assert_eq!(preview.html(), "");
    assert_eq!(preview.path(), None);
    assert_eq!(preview.scroll_y(), 0.0);
}

#[test]
fn test_preview_follows_bound_editor() {
    let mut editor = MarkdownEditorPane::new();
    let preview = MarkdownPreviewPane::new();
    let path = Property::new(Some(PathBuf::from("/tmp/a.md")));

    editor.path_property().bind(&path);
    preview.path_property().bind(&path);
    preview
        .markdown_ast_property()
        .bind(&editor.markdown_ast_property());
    preview.scroll_y_property().bind(&editor.scroll_y_property());

    editor.set_markdown("# Hi");
    assert_eq!(preview.html(), "<h1>Hi</h1>\n");

    editor.set_scroll_y(12.0);
    assert_eq!(preview.scroll_y(), 12.0);

    path.set(Some(PathBuf::from("/tmp/b.md")));
    assert_eq!(preview.path().as_deref(), Some(Path::new("/tmp/b.md")));
    assert_eq!(
        editor.path_property().get().as_deref(),
        Some(Path::new("/tmp/b.md"))
    );
}

#[test]
fn test_preview_input_cannot_drive_editor() {
    let mut editor = MarkdownEditorPane::new();
    let preview = MarkdownPreviewPane::new();
    preview.scroll_y_property().bind(&editor.scroll_y_property());

    preview.scroll_y_property().set(99.0);
    assert_eq!(editor.scroll_y(), 0.0);
    assert_eq!(preview.scroll_y(), 0.0);

    editor.insert(0, "text");
    assert_eq!(editor.markdown(), "text");
}
