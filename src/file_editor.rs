//! Editor for a single file.
//!
//! A `FileEditor` owns one [`Tab`]. The editor and preview panes are built the
//! first time the tab is shown; until then the document is not read from disk.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::{Property, ReadOnlyProperty};
use crate::editor::MarkdownEditorPane;
use crate::kernel::services::ports::Alert;
use crate::kernel::{EditorContext, Messages, UiEvent};
use crate::models::charset;
use crate::preview::MarkdownPreviewPane;
use crate::views::{PaneKind, SplitPane, Tab};

const MODIFIED_GLYPH: &str = "*";

pub struct FileEditor {
    ctx: EditorContext,
    tab: Tab,
    editor: Option<MarkdownEditorPane>,
    preview: Option<MarkdownPreviewPane>,
    path: Property<Option<PathBuf>>,
    modified: Property<bool>,
    can_undo: Property<bool>,
    can_redo: Property<bool>,
}

impl FileEditor {
    pub fn new(ctx: EditorContext, path: Option<PathBuf>) -> Self {
        let tab = Tab::new();
        let path = Property::new(path);
        let modified = Property::new(false);

        let refresh: Rc<dyn Fn()> = {
            let tab = tab.clone();
            let path = path.downgrade();
            let modified = modified.downgrade();
            let ctx = ctx.clone();
            Rc::new(move || {
                let (Some(path), Some(modified)) = (path.upgrade(), modified.upgrade()) else {
                    return;
                };
                path.with(|p| {
                    update_tab(&tab, non_empty(p.as_deref()), modified.get(), ctx.messages())
                });
            })
        };
        let on_path = Rc::clone(&refresh);
        path.add_listener(move |_, _| on_path());
        let on_modified = Rc::clone(&refresh);
        modified.add_listener(move |_, _| on_modified());
        refresh();

        // content is built on the next UI turn, never inside the selection change
        let ui = ctx.ui_sender();
        let id = tab.id();
        tab.selected_property().add_listener(move |_, &selected| {
            if selected && !ui.run_later(UiEvent::Activate(id)) {
                tracing::debug!(tab = ?id, "ui queue closed; activation dropped");
            }
        });

        Self {
            ctx,
            tab,
            editor: None,
            preview: None,
            path,
            modified,
            can_undo: Property::new(false),
            can_redo: Property::new(false),
        }
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    pub fn editor(&self) -> Option<&MarkdownEditorPane> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut MarkdownEditorPane> {
        self.editor.as_mut()
    }

    pub fn preview(&self) -> Option<&MarkdownPreviewPane> {
        self.preview.as_ref()
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.path.get()
    }

    pub fn set_path(&self, path: Option<PathBuf>) {
        self.path.set(path);
    }

    pub fn path_property(&self) -> &Property<Option<PathBuf>> {
        &self.path
    }

    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }

    pub fn modified_property(&self) -> ReadOnlyProperty<bool> {
        self.modified.read_only()
    }

    pub fn can_undo_property(&self) -> ReadOnlyProperty<bool> {
        self.can_undo.read_only()
    }

    pub fn can_redo_property(&self) -> ReadOnlyProperty<bool> {
        self.can_redo.read_only()
    }

    /// Whether the panes have been built.
    pub fn is_activated(&self) -> bool {
        self.tab.has_content()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.as_mut().is_some_and(MarkdownEditorPane::undo)
    }

    pub fn redo(&mut self) -> bool {
        self.editor.as_mut().is_some_and(MarkdownEditorPane::redo)
    }

    /// Runs on the UI turn after the tab was selected.
    pub fn activated(&mut self) {
        if self.tab.tab_pane().is_none() || !self.tab.is_selected() {
            // tab is already closed or no longer active
            tracing::debug!(tab = ?self.tab.id(), "stale activation ignored");
            return;
        }

        if self.tab.has_content() {
            if let Some(editor) = self.editor.as_mut() {
                editor.request_focus();
            }
            return;
        }

        let editor = MarkdownEditorPane::new();
        editor.path_property().bind(&self.path);
        self.editor = Some(editor);

        self.load();

        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        // the freshly loaded text is the start of history
        editor.undo_manager_mut().forget_history();

        let preview = MarkdownPreviewPane::new();
        preview.path_property().bind(&self.path);
        preview
            .markdown_ast_property()
            .bind(&editor.markdown_ast_property());
        preview
            .scroll_y_property()
            .bind(&editor.scroll_y_property());

        let undo = editor.undo_manager();
        self.modified
            .bind_map(&undo.at_marked_position_property(), |at_mark: &bool| !*at_mark);
        self.can_undo.bind(&undo.undo_available_property());
        self.can_redo.bind(&undo.redo_available_property());

        let split = SplitPane::new(vec![PaneKind::Editor, PaneKind::Preview])
            .with_divider(0, self.ctx.options().divider_position());
        self.tab.set_content(Some(split));

        editor.request_focus();
        self.preview = Some(preview);
        tracing::debug!(tab = ?self.tab.id(), "tab content created");
    }

    /// Read the file into the editor. Without a path, or before activation, does nothing.
    pub fn load(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };
        let Some(editor) = self.editor.as_mut() else {
            tracing::debug!(path = %path.display(), "load before activation ignored");
            return;
        };

        match self.ctx.files().read_file_bytes(&path) {
            Ok(bytes) => {
                let encoding = self.ctx.options().encoding();
                let markdown = charset::decode_or_default(&bytes, encoding.as_deref());
                editor.set_markdown(&markdown);
                editor.undo_manager_mut().mark();
                tracing::info!(path = %path.display(), bytes = bytes.len(), "document loaded");
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "load failed");
                show_failure(&self.ctx, "FileEditor.loadFailed", &path.display(), &err);
            }
        }
    }

    /// Write the editor text to the current path. Failures are shown, not returned.
    pub fn save(&mut self) -> bool {
        let Some(path) = self.current_path() else {
            let messages = self.ctx.messages();
            let untitled = messages.get("FileEditor.untitled");
            let reason = messages.get("FileEditor.saveFailed.noPath");
            tracing::warn!("save without a path");
            show_failure(&self.ctx, "FileEditor.saveFailed", &untitled, &reason);
            return false;
        };
        let Some(editor) = self.editor.as_mut() else {
            let reason = self.ctx.messages().get("FileEditor.saveFailed.notLoaded");
            tracing::warn!(path = %path.display(), "save before activation");
            show_failure(&self.ctx, "FileEditor.saveFailed", &path.display(), &reason);
            return false;
        };

        let encoding = self.ctx.options().encoding();
        let bytes = charset::encode_or_default(&editor.markdown(), encoding.as_deref());

        match self.ctx.files().write_file_bytes(&path, &bytes) {
            Ok(()) => {
                editor.undo_manager_mut().mark();
                tracing::info!(path = %path.display(), bytes = bytes.len(), "document saved");
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "save failed");
                show_failure(&self.ctx, "FileEditor.saveFailed", &path.display(), &err);
                false
            }
        }
    }

    fn current_path(&self) -> Option<PathBuf> {
        self.path
            .with(|path| non_empty(path.as_deref()).map(Path::to_path_buf))
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn update_tab(tab: &Tab, path: Option<&Path>, modified: bool, messages: &Messages) {
    let text = match path {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => messages.get("FileEditor.untitled"),
    };
    tab.set_text(text);
    tab.set_tooltip(path.map(|p| p.display().to_string()));
    tab.set_graphic(modified.then(|| MODIFIED_GLYPH.to_string()));
}

fn show_failure(ctx: &EditorContext, key: &str, subject: &dyn Display, reason: &dyn Display) {
    let messages = ctx.messages();
    let alert = Alert::error(
        messages.get(&format!("{key}.title")),
        messages.format(&format!("{key}.message"), &[subject, reason]),
    );
    ctx.show_alert(&alert);
}

#[cfg(test)]
#[path = "../tests/unit/file_editor.rs"]
mod tests;
