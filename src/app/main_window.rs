//! 主窗口：管理所有标签页
//!
//! 职责：
//! - 持有每个 FileEditor（按值）
//! - 维护当前选中的标签，选中变化由 UI 队列在下一轮激活
//! - 新建 / 打开 / 保存 / 关闭文档

use crate::file_editor::FileEditor;
use crate::kernel::services::ports::{Alert, AlertKind, CloseDecision, DialogHost, FileProvider};
use crate::kernel::services::{ui_bus, UiBusReceiver};
use crate::kernel::{EditorContext, Messages, Options, UiEvent};
use crate::views::TabPaneId;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

pub struct MainWindow {
    ctx: EditorContext,
    ui_rx: UiBusReceiver,
    pane_id: TabPaneId,
    editors: Vec<FileEditor>,
    active: Option<usize>,
}

impl MainWindow {
    pub fn new(
        dialogs: Rc<dyn DialogHost>,
        files: Rc<dyn FileProvider>,
        options: Options,
        messages: Rc<Messages>,
    ) -> Self {
        let (ui_tx, ui_rx) = ui_bus();
        Self {
            ctx: EditorContext::new(dialogs, files, options, messages, ui_tx),
            ui_rx,
            pane_id: TabPaneId(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed)),
            editors: Vec::new(),
            active: None,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    pub fn pane_id(&self) -> TabPaneId {
        self.pane_id
    }

    pub fn editors(&self) -> &[FileEditor] {
        &self.editors
    }

    pub fn editor(&self, index: usize) -> Option<&FileEditor> {
        self.editors.get(index)
    }

    pub fn editor_mut(&mut self, index: usize) -> Option<&mut FileEditor> {
        self.editors.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_editor(&self) -> Option<&FileEditor> {
        self.active.and_then(|index| self.editors.get(index))
    }

    pub fn active_editor_mut(&mut self) -> Option<&mut FileEditor> {
        self.active.and_then(|index| self.editors.get_mut(index))
    }

    /// Labels as drawn in the tab strip.
    pub fn tab_labels(&self) -> Vec<String> {
        self.editors
            .iter()
            .map(|editor| editor.tab().display_label())
            .collect()
    }

    pub fn index_of_path(&self, path: &Path) -> Option<usize> {
        self.editors
            .iter()
            .position(|editor| editor.path().as_deref() == Some(path))
    }

    pub fn new_editor(&mut self) -> usize {
        let editor = FileEditor::new(self.ctx.clone(), None);
        self.push(editor)
    }

    /// Select the tab already showing `path`, or open a new one.
    pub fn open_editor(&mut self, path: impl Into<PathBuf>) -> usize {
        let path = path.into();
        if let Some(index) = self.index_of_path(&path) {
            self.select(index);
            return index;
        }

        let editor = FileEditor::new(self.ctx.clone(), Some(path));
        match self.replaceable_untitled() {
            Some(index) => {
                tracing::debug!(index, "replacing empty untitled tab");
                let old = std::mem::replace(&mut self.editors[index], editor);
                detach(&old);
                self.active = None;
                self.editors[index].tab().set_tab_pane(Some(self.pane_id));
                self.select(index);
                index
            }
            None => self.push(editor),
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.editors.len() {
            return false;
        }
        if self.active == Some(index) {
            return true;
        }
        if let Some(previous) = self.active_editor() {
            previous.tab().set_selected(false);
        }
        self.active = Some(index);
        self.editors[index].tab().set_selected(true);
        true
    }

    /// Run one UI turn. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let events = self.ui_rx.take_turn();
        let handled = events.len();
        for event in events {
            match event {
                UiEvent::Activate(id) => {
                    match self.editors.iter_mut().find(|editor| editor.tab().id() == id) {
                        Some(editor) => editor.activated(),
                        None => tracing::debug!(tab = ?id, "activation for a closed tab"),
                    }
                }
            }
        }
        handled
    }

    /// Save one document, asking for a path first when it has none.
    pub fn save_editor(&mut self, index: usize) -> bool {
        let Some(editor) = self.editors.get_mut(index) else {
            return false;
        };
        if editor.path().is_none() {
            match self.ctx.dialogs().choose_save_path(None) {
                Some(path) => editor.set_path(Some(path)),
                None => {
                    tracing::debug!(index, "save cancelled: no path chosen");
                    return false;
                }
            }
        }
        editor.save()
    }

    /// Save every modified document. True when nothing failed.
    pub fn save_all(&mut self) -> bool {
        let mut all_saved = true;
        for index in 0..self.editors.len() {
            if self.editors[index].is_modified() && !self.save_editor(index) {
                all_saved = false;
            }
        }
        all_saved
    }

    /// Close one tab, asking first when it has unsaved changes.
    /// Returns false when the tab stays open.
    pub fn close_editor(&mut self, index: usize) -> bool {
        let Some(editor) = self.editors.get(index) else {
            return false;
        };

        if editor.is_modified() {
            let messages = self.ctx.messages();
            let name = editor.tab().text();
            let alert = Alert::new(
                AlertKind::Confirmation,
                messages.get("MainWindow.closeEditor.title"),
                messages.format("MainWindow.closeEditor.message", &[&name]),
            );
            match self.ctx.dialogs().confirm_close(&alert) {
                CloseDecision::Save => {
                    if !self.save_editor(index) {
                        return false;
                    }
                }
                CloseDecision::Discard => {}
                CloseDecision::Cancel => return false,
            }
        }

        let closed = self.editors.remove(index);
        detach(&closed);
        tracing::info!(tab = ?closed.tab().id(), path = ?closed.path(), "tab closed");
        drop(closed);

        match self.active {
            Some(active) if active == index => {
                self.active = None;
                if !self.editors.is_empty() {
                    self.select(index.min(self.editors.len() - 1));
                }
            }
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
        true
    }

    /// Close every tab; stops at the first one the user keeps open.
    pub fn close_all(&mut self) -> bool {
        while let Some(last) = self.editors.len().checked_sub(1) {
            if !self.close_editor(last) {
                return false;
            }
        }
        true
    }

    fn push(&mut self, editor: FileEditor) -> usize {
        editor.tab().set_tab_pane(Some(self.pane_id));
        self.editors.push(editor);
        let index = self.editors.len() - 1;
        self.select(index);
        index
    }

    /// A lone untitled tab nobody typed into.
    fn replaceable_untitled(&self) -> Option<usize> {
        match self.editors.as_slice() {
            [only]
                if only.path().is_none()
                    && !only.is_modified()
                    && only.editor().map_or(true, |pane| pane.buffer().is_empty()) =>
            {
                Some(0)
            }
            _ => None,
        }
    }
}

fn detach(editor: &FileEditor) {
    editor.tab().set_selected(false);
    editor.tab().set_tab_pane(None);
}

#[cfg(test)]
#[path = "../../tests/unit/app/main_window.rs"]
mod tests;
