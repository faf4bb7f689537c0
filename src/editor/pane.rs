use super::markdown::MarkdownAst;
use crate::core::{Property, ReadOnlyProperty};
use crate::models::{OpKind, TextBuffer, UndoManager};
use compact_str::CompactString;
use std::ops::Range;
use std::path::PathBuf;
use std::rc::Rc;

/// Markdown source editor: text, undo history and the observables the
/// preview follows.
pub struct MarkdownEditorPane {
    buffer: TextBuffer,
    undo: UndoManager,
    caret: usize,
    path: Property<Option<PathBuf>>,
    markdown_ast: Property<Rc<MarkdownAst>>,
    scroll_y: Property<f64>,
    focus_requests: u64,
}

impl MarkdownEditorPane {
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            undo: UndoManager::new(),
            caret: 0,
            path: Property::new(None),
            markdown_ast: Property::new(Rc::new(MarkdownAst::default())),
            scroll_y: Property::new(0.0),
            focus_requests: 0,
        }
    }

    pub fn markdown(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Replace the whole document as a single undoable edit.
    pub fn set_markdown(&mut self, markdown: &str) {
        let len = self.buffer.len_chars();
        self.replace(0..len, markdown);
        self.caret = 0;
    }

    pub fn insert(&mut self, char_offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let char_offset = char_offset.min(self.buffer.len_chars());
        self.buffer.rope_mut().insert(char_offset, text);
        self.undo.push(OpKind::Insert {
            char_offset,
            text: CompactString::new(text),
        });
        self.caret = char_offset + text.chars().count();
        self.text_changed();
    }

    pub fn delete(&mut self, range: Range<usize>) {
        let range = self.buffer.clamp(range);
        if range.is_empty() {
            return;
        }
        let deleted = self.buffer.slice(range.clone());
        self.buffer.rope_mut().remove(range.clone());
        self.undo.push(OpKind::Delete {
            start: range.start,
            end: range.end,
            deleted: CompactString::from(deleted),
        });
        self.caret = range.start;
        self.text_changed();
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let range = self.buffer.clamp(range);
        if range.is_empty() {
            self.insert(range.start, text);
            return;
        }
        if text.is_empty() {
            self.delete(range);
            return;
        }
        let removed = self.buffer.slice(range.clone());
        if removed == text {
            return;
        }
        let rope = self.buffer.rope_mut();
        rope.remove(range.clone());
        rope.insert(range.start, text);
        self.undo.push(OpKind::Replace {
            start: range.start,
            removed: CompactString::from(removed),
            inserted: CompactString::new(text),
        });
        self.caret = range.start + text.chars().count();
        self.text_changed();
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.undo(self.buffer.rope_mut()) {
            Some(caret) => {
                self.caret = caret;
                self.text_changed();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undo.redo(self.buffer.rope_mut()) {
            Some(caret) => {
                self.caret = caret;
                self.text_changed();
                true
            }
            None => false,
        }
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    pub fn undo_manager_mut(&mut self) -> &mut UndoManager {
        &mut self.undo
    }

    pub fn path_property(&self) -> &Property<Option<PathBuf>> {
        &self.path
    }

    pub fn markdown_ast(&self) -> Rc<MarkdownAst> {
        self.markdown_ast.get()
    }

    pub fn markdown_ast_property(&self) -> ReadOnlyProperty<Rc<MarkdownAst>> {
        self.markdown_ast.read_only()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(if y.is_finite() { y.max(0.0) } else { 0.0 });
    }

    pub fn scroll_y_property(&self) -> ReadOnlyProperty<f64> {
        self.scroll_y.read_only()
    }

    pub fn request_focus(&mut self) {
        self.focus_requests += 1;
    }

    pub fn focus_requests(&self) -> u64 {
        self.focus_requests
    }

    fn text_changed(&self) {
        self.markdown_ast
            .set(Rc::new(MarkdownAst::parse(self.buffer.rope())));
    }
}

impl Default for MarkdownEditorPane {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/pane.rs"]
mod tests;
