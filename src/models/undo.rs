//! 撤销管理器
//!
//! 线性历史：undo 栈 + redo 栈。
//! - `mark()` 记录当前位置为"已保存"基准
//! - `forget_history()` 丢弃当前位置之前的历史
//! - 位置与标记的比较决定文档是否被修改

use super::edit_op::{EditOp, OpId, OpKind};
use crate::core::{Property, ReadOnlyProperty};
use ropey::Rope;

pub struct UndoManager {
    undo_stack: Vec<EditOp>,
    redo_stack: Vec<EditOp>,
    /// 最近一次分配的操作 ID
    last_id: OpId,
    /// 被遗忘的历史的末端；undo 栈为空时的当前位置
    floor: OpId,
    marked: OpId,
    at_marked_position: Property<bool>,
    undo_available: Property<bool>,
    redo_available: Property<bool>,
}

impl UndoManager {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_id: OpId::root(),
            floor: OpId::root(),
            marked: OpId::root(),
            at_marked_position: Property::new(true),
            undo_available: Property::new(false),
            redo_available: Property::new(false),
        }
    }

    /// 记录一个已经应用到文本上的操作，redo 分支被丢弃
    pub fn push(&mut self, kind: OpKind) -> OpId {
        self.last_id = self.last_id.next();
        let id = self.last_id;
        self.undo_stack.push(EditOp::new(id, kind));
        self.redo_stack.clear();
        self.refresh();
        id
    }

    /// 撤销一步，返回撤销后光标位置
    pub fn undo(&mut self, rope: &mut Rope) -> Option<usize> {
        let op = self.undo_stack.pop()?;
        op.revert(rope);
        let caret = op.caret_before();
        self.redo_stack.push(op);
        self.refresh();
        Some(caret)
    }

    /// 重做一步，返回重做后光标位置
    pub fn redo(&mut self, rope: &mut Rope) -> Option<usize> {
        let op = self.redo_stack.pop()?;
        op.apply(rope);
        let caret = op.caret_after();
        self.undo_stack.push(op);
        self.refresh();
        Some(caret)
    }

    pub fn position(&self) -> OpId {
        self.undo_stack.last().map(|op| op.id).unwrap_or(self.floor)
    }

    pub fn mark(&mut self) {
        self.marked = self.position();
        self.refresh();
    }

    pub fn forget_history(&mut self) {
        self.floor = self.position();
        self.undo_stack.clear();
        self.refresh();
    }

    pub fn is_at_marked_position(&self) -> bool {
        self.at_marked_position.get()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn at_marked_position_property(&self) -> ReadOnlyProperty<bool> {
        self.at_marked_position.read_only()
    }

    pub fn undo_available_property(&self) -> ReadOnlyProperty<bool> {
        self.undo_available.read_only()
    }

    pub fn redo_available_property(&self) -> ReadOnlyProperty<bool> {
        self.redo_available.read_only()
    }

    fn refresh(&self) {
        self.at_marked_position.set(self.position() == self.marked);
        self.undo_available.set(self.can_undo());
        self.redo_available.set(self.can_redo());
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/undo.rs"]
mod tests;
