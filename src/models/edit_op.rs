//! 编辑操作
//!
//! 每个操作都可以正向应用，也可以逆向撤销；偏移量均为字符偏移。

use compact_str::CompactString;
use ropey::Rope;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpId(u64);

impl OpId {
    pub fn root() -> Self {
        Self(0)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpId({})", self.0)
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpKind {
    Insert {
        char_offset: usize,
        text: CompactString,
    },
    Delete {
        start: usize,
        end: usize,
        deleted: CompactString,
    },
    Replace {
        start: usize,
        removed: CompactString,
        inserted: CompactString,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOp {
    pub id: OpId,
    pub kind: OpKind,
}

impl EditOp {
    pub fn new(id: OpId, kind: OpKind) -> Self {
        Self { id, kind }
    }

    /// 正向应用
    pub fn apply(&self, rope: &mut Rope) {
        match &self.kind {
            OpKind::Insert { char_offset, text } => {
                rope.insert(*char_offset, text);
            }
            OpKind::Delete { start, end, .. } => {
                rope.remove(*start..*end);
            }
            OpKind::Replace {
                start,
                removed,
                inserted,
            } => {
                let end = start + removed.chars().count();
                rope.remove(*start..end);
                rope.insert(*start, inserted);
            }
        }
    }

    /// 逆向应用（撤销）
    pub fn revert(&self, rope: &mut Rope) {
        match &self.kind {
            OpKind::Insert { char_offset, text } => {
                let end = char_offset + text.chars().count();
                rope.remove(*char_offset..end);
            }
            OpKind::Delete { start, deleted, .. } => {
                rope.insert(*start, deleted);
            }
            OpKind::Replace {
                start,
                removed,
                inserted,
            } => {
                let end = start + inserted.chars().count();
                rope.remove(*start..end);
                rope.insert(*start, removed);
            }
        }
    }

    /// 操作后光标应在的字符偏移
    pub fn caret_after(&self) -> usize {
        match &self.kind {
            OpKind::Insert { char_offset, text } => char_offset + text.chars().count(),
            OpKind::Delete { start, .. } => *start,
            OpKind::Replace {
                start, inserted, ..
            } => start + inserted.chars().count(),
        }
    }

    /// 撤销后光标应在的字符偏移
    pub fn caret_before(&self) -> usize {
        match &self.kind {
            OpKind::Insert { char_offset, .. } => *char_offset,
            OpKind::Delete { end, .. } => *end,
            OpKind::Replace { start, removed, .. } => start + removed.chars().count(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_op.rs"]
mod tests;
