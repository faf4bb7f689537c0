//! 数据模型层

pub mod charset;
pub mod edit_op;
pub mod text_buffer;
pub mod undo;

pub use charset::{decode_or_default, encode_or_default, Charset, CharsetError};
pub use edit_op::{EditOp, OpId, OpKind};
pub use text_buffer::{slice_to_cow, TextBuffer};
pub use undo::UndoManager;
