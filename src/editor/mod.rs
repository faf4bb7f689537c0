//! Markdown source editor pane.

pub mod markdown;
pub mod pane;

pub use markdown::{MarkdownAst, MdBlock, MdBlockKind, TableAlign};
pub use pane::MarkdownEditorPane;
