//! Rendered Markdown preview.

pub mod pane;
pub mod render;

pub use pane::MarkdownPreviewPane;
pub use render::{render_html, render_inline};
