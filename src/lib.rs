//! scrivendor - 标签式 Markdown 文档编辑器核心库
//!
//! 模块结构：
//! - core: 可观察属性（Property, Observable）
//! - models: 数据模型（TextBuffer, UndoManager, Charset）
//! - editor: Markdown 编辑面板与块级解析
//! - preview: HTML 预览面板
//! - views: 视图层（Tab, SplitPane）
//! - kernel: 服务层（文件、对话框、设置、消息、UI 队列）
//! - file_editor: 单个文件的标签页控制器
//! - app: 应用层（MainWindow）

pub mod app;
pub mod core;
pub mod editor;
pub mod file_editor;
pub mod kernel;
pub mod models;
pub mod preview;
pub mod views;

pub use file_editor::FileEditor;
