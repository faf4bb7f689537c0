//! 视图层

pub mod tab;

pub use tab::{PaneKind, SplitPane, Tab, TabId, TabPaneId};
