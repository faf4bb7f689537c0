//! Service ports: traits + data contracts.

pub mod dialog;
pub mod file;
pub mod settings;

pub use dialog::{Alert, AlertKind, CloseDecision, DialogHost};
pub use file::{FileError, FileProvider, Result as FileResult};
pub use settings::{Settings, DEFAULT_DIVIDER_POSITION};
