//! Service adapters: OS specific implementations.

pub mod dialogs;
pub mod file;
pub mod paths;
pub mod settings;

pub use dialogs::ConsoleDialogHost;
pub use file::LocalFileProvider;
pub use paths::{ensure_log_dir, get_cache_dir, get_log_dir};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
