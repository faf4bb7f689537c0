//! Dialog host for headless runs: alerts go to stderr and the log.

use crate::kernel::services::ports::dialog::{Alert, AlertKind, CloseDecision, DialogHost};
use std::path::{Path, PathBuf};

pub struct ConsoleDialogHost;

impl DialogHost for ConsoleDialogHost {
    fn show_alert(&self, alert: &Alert) {
        match alert.kind {
            AlertKind::Error => tracing::error!(title = %alert.title, "{}", alert.message),
            AlertKind::Warning => tracing::warn!(title = %alert.title, "{}", alert.message),
            AlertKind::Information | AlertKind::Confirmation => {
                tracing::info!(title = %alert.title, "{}", alert.message)
            }
        }
        eprintln!("{}: {}", alert.title, alert.message);
    }

    /// No one can answer; unsaved changes are kept by refusing to close.
    fn confirm_close(&self, alert: &Alert) -> CloseDecision {
        tracing::info!(title = %alert.title, "close cancelled without interactive prompt");
        CloseDecision::Cancel
    }

    fn choose_save_path(&self, _suggested: Option<&Path>) -> Option<PathBuf> {
        None
    }
}
