//! scrivendor [FILE...]
//!
//! Opens the given documents in a headless window, activates the first one and
//! prints its rendered preview.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use scrivendor::app::MainWindow;
use scrivendor::kernel::services::adapters::{
    ensure_settings_file, load_settings, ConsoleDialogHost, LocalFileProvider,
};
use scrivendor::kernel::{Messages, Options};

mod logging;

fn main() -> ExitCode {
    let logging = logging::init();
    if let Some(guard) = logging.as_ref() {
        tracing::debug!(log_dir = %guard.log_dir().display(), "logging to file");
    }

    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "settings file unavailable; using defaults");
    }
    let settings = load_settings().unwrap_or_default();
    let mut window = MainWindow::new(
        Rc::new(ConsoleDialogHost),
        Rc::new(LocalFileProvider::new()),
        Options::from_settings(&settings),
        Rc::new(Messages::load_default()),
    );

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        window.new_editor();
    }
    for path in paths {
        window.open_editor(path);
    }
    window.select(0);
    window.pump();

    eprintln!("{}", window.tab_labels().join(" | "));
    let Some(preview) = window.active_editor().and_then(|editor| editor.preview()) else {
        return ExitCode::FAILURE;
    };
    print!("{}", preview.html());

    if window.close_all() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
