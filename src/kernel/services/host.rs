use std::rc::Rc;

use super::bus::{UiBusSender, UiEvent};
use super::messages::Messages;
use super::options::Options;
use super::ports::{Alert, DialogHost, FileProvider};

/// Services a document controller reaches through its parent window.
#[derive(Clone)]
pub struct EditorContext {
    dialogs: Rc<dyn DialogHost>,
    files: Rc<dyn FileProvider>,
    options: Options,
    messages: Rc<Messages>,
    ui: UiBusSender,
}

impl EditorContext {
    pub fn new(
        dialogs: Rc<dyn DialogHost>,
        files: Rc<dyn FileProvider>,
        options: Options,
        messages: Rc<Messages>,
        ui: UiBusSender,
    ) -> Self {
        Self {
            dialogs,
            files,
            options,
            messages,
            ui,
        }
    }

    pub fn dialogs(&self) -> &dyn DialogHost {
        self.dialogs.as_ref()
    }

    pub fn files(&self) -> &dyn FileProvider {
        self.files.as_ref()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn run_later(&self, event: UiEvent) -> bool {
        self.ui.run_later(event)
    }

    pub fn ui_sender(&self) -> UiBusSender {
        self.ui.clone()
    }

    pub fn show_alert(&self, alert: &Alert) {
        self.dialogs.show_alert(alert);
    }
}
