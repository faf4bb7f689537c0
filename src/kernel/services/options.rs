use super::ports::settings::{Settings, DEFAULT_DIVIDER_POSITION};
use crate::core::Property;

/// Runtime options shared by every open document. Cloning shares state.
#[derive(Debug, Clone)]
pub struct Options {
    encoding: Property<Option<String>>,
    divider_position: Property<f64>,
}

impl Options {
    pub fn new() -> Self {
        Self {
            encoding: Property::new(None),
            divider_position: Property::new(DEFAULT_DIVIDER_POSITION),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let options = Self::new();
        options.set_encoding(settings.encoding.clone());
        options.set_divider_position(settings.divider_position);
        options
    }

    pub fn encoding(&self) -> Option<String> {
        self.encoding.get()
    }

    pub fn set_encoding(&self, encoding: Option<String>) {
        self.encoding.set(encoding);
    }

    pub fn encoding_property(&self) -> &Property<Option<String>> {
        &self.encoding
    }

    pub fn divider_position(&self) -> f64 {
        self.divider_position.get()
    }

    pub fn set_divider_position(&self, position: f64) {
        let position = if position.is_finite() {
            position.clamp(0.0, 1.0)
        } else {
            DEFAULT_DIVIDER_POSITION
        };
        self.divider_position.set(position);
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/options.rs"]
mod tests;
