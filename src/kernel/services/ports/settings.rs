use serde::{Deserialize, Serialize};

pub const DEFAULT_DIVIDER_POSITION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Charset name used to read and write documents; unset means the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default = "default_divider_position")]
    pub divider_position: f64,
}

fn default_divider_position() -> f64 {
    DEFAULT_DIVIDER_POSITION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: None,
            divider_position: DEFAULT_DIVIDER_POSITION,
        }
    }
}
