//! Localized UI strings.
//!
//! Templates use positional placeholders: `{0}`, `{1}`, ... Unknown keys
//! render as `!key!` so missing translations are visible but harmless.

use std::collections::HashMap;
use std::fmt::Display;

const DEFAULT_BUNDLE: &str = include_str!("../../../resources/messages.json");

#[derive(Debug, Clone, Default)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Messages {
    /// The bundled English catalog.
    pub fn load_default() -> Self {
        let entries = serde_json::from_str(DEFAULT_BUNDLE).unwrap_or_else(|err| {
            tracing::error!(error = %err, "bundled message catalog is invalid");
            HashMap::new()
        });
        Self { entries }
    }

    /// Default catalog with entries from `json` layered on top.
    pub fn with_overrides(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut messages = Self::load_default();
        messages.entries.extend(overrides);
        Ok(messages)
    }

    pub fn get(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(value) => value.clone(),
            None => {
                tracing::debug!(key, "missing message");
                format!("!{key}!")
            }
        }
    }

    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        format_template(&self.get(key), args)
    }
}

/// Substitute `{n}` with `args[n]`; placeholders without an argument stay as written.
pub fn format_template(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match arg {
            Some((arg, close)) => {
                out.push_str(&arg.to_string());
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/messages.rs"]
mod tests;
