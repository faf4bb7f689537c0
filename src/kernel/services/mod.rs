//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app.
//! - `adapters`: OS specific implementations (files, settings, dialogs).

pub mod adapters;
pub mod bus;
pub mod host;
pub mod messages;
pub mod options;
pub mod ports;

pub use bus::{ui_bus, UiBusReceiver, UiBusSender, UiEvent};
pub use host::EditorContext;
pub use messages::Messages;
pub use options::Options;
