pub mod services;

pub use services::{EditorContext, Messages, Options, UiEvent};
