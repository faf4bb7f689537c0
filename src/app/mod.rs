//! 应用层

pub mod main_window;

pub use main_window::MainWindow;
