//! Secret list formatting and display
//!
//! - `console` - one path per line, with the search match highlighted
//! - `json` - machine-readable search report

mod config;
mod console;
mod json;

pub use config::OutputConfig;
pub use console::ConsoleFormatter;
pub use json::{SearchReport, print_json, write_json};
