//! VerseKit Core - double-copy Bible reference opener
//!
//! Watches for the "copy the same selection twice" gesture, finds the first
//! Bible reference in the copied text and turns it into a URL for the
//! configured reading site. The tray shell (clipboard hook, browser launch,
//! notifications) lives in the host app.
//!
//! Types are exported via UniFFI proc-macros (#[derive(uniffi::Record/Enum/Object)]).

pub mod clock;
pub mod config;
pub mod gesture;
pub mod grammar;
pub mod interface;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod trigger;
pub mod url_builder;
mod watcher;

pub use config::{ConfigError, Configuration, TriggerSettings};
pub use interface::*;
pub use pipeline::{usage_text, VersePipeline};
pub use watcher::VerseWatcher;

uniffi::setup_scaffolding!("versekit");
