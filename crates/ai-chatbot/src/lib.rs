//! A keyword-context chatbot ready to run against an OpenAI-compatible
//! provider.
//!
//! The crate includes a CLI tool for chatting in the terminal. It also
//! exposes the built-in knowledge presets and the environment-driven
//! [`Settings`] so other front ends (like the HTTP server) start the same
//! way.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod knowledge;
mod settings;

pub use knowledge::Preset;
pub use settings::{
    Error as SettingsError, ErrorKind as SettingsErrorKind, Settings,
};

/// Re-exports of [`ai_chatbot_core`] crate.
pub mod core {
    pub use ai_chatbot_core::*;
}
