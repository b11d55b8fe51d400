//! An abstraction layer for chat completion providers.
//!
//! This crate establishes a small protocol between the chatbot and the
//! remote model services it talks to, so that the conversation logic can
//! switch between providers (or a local fake) without modifying the core
//! codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
