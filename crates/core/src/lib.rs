//! Core logic including knowledge lookup, context retrieval, conversation
//! sessions and the completion client.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod error;
pub mod knowledge;
mod model_client;
mod retriever;
mod session;
mod store;

pub use ai_chatbot_model::{ErrorKind as ProviderErrorKind, ModelOptions};
pub use conversation::{Message, Role, Transcript};
pub use error::{CompletionError, Error, ErrorKind};
pub use knowledge::KnowledgeBase;
pub use model_client::ModelClient;
pub use retriever::ContextRetriever;
pub use session::{ERROR_REPLY_PREFIX, Session, SessionBuilder};
pub use store::{DEFAULT_CONVERSATIONS_DIR, TranscriptStore};
