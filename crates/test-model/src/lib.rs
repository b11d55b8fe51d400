//! A local fake model for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use ai_chatbot_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelRequest,
    ModelResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the conversation script, which
/// is how the model should respond to each turn. A step is selected by the
/// number of user messages in the request: the first user turn gets the
/// first step, and so on. If there are no enough steps in the script, an
/// error will be returned.
///
/// Every request is recorded, so tests can inspect the exact prompt the
/// caller assembled.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    conversation_script: Vec<PresetResponse>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl TestModelProvider {
    /// Creates a provider that answers every turn with the given replies,
    /// in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut provider = Self::default();
        for reply in replies {
            provider.add_assistant_response_step(PresetResponse::reply(reply));
        }
        provider
    }

    #[inline]
    pub fn add_assistant_response_step(&mut self, preset: PresetResponse) {
        self.conversation_script.push(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far.
    ///
    /// Clones of a provider share the same record.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req.clone());

        let user_turns = req
            .messages
            .iter()
            .filter(|msg| matches!(msg, ModelMessage::User(_)))
            .count();
        let step = user_turns
            .checked_sub(1)
            .and_then(|idx| self.conversation_script.get(idx))
            .cloned();
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match step {
                Some(PresetResponse::Reply(content)) => {
                    Ok(ModelResponse::with_content(content))
                }
                Some(PresetResponse::Failure(kind, message)) => {
                    Err(Error { message, kind })
                }
                None => Err(Error {
                    message: "no enough steps".to_owned(),
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ai_chatbot_model::ModelOptions;

    use super::*;

    fn user_request(turns: &[&str]) -> ModelRequest {
        let mut messages = vec![ModelMessage::System("Be nice.".to_owned())];
        for turn in turns {
            messages.push(ModelMessage::User((*turn).to_owned()));
        }
        ModelRequest {
            messages,
            options: ModelOptions::default(),
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestModelProvider::with_replies(["Hello, world!"]);
        provider.add_assistant_response_step(PresetResponse::failure(
            ErrorKind::RateLimitExceeded,
            "slow down",
        ));

        let resp = provider.send_request(&user_request(&["Hi"])).await.unwrap();
        assert_eq!(
            resp.first_choice().unwrap().content.as_deref(),
            Some("Hello, world!")
        );

        let err = provider
            .send_request(&user_request(&["Hi", "Again"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
        assert_eq!(err.to_string(), "slow down");

        let err = provider
            .send_request(&user_request(&["Hi", "Again", "More"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let provider = TestModelProvider::with_replies(["ok"]);
        let clone = provider.clone();
        clone.send_request(&user_request(&["Hi"])).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[1], ModelMessage::User("Hi".to_owned()));
    }
}
