use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use ai_chatbot_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelOptions, ModelProvider,
    ModelProviderError, ModelRequest, ModelResponse,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the last user message back after a short delay.
struct FakeModelProvider;

impl ModelProvider for FakeModelProvider {
    type Error = FakeModelProviderError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let last_user = req.messages.iter().rev().find_map(|msg| match msg {
            ModelMessage::User(text) => Some(text.clone()),
            _ => None,
        });
        let max_tokens = req.options.max_tokens;
        async move {
            sleep(Duration::from_millis(1)).await;
            if max_tokens == 0 {
                return Err(FakeModelProviderError(ErrorKind::InvalidRequest));
            }
            let Some(input) = last_user else {
                return Err(FakeModelProviderError(ErrorKind::Other));
            };
            Ok(ModelResponse::with_content(format!("You said {input}")))
        }
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            messages: vec![
                ModelMessage::System("Be brief.".to_string()),
                ModelMessage::User("Good morning".to_string()),
            ],
            options: ModelOptions::default(),
        };
        let resp = provider.send_request(&req).await.unwrap();
        let choice = resp.first_choice().unwrap();

        assert_eq!(choice.content.as_deref(), Some("You said Good morning"));
        assert_eq!(choice.finish_reason, Some(ModelFinishReason::Stop));
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            messages: vec![],
            options: ModelOptions::default(),
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        let req = ModelRequest {
            messages: vec![ModelMessage::User("Hi".to_string())],
            options: ModelOptions {
                max_tokens: 0,
                ..Default::default()
            },
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_default_options() {
        let options = ModelOptions::default();
        assert_eq!(options.model, "gpt-3.5-turbo");
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.max_tokens, 500);
    }
}
