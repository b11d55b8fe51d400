use std::pin::Pin;
use std::sync::Arc;

use ai_chatbot_model::{
    ErrorKind as ProviderErrorKind, ModelMessage, ModelOptions, ModelProvider,
    ModelRequest, ModelResponse,
};
use tracing::Instrument;

use crate::{CompletionError, Message};

type SendRequestResult = Result<ModelResponse, CompletionError>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased
/// interface for the other modules.
///
/// The client is built once at startup and cloned into whoever needs it.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    /// Creates a client that sends requests to `provider`.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ModelClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    fut.await.map_err(|err| {
                        error!("got an error: {err:?}");
                        CompletionError::from_provider(&err)
                    })
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Asks the model for the next assistant message.
    ///
    /// The prompt is the system prompt, then the context as a second system
    /// message, then the transcript. Returns the text of the first choice.
    pub async fn complete(
        &self,
        system_prompt: &str,
        context: &str,
        transcript: &[Message],
        options: &ModelOptions,
    ) -> Result<String, CompletionError> {
        let req = build_request(system_prompt, context, transcript, options);
        let resp = (self.handler_fn)(req).await?;

        let Some(choice) = resp.choices.into_iter().next() else {
            return Err(CompletionError::new(
                ProviderErrorKind::Other,
                "the provider returned no choices",
            ));
        };
        trace!("finish reason: {:?}", choice.finish_reason);
        Ok(choice.content.unwrap_or_default())
    }
}

pub(crate) fn build_request(
    system_prompt: &str,
    context: &str,
    transcript: &[Message],
    options: &ModelOptions,
) -> ModelRequest {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(ModelMessage::System(system_prompt.to_owned()));
    messages.push(ModelMessage::System(format!("Context: {context}")));
    messages.extend(transcript.iter().map(Message::to_model_message));
    ModelRequest {
        messages,
        options: options.clone(),
    }
}
