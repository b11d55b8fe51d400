use ai_chatbot_model::{ModelChoice, ModelFinishReason, ModelResponse};

use crate::proto::ChatCompletion;

/// Converts a completion into the provider-neutral response, keeping the
/// provider's choice order.
pub fn into_model_response(mut completion: ChatCompletion) -> ModelResponse {
    completion.choices.sort_by_key(|choice| choice.index);
    let choices = completion
        .choices
        .into_iter()
        .map(|choice| ModelChoice {
            content: choice.message.content,
            finish_reason: choice.finish_reason.as_deref().map(finish_reason),
        })
        .collect();
    ModelResponse { choices }
}

#[inline]
fn finish_reason(reason: &str) -> ModelFinishReason {
    match reason {
        "stop" => ModelFinishReason::Stop,
        "length" => ModelFinishReason::Length,
        "content_filter" => ModelFinishReason::ContentFilter,
        _ => ModelFinishReason::Other,
    }
}
