/// A complete response from the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModelResponse {
    /// Candidate completions, in the order the provider returned them.
    pub choices: Vec<ModelChoice>,
}

impl ModelResponse {
    /// Creates a response with a single choice that stopped normally.
    #[inline]
    pub fn with_content<S: Into<String>>(content: S) -> Self {
        Self {
            choices: vec![ModelChoice {
                content: Some(content.into()),
                finish_reason: Some(ModelFinishReason::Stop),
            }],
        }
    }

    /// Returns the first candidate completion, if any.
    #[inline]
    pub fn first_choice(&self) -> Option<&ModelChoice> {
        self.choices.first()
    }
}

/// One candidate completion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelChoice {
    /// The generated text. Providers may omit it, e.g. when the content
    /// was filtered.
    pub content: Option<String>,
    /// Why the model stopped generating.
    pub finish_reason: Option<ModelFinishReason>,
}

/// The reason why a model response has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelFinishReason {
    /// The model has finished generating text.
    Stop,
    /// The token limit was reached.
    Length,
    /// The content was withheld by the provider's filter.
    ContentFilter,
    /// Any other reason.
    Other,
}
