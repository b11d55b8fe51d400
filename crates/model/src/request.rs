/// The model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// The input messages, in chronological order.
    pub messages: Vec<ModelMessage>,
    /// Sampling options for this request.
    pub options: ModelOptions,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ModelMessage {
    /// Returns the text content of the message.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            ModelMessage::System(content)
            | ModelMessage::User(content)
            | ModelMessage::Assistant(content) => content,
        }
    }
}

/// Options that control how the model samples a completion.
///
/// Values are passed to the provider as-is. Out-of-range values are
/// rejected by the provider, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelOptions {
    /// Identifier of the model to use.
    pub model: String,
    /// Sampling temperature, typically within `[0, 2]`.
    pub temperature: f32,
    /// Upper bound of generated tokens.
    pub max_tokens: u32,
}

impl Default for ModelOptions {
    #[inline]
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}
