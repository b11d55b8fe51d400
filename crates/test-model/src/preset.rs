use ai_chatbot_model::ErrorKind;

/// The preset response for an assistant step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresetResponse {
    /// The model replies with the given text.
    Reply(String),
    /// The request fails with the given kind and message.
    Failure(ErrorKind, String),
}

impl PresetResponse {
    /// Creates a successful reply.
    #[inline]
    pub fn reply<S: Into<String>>(content: S) -> Self {
        Self::Reply(content.into())
    }

    /// Creates a failed response.
    #[inline]
    pub fn failure<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self::Failure(kind, message.into())
    }
}
