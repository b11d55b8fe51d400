use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Display};

use ai_chatbot_model::{ErrorKind as ProviderErrorKind, ModelProviderError};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A role name is not one of `system`, `user` or `assistant`.
    InvalidRole,
    /// A transcript could not be written or read.
    Storage,
    /// A knowledge file could not be loaded.
    Knowledge,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidRole => write!(f, "Invalid role"),
            ErrorKind::Storage => write!(f, "Storage error"),
            ErrorKind::Knowledge => write!(f, "Knowledge error"),
        }
    }
}

/// Describes an error from the chatbot core.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    /// Creates a new error with the `InvalidRole` kind.
    #[inline]
    pub fn invalid_role() -> Self {
        Self {
            kind: ErrorKind::InvalidRole,
            reason: None,
        }
    }

    /// Creates a new error with the `Storage` kind.
    #[inline]
    pub fn storage() -> Self {
        Self {
            kind: ErrorKind::Storage,
            reason: None,
        }
    }

    /// Creates a new error with the `Knowledge` kind.
    #[inline]
    pub fn knowledge() -> Self {
        Self {
            kind: ErrorKind::Knowledge,
            reason: None,
        }
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {}

/// A failed completion.
///
/// The message is the provider's own text, kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompletionError {
    kind: ProviderErrorKind,
    message: String,
}

impl CompletionError {
    /// Creates a completion error.
    #[inline]
    pub fn new<S: Into<String>>(kind: ProviderErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn from_provider<E: ModelProviderError + ?Sized>(err: &E) -> Self {
        Self::new(err.kind(), err.to_string())
    }

    /// Returns the kind reported by the provider.
    #[inline]
    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for CompletionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::storage().with_reason("disk full");
        assert_eq!(err.to_string(), "Storage error: disk full");
        assert_eq!(err.reason(), "disk full");

        let err = Error::invalid_role();
        assert_eq!(err.to_string(), "Invalid role");
        assert_eq!(err.reason(), "Invalid role");
    }
}
