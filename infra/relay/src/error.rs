use std::borrow::Cow;

/// Errors that can occur while setting up or feeding the relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Capacity must be greater than zero for bounded inboxes.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A raw message could not be decoded.
    #[error("Malformed message{}: {source}", format_context(.context))]
    Malformed { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl From<serde_json::Error> for RelayError {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed { source, context: None }
    }
}

pub trait RelayErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, RelayError>;
}

impl<T> RelayErrorExt<T> for Result<T, serde_json::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, RelayError> {
        self.map_err(|source| RelayError::Malformed { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
