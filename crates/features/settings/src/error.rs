use demoji_storage::StorageError;
use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },
}

impl From<StorageError> for SettingsError {
    fn from(source: StorageError) -> Self {
        Self::Storage { source, context: None }
    }
}

pub trait SettingsErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SettingsError>;
}

impl<T> SettingsErrorExt<T> for Result<T, StorageError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SettingsError> {
        self.map_err(|source| SettingsError::Storage { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
