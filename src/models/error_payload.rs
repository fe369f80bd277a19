use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{error::Error as StdError, sync::Arc};

/// The error content of an exception record.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ErrorPayload {
    /// A structured error value. Display and `source()` forward to it.
    #[error(transparent)]
    Error(Arc<dyn StdError + Send + Sync + 'static>),

    /// The textual rendering of an error.
    #[error("{0}")]
    Text(String),

    /// The text of a recovered panic payload.
    #[error("{0}")]
    Panic(String),
}

impl ErrorPayload {
    /// Wrap a structured error value.
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ErrorPayload::Error(Arc::new(error))
    }

    /// Wrap the textual rendering of an error.
    pub fn text(text: impl Into<String>) -> Self {
        ErrorPayload::Text(text.into())
    }

    /// Whether this payload came from a recovered panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, ErrorPayload::Panic(_))
    }
}

impl From<String> for ErrorPayload {
    fn from(text: String) -> Self {
        ErrorPayload::Text(text)
    }
}

impl From<&str> for ErrorPayload {
    fn from(text: &str) -> Self {
        ErrorPayload::Text(text.into())
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for ErrorPayload {
    fn from(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        ErrorPayload::Error(Arc::from(error))
    }
}

impl Serialize for ErrorPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ErrorPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ErrorPayload::Text)
    }
}
