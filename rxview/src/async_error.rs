use thiserror::Error;

/// Failure reported by an async source.
///
/// A source signals failure by yielding an `Err(AsyncError)`; the controller
/// converts it into [`ViewState::Errored`](crate::ViewState::Errored) and never
/// propagates it to the host.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AsyncError {
    /// A general error with a message describing what went wrong.
    #[error("{0}")]
    Error(String),

    /// The source produced `None` where a value was expected.
    #[error("Source returned None!")]
    None,

    /// The source did not terminate before its deadline.
    #[error("deadline has elapsed!")]
    Timeout,
}

impl AsyncError {
    pub fn error(message: impl Into<String>) -> Self {
        AsyncError::Error(message.into())
    }

    /// Returns true if this error represents a None result.
    pub fn is_none(&self) -> bool {
        matches!(self, AsyncError::None)
    }

    /// Returns true if this error is a general error with a message.
    pub fn is_error(&self) -> bool {
        matches!(self, AsyncError::Error { .. })
    }

    /// Returns true if this error represents a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AsyncError::Timeout)
    }
}
