use crate::AsyncError;

/// The state the controller is in, and therefore which view is mounted.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewState<T> {
    /// No source configured, or the source was cleared.
    Idle,
    /// Subscribed, nothing received yet.
    Loading,
    /// At least one value arrived and the source has not terminated.
    HasValue(T),
    /// The source completed; carries the last value seen, if any.
    Completed(Option<T>),
    /// The source failed. Terminal until the next `configure`.
    Errored(AsyncError),
    /// The controller was disposed. No further transitions happen.
    Disposed,
}

impl<T> ViewState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, ViewState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn has_value(&self) -> bool {
        matches!(self, ViewState::HasValue(_))
    }

    /// The tracked source terminated, successfully or not.
    pub fn is_complete(&self) -> bool {
        matches!(self, ViewState::Completed(_) | ViewState::Errored(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, ViewState::Errored(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Disposed)
    }

    pub fn value_ref(&self) -> Option<&T> {
        match self {
            ViewState::HasValue(value) => Some(value),
            ViewState::Completed(value) => value.as_ref(),
            _ => None,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            ViewState::HasValue(value) => Some(value),
            ViewState::Completed(value) => value,
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AsyncError> {
        match self {
            ViewState::Errored(error) => Some(error),
            _ => None,
        }
    }

    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::HasValue(_) => "has_value",
            ViewState::Completed(_) => "completed",
            ViewState::Errored(_) => "errored",
            ViewState::Disposed => "disposed",
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}
