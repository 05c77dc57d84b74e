use crate::AsyncError;

/// One-way notification fired on each transition.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewEvent<T> {
    Loading,
    Value(T),
    Error(AsyncError),
    /// The source completed; carries the last value it emitted.
    Success(Option<T>),
}
