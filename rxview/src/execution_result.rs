use crate::AsyncError;

/// Conversion of a future's output into the outcome of a one-shot source.
///
/// Used by [`AsyncSource::from_future`](crate::AsyncSource::from_future): a plain
/// value succeeds, `Err` and `None` become an [`AsyncError`].
pub trait ExecutionResult<T> {
    fn into_outcome(self) -> Result<T, AsyncError>;
}

impl<T> ExecutionResult<T> for T {
    fn into_outcome(self) -> Result<T, AsyncError> {
        Ok(self)
    }
}

impl<T, E> ExecutionResult<T> for Result<T, E>
where
    E: ToString,
{
    fn into_outcome(self) -> Result<T, AsyncError> {
        self.map_err(|error| AsyncError::Error(error.to_string()))
    }
}

impl<T> ExecutionResult<T> for Option<T> {
    fn into_outcome(self) -> Result<T, AsyncError> {
        self.ok_or(AsyncError::None)
    }
}
