use crate::{AsyncError, ExecutionResult};
use futures::stream::{self, BoxStream, StreamExt};
use futures_core::Stream;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// What a source delivers: `Ok` items are values, an `Err` is the error
/// signal, and the end of the stream is the completion signal.
pub type SourceStream<T> = BoxStream<'static, Result<T, AsyncError>>;

type OpenFn<T> = dyn Fn(CancellationToken) -> SourceStream<T> + Send + Sync;

/// Shared handle to a producer of values over time.
///
/// Equality is identity: clones of one handle compare equal, two handles
/// built separately never do, even from the same closure. The controller
/// relies on this to ignore redundant `configure` calls.
///
/// Each call to `open` starts an independent delivery, so a source is cold
/// unless its open function shares state between calls.
pub struct AsyncSource<T> {
    open: Arc<OpenFn<T>>,
}

impl<T: Send + 'static> AsyncSource<T> {
    /// Builds a source from an open function. The token passed in is
    /// cancelled when the subscriber loses interest.
    ///
    /// A controller calls `open` while holding its internal lock, so the
    /// function must not call back into the controller that opens it.
    pub fn new<F, S>(open: F) -> Self
    where
        F: Fn(CancellationToken) -> S + Send + Sync + 'static,
        S: Stream<Item = Result<T, AsyncError>> + Send + 'static,
    {
        Self {
            open: Arc::new(move |token: CancellationToken| open(token).boxed()),
        }
    }

    pub fn from_stream<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = Result<T, AsyncError>> + Send + 'static,
    {
        Self::new(move |_| factory())
    }

    /// One-shot source: a single value (or failure), then completion.
    pub fn from_future<F, Fut, R>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: ExecutionResult<T> + Send + 'static,
    {
        Self::new(move |_| stream::once(factory()).map(<R as ExecutionResult<T>>::into_outcome))
    }

    pub fn from_values(values: Vec<T>) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move |_| stream::iter(values.clone().into_iter().map(Ok)))
    }

    /// A source that fails immediately, without emitting.
    pub fn failing(error: AsyncError) -> Self {
        Self::new(move |_| stream::once(futures::future::ready(Err(error.clone()))))
    }

    /// Derives a source that fails with [`AsyncError::Timeout`] unless the
    /// whole stream terminates within `timeout`. The result has a new identity.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let inner = self.clone();
        Self::new(move |token| {
            let deadline = Instant::now() + timeout;
            stream::unfold(Some(inner.open(token)), move |state| async move {
                let mut stream = state?;
                match tokio::time::timeout_at(deadline, stream.next()).await {
                    Ok(Some(Err(error))) => Some((Err(error), None)),
                    Ok(Some(item)) => Some((item, Some(stream))),
                    Ok(None) => None,
                    Err(_) => Some((Err(AsyncError::Timeout), None)),
                }
            })
        })
    }

    /// Starts a delivery. Dropping the stream, or cancelling `token`, ends it.
    pub fn open(&self, token: CancellationToken) -> SourceStream<T> {
        (self.open)(token)
    }
}

impl<T> AsyncSource<T> {
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.open, &other.open)
    }
}

impl<T> Clone for AsyncSource<T> {
    fn clone(&self) -> Self {
        Self {
            open: self.open.clone(),
        }
    }
}

impl<T> PartialEq for AsyncSource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for AsyncSource<T> {}

impl<T> fmt::Debug for AsyncSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSource")
            .field("open", &Arc::as_ptr(&self.open).cast::<()>())
            .finish()
    }
}
