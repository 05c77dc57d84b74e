use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use futures_core::stream::Stream;
use pin_project::pin_project;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Extension trait that provides additional utility methods for Stream types.
pub trait ViewStreamExt: Stream {
    /// Creates a stream that stops producing items once the provided predicate returns true.
    ///
    /// The item that satisfied the predicate is still yielded. Handy for observing
    /// a controller's state until it settles:
    ///
    /// ```
    /// use futures::StreamExt;
    /// use rxview::ViewStreamExt;
    ///
    /// async fn example() {
    ///     let states: Vec<i32> = futures::stream::iter(0..10)
    ///         .stop_if(|&value| value >= 3)
    ///         .collect()
    ///         .await;
    ///     assert_eq!(states, vec![0, 1, 2, 3]);
    /// }
    /// ```
    fn stop_if<F>(self, test: F) -> StopIf<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        StopIf {
            stream: self,
            stopped: false,
            test,
        }
    }

    /// Ends the stream as soon as `token` is cancelled.
    ///
    /// Cancellation is checked before the inner stream is polled, so once the
    /// token fires no further item is yielded even if one is already buffered.
    fn take_until_cancelled(self, token: CancellationToken) -> TakeUntilCancelled<Self>
    where
        Self: Sized,
    {
        TakeUntilCancelled {
            stream: self,
            cancelled: token.cancelled_owned(),
            done: false,
        }
    }
}
impl<T: ?Sized> ViewStreamExt for T where T: Stream {}

/// A stream that stops producing items once a predicate returns true.
///
/// This stream is created by the `stop_if` method on `ViewStreamExt`.
#[pin_project(project = StopIfProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct StopIf<A, B> {
    #[pin]
    stream: A,
    stopped: bool,
    test: B,
}

impl<A, B> Stream for StopIf<A, B>
where
    A: Stream,
    B: FnMut(&A::Item) -> bool,
{
    type Item = A::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let StopIfProj { stream, stopped, test } = self.project();

        if *stopped {
            Poll::Ready(None)
        } else {
            match stream.poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    if test(&value) {
                        *stopped = true;
                    }

                    Poll::Ready(Some(value))
                }
                Poll::Ready(None) => {
                    *stopped = true;
                    Poll::Ready(None)
                }
                Poll::Pending => Poll::Pending,
            }
        }
    }
}

/// A stream that ends when a cancellation token fires.
///
/// This stream is created by the `take_until_cancelled` method on `ViewStreamExt`.
#[pin_project(project = TakeUntilCancelledProj)]
#[must_use = "Streams do nothing unless polled"]
pub struct TakeUntilCancelled<A> {
    #[pin]
    stream: A,
    #[pin]
    cancelled: WaitForCancellationFutureOwned,
    done: bool,
}

impl<A> Stream for TakeUntilCancelled<A>
where
    A: Stream,
{
    type Item = A::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let TakeUntilCancelledProj { stream, cancelled, done } = self.project();

        if *done {
            return Poll::Ready(None);
        }

        if cancelled.poll(cx).is_ready() {
            *done = true;
            return Poll::Ready(None);
        }

        match stream.poll_next(cx) {
            Poll::Ready(None) => {
                *done = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}
