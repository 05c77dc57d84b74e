use crate::subscription::Subscription;
use crate::{
    AsyncError, AsyncSource, SourceStream, Templates, ViewContext, ViewEvent, ViewRenderer,
    ViewState, ViewStreamExt, ViewValue,
};
use futures::StreamExt;
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::pin::pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Mounts one view at a time according to the lifecycle of an async source.
///
/// The host calls [`configure`](Self::configure) whenever its bound source
/// changes and [`dispose`](Self::dispose) when the view is torn down. Values,
/// completion and failure of the tracked source are observed on a spawned
/// tokio task and turned into mounts on the renderer.
///
/// At most one subscription is live. Reconfiguring or disposing cancels it
/// before anything else happens, and any event still in flight from a
/// cancelled subscription is dropped.
pub struct AsyncViewController<T: ViewValue, Tpl: Send + 'static> {
    inner: Arc<Mutex<Inner<T, Tpl>>>,
    state: Mutable<ViewState<T>>,
}

struct Inner<T, Tpl> {
    templates: Templates<Tpl>,
    renderer: Box<dyn ViewRenderer<Tpl, T>>,
    state: Mutable<ViewState<T>>,
    tracked: Option<AsyncSource<T>>,
    latest: Option<T>,
    subscription: Option<Subscription>,
    next_generation: u64,
    disposed: bool,
    listeners: Vec<UnboundedSender<ViewEvent<T>>>,
}

enum SourceEvent<T> {
    Value(T),
    Complete,
    Error(AsyncError),
}

impl<T> From<Result<T, AsyncError>> for SourceEvent<T> {
    fn from(item: Result<T, AsyncError>) -> Self {
        match item {
            Ok(value) => SourceEvent::Value(value),
            Err(error) => SourceEvent::Error(error),
        }
    }
}

impl<T: ViewValue, Tpl: Send + 'static> AsyncViewController<T, Tpl> {
    /// Creates an idle controller. Nothing is mounted until the first
    /// `configure` call.
    pub fn new<R>(templates: Templates<Tpl>, renderer: R) -> Self
    where
        R: ViewRenderer<Tpl, T>,
    {
        let state = Mutable::new(ViewState::Idle);
        let inner = Inner {
            templates,
            renderer: Box::new(renderer),
            state: state.clone(),
            tracked: None,
            latest: None,
            subscription: None,
            next_generation: 0,
            disposed: false,
            listeners: Vec::new(),
        };

        AsyncViewController {
            inner: Arc::new(Mutex::new(inner)),
            state,
        }
    }

    /// Points the controller at `source`, or clears it with `None`.
    ///
    /// Passing the source that is already tracked is a no-op. A present source
    /// is only accepted from within a tokio runtime; outside one the call is
    /// ignored and nothing changes.
    pub fn configure(&self, source: Option<AsyncSource<T>>) {
        let mut inner = lock(&self.inner);
        if inner.disposed {
            trace!("configure after dispose ignored");
            return;
        }

        match source {
            Some(source) => {
                if inner.tracked.as_ref() == Some(&source) {
                    trace!("source unchanged, configure ignored");
                    return;
                }
                let Ok(runtime) = Handle::try_current() else {
                    warn!("configure outside a tokio runtime ignored");
                    return;
                };
                let (generation, stream, token) = inner.start(source);
                drop(inner);
                runtime.spawn(drive(Arc::downgrade(&self.inner), generation, stream, token));
            }
            None => inner.clear(),
        }
    }

    /// Replaces the template set. Takes effect at the next transition.
    pub fn set_templates(&self, templates: Templates<Tpl>) {
        let mut inner = lock(&self.inner);
        if inner.disposed {
            trace!("set_templates after dispose ignored");
            return;
        }
        inner.templates = templates;
    }

    /// Cancels the live subscription and stops all further mounts.
    /// Safe to call more than once.
    pub fn dispose(&self) {
        let mut inner = lock(&self.inner);
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.cancel_subscription();
        inner.tracked = None;
        inner.latest = None;
        inner.listeners.clear();
        inner.transition(ViewState::Disposed);
        debug!("controller disposed");
    }

    /// Receives a [`ViewEvent`] for every transition from now on. The
    /// receiver ends once the controller is disposed.
    pub fn subscribe_events(&self) -> UnboundedReceiver<ViewEvent<T>> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut inner = lock(&self.inner);
        if !inner.disposed {
            inner.listeners.push(tx);
        }
        rx
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<ViewState<T>>> {
        self.state.signal_cloned().to_stream()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<ViewState<T>> {
        self.state.signal_cloned()
    }

    pub fn get_state(&self) -> ViewState<T> {
        self.state.get_cloned()
    }

    /// The most recent value of the tracked source, if it has emitted one.
    pub fn latest_value(&self) -> Option<T> {
        lock(&self.inner).latest.clone()
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.inner).subscription.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        lock(&self.inner).disposed
    }
}

impl<T: ViewValue, Tpl: Send + 'static> Drop for AsyncViewController<T, Tpl> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: ViewValue, Tpl: Send + 'static> Inner<T, Tpl> {
    fn start(&mut self, source: AsyncSource<T>) -> (u64, SourceStream<T>, CancellationToken) {
        self.cancel_subscription();
        self.tracked = Some(source.clone());
        self.latest = None;
        self.transition(ViewState::Loading);
        self.try_mount(Templates::for_loading, None);
        self.notify(ViewEvent::Loading);

        let generation = self.next_generation;
        self.next_generation += 1;
        let token = CancellationToken::new();
        let stream = source.open(token.clone());
        self.subscription = Some(Subscription::new(generation, token.clone()));
        debug!(generation, "subscribed to source");
        (generation, stream, token)
    }

    fn clear(&mut self) {
        self.cancel_subscription();
        self.tracked = None;
        self.latest = None;
        self.transition(ViewState::Idle);
        self.mount(Templates::for_idle, None);
    }

    fn cancel_subscription(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            debug!(generation = subscription.generation(), "subscription cancelled");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.disposed
            && self
                .subscription
                .as_ref()
                .is_some_and(|subscription| subscription.generation() == generation)
    }

    fn on_source_event(&mut self, generation: u64, event: SourceEvent<T>) {
        if !self.is_current(generation) {
            trace!(generation, "stale source event suppressed");
            return;
        }

        match event {
            SourceEvent::Value(value) => {
                self.latest = Some(value.clone());
                self.transition(ViewState::HasValue(value.clone()));
                self.mount(Templates::for_value, Some(ViewContext::new(value.clone())));
                self.notify(ViewEvent::Value(value));
            }
            SourceEvent::Complete => {
                self.subscription = None;
                let last = self.latest.clone();
                self.transition(ViewState::Completed(last.clone()));
                // Remounts even when falling back to the primary template.
                self.mount(Templates::for_completed, Some(ViewContext::from(last.clone())));
                self.notify(ViewEvent::Success(last));
            }
            SourceEvent::Error(error) => {
                self.subscription = None;
                debug!(generation, %error, "source failed");
                self.transition(ViewState::Errored(error.clone()));
                self.try_mount(Templates::for_error, None);
                self.notify(ViewEvent::Error(error));
            }
        }
    }

    fn transition(&mut self, next: ViewState<T>) {
        debug!(
            from = self.state.lock_ref().name(),
            to = next.name(),
            "view state transition"
        );
        self.state.set(next);
    }

    fn mount(&mut self, select: fn(&Templates<Tpl>) -> &Tpl, context: Option<ViewContext<T>>) {
        let template = select(&self.templates);
        self.renderer.mount(template, context);
        self.renderer.mark_for_check();
    }

    /// Mounts only when the selected template is configured; otherwise the
    /// current view stays on screen.
    fn try_mount(
        &mut self,
        select: fn(&Templates<Tpl>) -> Option<&Tpl>,
        context: Option<ViewContext<T>>,
    ) {
        if let Some(template) = select(&self.templates) {
            self.renderer.mount(template, context);
            self.renderer.mark_for_check();
        }
    }

    fn notify(&mut self, event: ViewEvent<T>) {
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

async fn drive<T: ViewValue, Tpl: Send + 'static>(
    inner: Weak<Mutex<Inner<T, Tpl>>>,
    generation: u64,
    stream: SourceStream<T>,
    token: CancellationToken,
) {
    let mut stream = pin!(stream.take_until_cancelled(token.clone()));
    while let Some(item) = stream.next().await {
        let failed = item.is_err();
        let Some(shared) = inner.upgrade() else {
            return;
        };
        lock(&shared).on_source_event(generation, item.into());
        if failed {
            return;
        }
    }

    if token.is_cancelled() {
        return;
    }
    if let Some(shared) = inner.upgrade() {
        lock(&shared).on_source_event(generation, SourceEvent::Complete);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
