//! Test doubles for hosts exercising an [`AsyncViewController`](crate::AsyncViewController).
//!
//! [`RecordingRenderer`] remembers every mount, [`ManualSource`] lets a test
//! decide exactly when a source emits, fails or completes.

use crate::{AsyncError, AsyncSource, ViewContext, ViewRenderer, ViewValue};
use futures::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// One call to [`ViewRenderer::mount`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mount<Tpl, T> {
    pub template: Tpl,
    pub context: Option<ViewContext<T>>,
}

impl<Tpl, T> Mount<Tpl, T> {
    /// The value bound to the mounted view, if any.
    pub fn value(&self) -> Option<&T> {
        self.context.as_ref().and_then(ViewContext::value)
    }
}

/// Renderer that records mounts instead of drawing them.
///
/// Clones share the same record, so a test keeps one clone and hands the
/// other to the controller.
pub struct RecordingRenderer<Tpl, T> {
    mounts: Arc<Mutex<Vec<Mount<Tpl, T>>>>,
    checks: Arc<AtomicUsize>,
}

impl<Tpl, T> RecordingRenderer<Tpl, T> {
    pub fn new() -> Self {
        Self {
            mounts: Arc::new(Mutex::new(Vec::new())),
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn mount_count(&self) -> usize {
        lock(&self.mounts).len()
    }

    /// How many times the change-detection hook was called.
    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        lock(&self.mounts).clear();
    }
}

impl<Tpl: Clone, T: Clone> RecordingRenderer<Tpl, T> {
    pub fn mounts(&self) -> Vec<Mount<Tpl, T>> {
        lock(&self.mounts).clone()
    }

    pub fn templates(&self) -> Vec<Tpl> {
        lock(&self.mounts)
            .iter()
            .map(|mount| mount.template.clone())
            .collect()
    }

    /// The view currently on screen.
    pub fn last(&self) -> Option<Mount<Tpl, T>> {
        lock(&self.mounts).last().cloned()
    }
}

impl<Tpl, T> Default for RecordingRenderer<Tpl, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tpl, T> Clone for RecordingRenderer<Tpl, T> {
    fn clone(&self) -> Self {
        Self {
            mounts: self.mounts.clone(),
            checks: self.checks.clone(),
        }
    }
}

impl<Tpl, T> ViewRenderer<Tpl, T> for RecordingRenderer<Tpl, T>
where
    Tpl: Clone + Send + 'static,
    T: Send + 'static,
{
    fn mount(&mut self, template: &Tpl, context: Option<ViewContext<T>>) {
        lock(&self.mounts).push(Mount {
            template: template.clone(),
            context,
        });
    }

    fn mark_for_check(&mut self) {
        self.checks.fetch_add(1, Ordering::SeqCst);
    }
}

struct Emitter<T> {
    tx: UnboundedSender<Result<T, AsyncError>>,
    token: CancellationToken,
}

struct ManualShared<T> {
    emitters: Vec<Emitter<T>>,
    opened: Vec<CancellationToken>,
}

/// A hot source driven by hand.
///
/// Every subscriber that is still open receives each `emit`; `complete` and
/// `fail` end all of them. [`source`](Self::source) always returns the same
/// identity.
pub struct ManualSource<T> {
    shared: Arc<Mutex<ManualShared<T>>>,
    source: AsyncSource<T>,
}

impl<T: ViewValue> ManualSource<T> {
    pub fn new() -> Self {
        let shared = Arc::new(Mutex::new(ManualShared {
            emitters: Vec::new(),
            opened: Vec::new(),
        }));

        let open_shared = shared.clone();
        let source = AsyncSource::new(move |token: CancellationToken| {
            let (tx, rx) = unbounded_channel();
            let mut shared = lock(&open_shared);
            shared.opened.push(token.clone());
            shared.emitters.push(Emitter { tx, token });
            stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) })
        });

        Self { shared, source }
    }

    pub fn source(&self) -> AsyncSource<T> {
        self.source.clone()
    }

    pub fn emit(&self, value: T) {
        lock(&self.shared).emitters.retain(|emitter| {
            !emitter.token.is_cancelled() && emitter.tx.send(Ok(value.clone())).is_ok()
        });
    }

    pub fn fail(&self, error: AsyncError) {
        for emitter in lock(&self.shared).emitters.drain(..) {
            let _ = emitter.tx.send(Err(error.clone()));
        }
    }

    pub fn complete(&self) {
        lock(&self.shared).emitters.clear();
    }

    /// How many times the source has been opened.
    pub fn open_count(&self) -> usize {
        lock(&self.shared).opened.len()
    }

    /// Subscriptions whose token has not been cancelled yet.
    pub fn live_count(&self) -> usize {
        lock(&self.shared)
            .opened
            .iter()
            .filter(|token| !token.is_cancelled())
            .count()
    }

    /// Tokens handed to each `open`, oldest first.
    pub fn tokens(&self) -> Vec<CancellationToken> {
        lock(&self.shared).opened.clone()
    }
}

impl<T: ViewValue> Default for ManualSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
