use tokio_util::sync::CancellationToken;

/// The live link between a controller and the source it tracks.
///
/// Cancellation is synchronous: once `cancel` returns, the controller treats
/// every later event carrying this generation as stale. Dropping the handle
/// cancels it as well.
#[derive(Debug)]
pub(crate) struct Subscription {
    generation: u64,
    token: CancellationToken,
}

impl Subscription {
    pub(crate) fn new(generation: u64, token: CancellationToken) -> Self {
        Self { generation, token }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
