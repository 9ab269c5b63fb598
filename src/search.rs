use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs a piece of work once input has been quiet for a fixed period.
///
/// Scheduling new work aborts whatever was scheduled before, whether it is
/// still waiting out the quiet period or already running.
pub struct Debouncer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replace any pending work with `work`, to run after the quiet period.
    pub fn schedule<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            work.await;
        }));
    }

    /// Abort pending work, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
