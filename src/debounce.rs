//! Debounced grid redraws.
//!
//! After a reorder the grid is redrawn once things settle. Each new
//! schedule supersedes the pending one, so a burst of reorders produces a
//! single redraw that sees the final state.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Last-write-wins delayed task runner.
///
/// Owned by whoever triggers the redraws; dropping it cancels the pending
/// task.
#[derive(Debug)]
pub struct RedrawDebouncer {
    delay: Duration,
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl RedrawDebouncer {
    /// Create a debouncer that runs tasks on `runtime` after `delay`.
    pub fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: None,
        }
    }

    /// Create a debouncer on the runtime of the calling task.
    ///
    /// Fails when called outside a tokio runtime.
    pub fn on_current_runtime(delay: Duration) -> Result<Self, tokio::runtime::TryCurrentError> {
        Ok(Self::new(delay, Handle::try_current()?))
    }

    /// Run `task` after the delay, cancelling any task scheduled earlier.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            tracing::trace!("Superseded pending redraw");
        }
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        }));
    }

    /// Cancel the pending task. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a task is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RedrawDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let make = move || {
            let c = Arc::clone(&c);
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let (count, task) = counter();
        let mut debouncer = RedrawDebouncer::on_current_runtime(Duration::from_millis(250)).unwrap();

        debouncer.schedule(task());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once() {
        let (count, task) = counter();
        let mut debouncer = RedrawDebouncer::on_current_runtime(Duration::from_millis(250)).unwrap();

        debouncer.schedule(task());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(task());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (count, task) = counter();
        let mut debouncer = RedrawDebouncer::on_current_runtime(Duration::from_millis(250)).unwrap();

        debouncer.schedule(task());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_requires_runtime() {
        assert!(RedrawDebouncer::on_current_runtime(Duration::from_millis(1)).is_err());
    }
}
