//! Trailing-edge debounce on the tokio timer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runs only the most recently scheduled action, once `delay` passes without
/// another schedule.
///
/// Cancelling invalidates the pending timer only. An action whose timer already
/// fired runs to completion. Firing and cancelling both go through the
/// `pending` slot, so exactly one of them wins: when [`Debouncer::cancel`]
/// returns `true` the action never runs.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: Arc::new(Mutex::new(None)) }
    }

    /// Restart the timer with `action` as the only pending callback
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        {
            let mut pending = self.pending.lock();
            if let Some(previous) = pending.replace(token.clone()) {
                previous.cancel();
            }
        }

        let delay = self.delay;
        let pending = self.pending.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!("debounced action superseded");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            if !claim(&pending, &token) {
                trace!("debounced action cancelled at its deadline");
                return;
            }
            action.await;
        });
    }

    /// Invalidate the pending timer; returns whether one was pending
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Whether a scheduled action is still waiting for its timer
    pub fn is_pending(&self) -> bool {
        self.pending.lock().as_ref().is_some_and(|token| !token.is_cancelled())
    }
}

/// Take the pending slot for a fired timer
///
/// Fails when `token` was cancelled or replaced first; both happen under the
/// same lock.
fn claim(pending: &Mutex<Option<CancellationToken>>, token: &CancellationToken) -> bool {
    let mut slot = pending.lock();
    if token.is_cancelled() {
        return false;
    }
    *slot = None;
    true
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(token) = self.pending.lock().take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_action(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let counter = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_action(&counter));
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_restarts_timer() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_action(&first));
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(counting_action(&second));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_action() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let counter = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_action(&counter));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_does_not_abort() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let counter = Arc::new(AtomicUsize::new(0));
        let slow_counter = counter.clone();

        debouncer.schedule(async move {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            slow_counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_at_deadline_wins_or_reports_fired() {
        for _ in 0..50 {
            let debouncer = Debouncer::new(Duration::from_millis(500));
            let counter = Arc::new(AtomicUsize::new(0));

            debouncer.schedule(counting_action(&counter));
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(500)).await;
            let cancelled = debouncer.cancel();

            tokio::time::sleep(Duration::from_millis(10)).await;
            let ran = counter.load(Ordering::SeqCst) == 1;
            assert_ne!(cancelled, ran, "cancel() and the action must not both succeed");
            assert!(!debouncer.is_pending());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_debouncer_never_fires() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let debouncer = Debouncer::new(Duration::from_millis(100));
            debouncer.schedule(counting_action(&counter));
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
