use std::sync::Arc;

use rst_common::with_tokio::tokio::sync::watch;

use super::types::SignalState;

/// `ReadinessSignal` is a single-shot completion signal bridging a webhook event back
/// to the task that started a connection attempt
///
/// The state lives in a `watch` sender so waiters can suspend without holding any lock
/// while the webhook path settles it. The transition guard in [`ReadinessSignal::resolve`]
/// makes every resolution after the first one a no-op.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct ReadinessSignal {
    state: Arc<watch::Sender<SignalState>>,
}

impl ReadinessSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SignalState::Pending);
        Self {
            state: Arc::new(sender),
        }
    }

    /// `resolve` settles the signal, returns `true` only for the call that settled it
    pub fn resolve(&self, success: bool) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_settled() {
                return false;
            }

            *state = if success {
                SignalState::Ready
            } else {
                SignalState::Failed
            };

            true
        })
    }

    pub fn state(&self) -> SignalState {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SignalState::Ready
    }

    pub fn is_settled(&self) -> bool {
        self.state().is_settled()
    }

    /// `has_waiters` is true while some task is suspended in [`ReadinessSignal::wait`]
    pub fn has_waiters(&self) -> bool {
        self.state.receiver_count() > 0
    }

    /// `wait` suspends until the signal is settled and returns whether it is ready
    ///
    /// Returns immediately when the signal was already settled
    pub async fn wait(&self) -> bool {
        let mut receiver = self.state.subscribe();
        let settled = receiver
            .wait_for(|state| state.is_settled())
            .await
            .map(|state| *state);

        matches!(settled, Ok(SignalState::Ready))
    }

    pub fn same_as(&self, other: &ReadinessSignal) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for ReadinessSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::with_tokio::tokio;

    #[test]
    fn test_new_signal_is_pending() {
        let signal = ReadinessSignal::new();
        assert_eq!(signal.state(), SignalState::Pending);
        assert!(!signal.is_ready());
        assert!(!signal.is_settled());
        assert!(!signal.has_waiters());
    }

    #[test]
    fn test_resolve_only_once() {
        let signal = ReadinessSignal::new();
        assert!(signal.resolve(true));
        assert!(!signal.resolve(true));
        assert!(!signal.resolve(false));
        assert!(signal.is_ready());
    }

    #[test]
    fn test_failed_is_not_ready() {
        let signal = ReadinessSignal::new();
        assert!(signal.resolve(false));
        assert!(!signal.resolve(true));
        assert_eq!(signal.state(), SignalState::Failed);
        assert!(!signal.is_ready());
        assert!(signal.is_settled());
    }

    #[tokio::test]
    async fn test_wait_after_resolve_returns_immediately() {
        let signal = ReadinessSignal::new();
        signal.resolve(true);
        assert!(signal.wait().await);
    }

    #[tokio::test]
    async fn test_wait_resumes_on_resolve() {
        let signal = ReadinessSignal::new();
        let waiter = signal.clone();
        let handle = tokio::spawn(async move { waiter.wait().await });

        while !signal.has_waiters() {
            tokio::task::yield_now().await;
        }

        assert!(!handle.is_finished());
        signal.resolve(true);
        signal.resolve(false);

        let ready = handle.await.unwrap();
        assert!(ready);
        assert!(!signal.has_waiters());
    }

    #[tokio::test]
    async fn test_every_waiter_sees_same_result() {
        let signal = ReadinessSignal::new();
        let first = signal.clone();
        let second = signal.clone();

        let handle_first = tokio::spawn(async move { first.wait().await });
        let handle_second = tokio::spawn(async move { second.wait().await });

        signal.resolve(false);
        signal.resolve(true);

        assert!(!handle_first.await.unwrap());
        assert!(!handle_second.await.unwrap());
    }

    #[test]
    fn test_same_as() {
        let signal = ReadinessSignal::new();
        let cloned = signal.clone();
        let other = ReadinessSignal::new();

        assert!(signal.same_as(&cloned));
        assert!(!signal.same_as(&other));
    }
}
