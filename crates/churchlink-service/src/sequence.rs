//! Latest-response-wins guard for overlapping requests.
//!
//! A search box fires a request per keystroke; responses may arrive out of
//! order. Each request takes a [`Ticket`] before it starts, and only the
//! response holding the newest ticket is kept.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Sequence number handed out by [`LatestOnly::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the value from the most recently issued request that completed.
#[derive(Debug)]
pub struct LatestOnly<T> {
    issued: AtomicU64,
    latest: Mutex<Option<T>>,
}

impl<T> Default for LatestOnly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestOnly<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Start a new request. Every earlier ticket becomes stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` if `ticket` is still current. Returns whether it was
    /// kept.
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        // checked under the lock so a newer completion cannot interleave
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "Discarding stale response");
            return false;
        }
        *latest = Some(value);
        true
    }

    /// Drop the stored value and invalidate outstanding tickets.
    pub fn reset(&self) {
        self.issue();
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<T: Clone> LatestOnly<T> {
    /// The most recently kept value.
    pub fn latest(&self) -> Option<T> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_stale_completion_is_discarded() {
        let guard = LatestOnly::new();
        let first = guard.issue();
        let second = guard.issue();

        assert!(guard.complete(second, "second"));
        assert!(!guard.complete(first, "first"));
        assert_eq!(guard.latest(), Some("second"));
    }

    #[test]
    fn test_in_order_completion() {
        let guard = LatestOnly::new();
        let ticket = guard.issue();
        assert!(guard.is_current(ticket));
        assert!(guard.complete(ticket, 1));
        assert_eq!(guard.latest(), Some(1));
    }

    #[test]
    fn test_reset_invalidates_outstanding() {
        let guard = LatestOnly::new();
        let ticket = guard.issue();
        guard.reset();
        assert!(!guard.complete(ticket, 1));
        assert_eq!(guard.latest(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_older_request_loses() {
        let guard = Arc::new(LatestOnly::new());

        let slow = {
            let guard = guard.clone();
            let ticket = guard.issue();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                guard.complete(ticket, "wel")
            })
        };
        let fast = {
            let guard = guard.clone();
            let ticket = guard.issue();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                guard.complete(ticket, "welcome")
            })
        };

        assert!(fast.await.unwrap());
        assert!(!slow.await.unwrap());
        assert_eq!(guard.latest(), Some("welcome"));
    }
}
