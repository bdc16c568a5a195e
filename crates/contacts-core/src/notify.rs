//! Toast queue
//!
//! The terminal implementation of [`Notifier`]. Toasts are queued in arrival
//! order, expire after a fixed time-to-live and can be dismissed one by one.
//! Dismissing a toast has no effect on the operation that produced it.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::traits::{Notification, Notifier};

/// Default time a toast stays visible
pub const DEFAULT_TOAST_TTL_SECS: u64 = 5;

/// Identifier of a queued toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A queued notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub notification: Notification,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.created_at) >= ttl
    }
}

/// Queue of transient notifications
///
/// Cloning yields a handle to the same queue, so the app can hold it as an
/// `Arc<dyn Notifier>` while the renderer reads it.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<VecDeque<Toast>>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(DEFAULT_TOAST_TTL_SECS))
    }
}

impl ToastQueue {
    /// Create a queue whose toasts expire after `ttl`
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(VecDeque::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::weeks(520)),
        }
    }

    /// Queue a notification with an explicit creation time
    pub fn push_at(&self, notification: Notification, created_at: DateTime<Utc>) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::SeqCst));
        debug!("Queued toast {}: {}", id, notification.title);
        self.lock().push_back(Toast {
            id,
            notification,
            created_at,
        });
        id
    }

    /// Queue a notification stamped with the current time
    pub fn push(&self, notification: Notification) -> ToastId {
        self.push_at(notification, Utc::now())
    }

    /// Toasts still visible at `now`, oldest first; expired ones are dropped
    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut guard = self.lock();
        guard.retain(|t| !t.is_expired(now, self.ttl));
        guard.iter().cloned().collect()
    }

    /// Toasts still visible now
    pub fn visible(&self) -> Vec<Toast> {
        self.visible_at(Utc::now())
    }

    /// Remove one toast; returns whether it was still queued
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|t| t.id != id);
        before != guard.len()
    }

    /// Remove every queued toast
    pub fn dismiss_all(&self) {
        self.lock().clear();
    }

    /// Number of queued toasts, including expired ones not yet pruned
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Toast>> {
        // A panic while holding the lock leaves the queue itself intact
        self.toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        self.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_queue_in_order() {
        let queue = ToastQueue::default();
        queue.notify(Notification::success("Success", "one"));
        queue.notify(Notification::failure("Error", Some(500), "two"));

        let visible = queue.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].notification.body.message(), "one");
        assert_eq!(visible[1].notification.body.message(), "two");
        assert!(visible[0].id < visible[1].id);
    }

    #[test]
    fn test_dismiss_is_independent() {
        let queue = ToastQueue::default();
        let first = queue.push(Notification::success("Success", "one"));
        let second = queue.push(Notification::success("Success", "two"));

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));

        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, second);
    }

    #[test]
    fn test_toasts_expire_after_ttl() {
        let queue = ToastQueue::new(std::time::Duration::from_secs(5));
        let now = Utc::now();
        queue.push_at(Notification::success("Success", "old"), now - Duration::seconds(10));
        queue.push_at(Notification::success("Success", "fresh"), now);

        let visible = queue.visible_at(now);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification.body.message(), "fresh");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clones_share_queue() {
        let queue = ToastQueue::default();
        let notifier: Arc<dyn Notifier> = Arc::new(queue.clone());
        notifier.notify(Notification::success("Success", "shared"));

        assert_eq!(queue.len(), 1);
        queue.dismiss_all();
        assert!(queue.is_empty());
    }
}
