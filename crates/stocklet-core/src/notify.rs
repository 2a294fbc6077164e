// ── Notification queue ──
//
// Toast-style feedback channel. Every mutation outcome (success or
// failure) lands here as a short-lived entry; each entry removes itself
// after a fixed display duration. Consumers watch the queue and render
// whatever is currently active.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tracing::trace;

/// How long an entry stays visible before self-destructing.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Queue-unique notification handle, usable for early dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Visual flavor of an entry. There is no "info" level: everything the
/// queue carries is the outcome of an attempted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug)]
struct Inner {
    queue: watch::Sender<Arc<Vec<Notification>>>,
    // Wall-clock milliseconds, bumped past itself on collision so two
    // pushes in the same millisecond still get distinct ids.
    last_id: AtomicU64,
    ttl: Duration,
}

/// Cheaply clonable handle to the shared queue.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Mostly for tests that want faster (or effectively infinite) decay.
    pub fn with_ttl(ttl: Duration) -> Self {
        let (queue, _rx) = watch::channel(Arc::new(Vec::new()));
        Self {
            inner: Arc::new(Inner {
                queue,
                last_id: AtomicU64::new(0),
                ttl,
            }),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.push(NotificationKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.push(NotificationKind::Error, message.into())
    }

    /// Current entries, newest last.
    pub fn active(&self) -> Arc<Vec<Notification>> {
        Arc::clone(&self.inner.queue.borrow())
    }

    pub fn watch(&self) -> watch::Receiver<Arc<Vec<Notification>>> {
        self.inner.queue.subscribe()
    }

    /// Remove an entry ahead of its deadline. Unknown ids are ignored,
    /// which also makes the scheduled expiry of a dismissed entry a no-op.
    pub fn dismiss(&self, id: NotificationId) {
        self.inner.queue.send_modify(|entries| {
            let kept: Vec<Notification> =
                entries.iter().filter(|n| n.id != id).cloned().collect();
            if kept.len() != entries.len() {
                trace!(%id, "notification dismissed");
                *entries = Arc::new(kept);
            }
        });
    }

    fn push(&self, kind: NotificationKind, message: String) -> NotificationId {
        let id = self.next_id();
        trace!(%id, ?kind, %message, "notification pushed");
        self.inner.queue.send_modify(|entries| {
            let mut next = entries.as_ref().clone();
            next.push(Notification { id, kind, message });
            *entries = Arc::new(next);
        });

        let notifier = self.clone();
        let ttl = self.inner.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            notifier.dismiss(id);
        });
        id
    }

    fn next_id(&self) -> NotificationId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        let mut prev = self.inner.last_id.load(Ordering::Acquire);
        loop {
            let candidate = now.max(prev + 1);
            match self.inner.last_id.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return NotificationId(candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
