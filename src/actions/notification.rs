//! Transient user notifications.
//!
//! A one-shot message queue between action handlers and the presentation
//! layer. Each notification is delivered to the consumer exactly once and is
//! never stored in view state.

use std::fmt;

use tokio::sync::mpsc;

/// Whether the notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Producer side. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Queue a notification. Dropped silently once the consumer is gone.
    pub fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification consumer gone, dropping message");
        }
    }
}

/// Consumer side, owned by the presentation layer.
#[derive(Debug)]
pub struct NotificationQueue {
    rx: mpsc::UnboundedReceiver<Notification>,
}

impl NotificationQueue {
    /// Wait for the next notification. `None` once every producer is dropped.
    pub async fn next(&mut self) -> Option<Notification> {
        self.rx.recv().await
    }

    /// Take everything queued right now without waiting.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = self.rx.try_recv() {
            out.push(n);
        }
        out
    }
}

/// Create a connected notifier/queue pair.
pub fn channel() -> (Notifier, NotificationQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx }, NotificationQueue { rx })
}
