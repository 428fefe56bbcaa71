//! Notification feed and the timer that feeds it.
//!
//! The ticker runs as a tokio task and sends into a channel; the feed itself
//! is plain owned state, updated by whoever receives from that channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use stockroom_core::NotificationId;

/// Default period between simulated notifications.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// `New notification at HH:MM:SS` (local wall clock).
    pub fn timed(at: DateTime<Local>) -> Self {
        Self::new(format!("New notification at {}", at.format("%H:%M:%S")))
    }
}

/// Unbounded, arrival-ordered list of notifications plus the panel toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    open: bool,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    /// Flip the panel open/closed, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Notification at a 0-based position.
    pub fn get(&self, position: usize) -> Option<&Notification> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}

/// Periodic notification source.
pub struct NotificationTicker;

impl NotificationTicker {
    /// Spawn the ticker on the current tokio runtime.
    ///
    /// The first notification is sent one full `period` after spawning. The
    /// task ends when the handle is shut down or dropped, or when the
    /// receiver goes away.
    pub fn spawn(period: Duration, tx: mpsc::UnboundedSender<Notification>) -> TickerHandle {
        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();

        let task = tokio::spawn(async move {
            tracing::debug!(period_secs = period.as_secs(), "notification ticker started");

            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = signal.notified() => {
                        tracing::debug!("notification ticker received shutdown signal");
                        break;
                    }
                    _ = interval.tick() => {
                        if tx.send(Notification::timed(Local::now())).is_err() {
                            tracing::debug!("notification receiver dropped; stopping ticker");
                            break;
                        }
                    }
                }
            }
        });

        TickerHandle {
            shutdown,
            task: Some(task),
        }
    }
}

/// Owner of a running ticker. Dropping it stops the ticker.
#[derive(Debug)]
pub struct TickerHandle {
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Signal the ticker to stop and wait for it to finish.
    pub async fn shutdown(mut self) {
        self.shutdown.notify_one();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "notification ticker ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
