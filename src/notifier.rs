//! Single-slot transient message display.
//!
//! A transient message overrides the normal status line for a fixed
//! delay. Showing a new message cancels the pending revert before the
//! next one is scheduled, so at most one revert is ever outstanding.

use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, instrument};

/// A message waiting for its revert deadline.
#[derive(Debug, Clone)]
struct PendingRevert {
    message: String,
    deadline: Instant,
}

/// Debounced transient message slot.
///
/// Time comes from [`tokio::time::Instant`], so paused-clock tests can
/// step through the delay deterministically.
#[derive(Debug, Clone)]
pub struct TransientNotifier {
    delay: Duration,
    pending: Option<PendingRevert>,
}

impl TransientNotifier {
    /// Creates an idle notifier that keeps messages up for `delay`.
    #[instrument]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// How long a message stays up.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Displays `message` now and schedules its revert.
    ///
    /// Any message already showing is cancelled together with its timer.
    #[instrument(skip(self, message))]
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        if let Some(previous) = self.pending.take() {
            debug!(cancelled = %previous.message, "Superseding pending revert");
        }
        let deadline = Instant::now() + self.delay;
        debug!(
            message = %message,
            delay_ms = self.delay.as_millis() as u64,
            "Showing transient message"
        );
        self.pending = Some(PendingRevert { message, deadline });
    }

    /// Cancels the pending revert without waiting for it.
    ///
    /// Returns whether a message was showing.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> bool {
        match self.pending.take() {
            Some(previous) => {
                debug!(cancelled = %previous.message, "Cleared transient message");
                true
            }
            None => false,
        }
    }

    /// The message currently on display, if any.
    pub fn message(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.message.as_str())
    }

    /// When the current message reverts.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Number of outstanding reverts: 0 or 1.
    pub fn pending_reverts(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    /// Whether the displayed message has outlived its delay.
    pub fn is_due(&self) -> bool {
        self.deadline()
            .is_some_and(|deadline| deadline <= Instant::now())
    }

    /// Reverts the message if its delay has passed.
    ///
    /// Returns the message that was taken down.
    pub fn expire_due(&mut self) -> Option<String> {
        if !self.is_due() {
            return None;
        }
        let expired = self.pending.take().map(|p| p.message);
        if let Some(message) = &expired {
            debug!(message = %message, "Transient message expired");
        }
        expired
    }

    /// Sleeps until the pending message reverts, then reverts it.
    ///
    /// Never resolves while idle. Dropping the future before it resolves
    /// leaves the slot untouched, so it is safe inside `tokio::select!`.
    pub async fn wait_revert(&mut self) -> String {
        let Some(deadline) = self.deadline() else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        let message = self.pending.take().map(|p| p.message).unwrap_or_default();
        debug!(message = %message, "Transient message reverted");
        message
    }
}
