//! Transient status notifications
//!
//! At most one notification is alive at a time. Its lifecycle is driven by
//! `tick` on a monotonic clock: pending until [`SHOW_DELAY`], visible until
//! [`DISMISS_DELAY`], then dismissing for [`REMOVE_DELAY`] before removal.
//! Rendering is delegated to a [`Presenter`] so the target can vary.

use std::time::{Duration, Instant};

/// Delay between creation and becoming visible
pub const SHOW_DELAY: Duration = Duration::from_millis(100);
/// Delay between creation and the start of the dismiss transition
pub const DISMISS_DELAY: Duration = Duration::from_millis(5000);
/// Length of the dismiss transition
pub const REMOVE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationPhase {
    /// Created but not shown yet
    Pending,
    Visible,
    /// Fading out, removed once the transition ends
    Dismissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub phase: NotificationPhase,
    pub created_at: Instant,
}

impl Notification {
    /// Whether the notification should currently be on screen
    pub fn is_visible(&self) -> bool {
        self.phase != NotificationPhase::Pending
    }
}

/// Rendering target for notifications
#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    /// Show or update the rendered notification
    fn present(&mut self, notification: &Notification);

    /// Remove whatever is rendered
    fn dismiss(&mut self);
}

/// Owns the single live notification and drives its lifecycle
pub struct NotificationPresenter<P: Presenter> {
    presenter: P,
    current: Option<Notification>,
}

impl<P: Presenter> NotificationPresenter<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            current: None,
        }
    }

    /// Show a notification now, replacing any existing one
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.show_at(message, kind, Instant::now());
    }

    /// Show a notification created at `now`, replacing any existing one
    pub fn show_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        if self.current.take().is_some() {
            self.presenter.dismiss();
        }
        let message = message.into();
        tracing::debug!("Notification ({kind:?}): {message}");
        self.current = Some(Notification {
            message,
            kind,
            phase: NotificationPhase::Pending,
            created_at: now,
        });
    }

    /// Advance the lifecycle to `now`. A late tick may cross several phases
    /// at once.
    pub fn tick(&mut self, now: Instant) {
        let Some(notification) = self.current.as_mut() else {
            return;
        };

        let elapsed = now.saturating_duration_since(notification.created_at);
        if elapsed >= DISMISS_DELAY + REMOVE_DELAY {
            self.current = None;
            self.presenter.dismiss();
            return;
        }

        let target = if elapsed >= DISMISS_DELAY {
            NotificationPhase::Dismissing
        } else if elapsed >= SHOW_DELAY {
            NotificationPhase::Visible
        } else {
            NotificationPhase::Pending
        };

        if target > notification.phase {
            notification.phase = target;
            self.presenter.present(notification);
        }
    }

    /// When the live notification next changes phase or is removed
    pub fn next_deadline(&self) -> Option<Instant> {
        let notification = self.current.as_ref()?;
        let offset = match notification.phase {
            NotificationPhase::Pending => SHOW_DELAY,
            NotificationPhase::Visible => DISMISS_DELAY,
            NotificationPhase::Dismissing => DISMISS_DELAY + REMOVE_DELAY,
        };
        Some(notification.created_at + offset)
    }

    /// The live notification, if any
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
