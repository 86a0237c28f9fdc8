use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient notification raised by the list controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

/// A toast being displayed, with the time it appeared
#[derive(Debug, Clone)]
struct ActiveToast {
    toast: Toast,
    shown_at: Instant,
}

impl ActiveToast {
    fn show(toast: Toast, now: Instant) -> Self {
        Self { toast, shown_at: now }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_DURATION
    }
}

/// Shows toasts one at a time, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    active: Option<ActiveToast>,
    waiting: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toasts: impl IntoIterator<Item = Toast>) {
        self.waiting.extend(toasts);
    }

    /// Expire the visible toast and promote the next one
    pub fn tick(&mut self, now: Instant) {
        if self.active.as_ref().is_some_and(|active| active.is_expired(now)) {
            self.active = None;
        }
        if self.active.is_none() {
            self.active = self.waiting.pop_front().map(|toast| ActiveToast::show(toast, now));
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.active.as_ref().map(|active| &active.toast)
    }

    /// Toasts not yet shown
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let start = Instant::now();
        let active = ActiveToast::show(Toast::error("boom"), start);

        assert_eq!(active.toast.severity, Severity::Error);
        assert!(!active.is_expired(start));
        assert!(!active.is_expired(start + TOAST_DURATION - Duration::from_millis(1)));
        assert!(active.is_expired(start + TOAST_DURATION));
    }

    #[test]
    fn test_queue_shows_every_toast_in_order() {
        let start = Instant::now();
        let mut queue = ToastQueue::default();
        queue.push(vec![Toast::success("Item created"), Toast::error("Could not load items")]);

        queue.tick(start);
        assert_eq!(queue.current(), Some(&Toast::success("Item created")));
        assert_eq!(queue.waiting(), 1);

        queue.tick(start + Duration::from_secs(1));
        assert_eq!(queue.current(), Some(&Toast::success("Item created")));

        let later = start + TOAST_DURATION;
        queue.tick(later);
        assert_eq!(queue.current(), Some(&Toast::error("Could not load items")));
        assert_eq!(queue.waiting(), 0);

        queue.tick(later + TOAST_DURATION);
        assert_eq!(queue.current(), None);
    }
}
