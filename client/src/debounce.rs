use std::time::{Duration, Instant};

/// Delay between the last keystroke and the search being applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds back search input until typing pauses
///
/// Time is passed in by the caller so the debouncer stays deterministic.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record the latest input, restarting the delay
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now + self.delay));
    }

    /// Return the settled term once the delay has passed since the last input
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_only_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();

        debouncer.input("w", start);
        debouncer.input("wi", start + Duration::from_millis(200));
        debouncer.input("wid", start + Duration::from_millis(400));

        assert_eq!(debouncer.poll(start + Duration::from_millis(800)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(900)),
            Some("wid".to_string())
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }
}
