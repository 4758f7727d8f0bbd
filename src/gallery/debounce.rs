//! Trailing-edge debounce for scroll events
//!
//! Visibility recomputation is expensive relative to scroll events, so the
//! gallery only recomputes once scrolling has been quiet for a fixed interval.
//! The debouncer is a single-threaded cooperative timer: every event resets
//! the deadline (cancel-and-reschedule), and the owner polls
//! [`fire_if_due`](TrailingDebouncer::fire_if_due) from its tick loop.

use std::time::{Duration, Instant};

/// Deadline-based trailing-edge debouncer
#[derive(Debug)]
pub struct TrailingDebouncer {
    quiet_interval: Duration,
    deadline: Option<Instant>,
}

impl TrailingDebouncer {
    /// Create a debouncer that fires after `quiet_interval` without events
    pub fn new(quiet_interval: Duration) -> Self {
        Self {
            quiet_interval,
            deadline: None,
        }
    }

    /// Record an event at `now`, rescheduling the pending deadline
    pub fn record_event(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_interval);
    }

    /// Whether a firing is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire once if the quiet period has elapsed
    ///
    /// Returns `true` at most once per burst of events; firing clears the
    /// deadline until the next event.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(50);

    #[test]
    fn test_no_events_never_fires() {
        let mut debouncer = TrailingDebouncer::new(QUIET);
        assert!(!debouncer.fire_if_due(Instant::now()));
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = TrailingDebouncer::new(QUIET);

        debouncer.record_event(start);
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(10)));
        assert!(debouncer.fire_if_due(start + QUIET));
    }

    #[test]
    fn test_burst_fires_exactly_once() {
        let start = Instant::now();
        let mut debouncer = TrailingDebouncer::new(QUIET);

        // 20 events inside one quiet interval
        for i in 0..20 {
            debouncer.record_event(start + Duration::from_millis(i));
        }

        let mut fired = 0;
        for i in 0..200 {
            if debouncer.fire_if_due(start + Duration::from_millis(i)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_event_reschedules_deadline() {
        let start = Instant::now();
        let mut debouncer = TrailingDebouncer::new(QUIET);

        debouncer.record_event(start);
        // A second event 40ms in pushes the deadline out
        debouncer.record_event(start + Duration::from_millis(40));

        assert!(!debouncer.fire_if_due(start + QUIET));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(40) + QUIET));
    }

    #[test]
    fn test_fires_again_after_new_burst() {
        let start = Instant::now();
        let mut debouncer = TrailingDebouncer::new(QUIET);

        debouncer.record_event(start);
        assert!(debouncer.fire_if_due(start + QUIET));
        assert!(!debouncer.is_pending());

        debouncer.record_event(start + Duration::from_millis(200));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(200) + QUIET));
    }
}
