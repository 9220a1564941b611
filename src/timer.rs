//! Timestamp-driven timers for the UI event loop.
//!
//! `draw_web()` calls at ~60fps and feeds `performance.now()` into the app's
//! `tick`. These timers convert that stream of wall-clock timestamps into
//! one-shot events, keeping the timing logic deterministic and fully
//! testable with synthetic timestamps.

/// A cancel-then-schedule one-shot timer.
///
/// Used to debounce typeahead filtering: every keystroke calls
/// [`schedule`](Debounce::schedule), replacing any pending deadline, so only
/// the last keystroke in a burst fires. Only one deadline is pending at a
/// time per timer.
pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Schedule (or reschedule) the timer to fire `delay_ms` after `now_ms`.
    /// A pending deadline is replaced, never stacked.
    pub fn schedule(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the deadline has passed.
    /// Call once per frame with the current timestamp.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A self-clearing countdown for transient notices (e.g. the skip-ahead
/// warning, which disappears 3 seconds after it was raised).
pub struct Countdown {
    duration_ms: f64,
    expires_at: Option<f64>,
}

impl Countdown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            expires_at: None,
        }
    }

    /// (Re)start the countdown from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.expires_at = Some(now_ms + self.duration_ms);
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Returns true exactly once when the countdown expires.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.expires_at {
            Some(t) if now_ms >= t => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Debounce ───────────────────────────────────────────────────

    #[test]
    fn debounce_fires_after_delay() {
        let mut d = Debounce::new(200.0);
        d.schedule(1000.0);
        assert!(!d.poll(1100.0));
        assert!(!d.poll(1199.0));
        assert!(d.poll(1200.0));
    }

    #[test]
    fn debounce_fires_only_once() {
        let mut d = Debounce::new(200.0);
        d.schedule(0.0);
        assert!(d.poll(250.0));
        assert!(!d.poll(300.0));
        assert!(!d.is_pending());
    }

    #[test]
    fn debounce_reschedule_replaces_deadline() {
        // Three rapid keystrokes: only the last one's deadline counts.
        let mut d = Debounce::new(200.0);
        d.schedule(0.0);
        d.schedule(50.0);
        d.schedule(100.0);
        assert!(!d.poll(250.0)); // first deadline (200) was replaced
        assert!(d.poll(300.0)); // last deadline (300) fires
    }

    #[test]
    fn debounce_cancel_suppresses_fire() {
        let mut d = Debounce::new(200.0);
        d.schedule(0.0);
        d.cancel();
        assert!(!d.poll(1000.0));
        assert!(!d.is_pending());
    }

    #[test]
    fn debounce_unscheduled_never_fires() {
        let mut d = Debounce::new(200.0);
        assert!(!d.poll(1e9));
    }

    // ── Countdown ──────────────────────────────────────────────────

    #[test]
    fn countdown_expires_once() {
        let mut c = Countdown::new(3000.0);
        c.start(0.0);
        assert!(c.is_active());
        assert!(!c.poll(2999.0));
        assert!(c.poll(3000.0));
        assert!(!c.is_active());
        assert!(!c.poll(4000.0));
    }

    #[test]
    fn countdown_restart_extends() {
        let mut c = Countdown::new(3000.0);
        c.start(0.0);
        c.start(1000.0); // a second warning resets the 3s window
        assert!(!c.poll(3500.0));
        assert!(c.poll(4000.0));
    }

    #[test]
    fn countdown_clear() {
        let mut c = Countdown::new(3000.0);
        c.start(0.0);
        c.clear();
        assert!(!c.is_active());
        assert!(!c.poll(10_000.0));
    }
}
