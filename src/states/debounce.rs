//! Quiet-period scheduling for automatic compiles.
//!
//! Keeps the compiler off the hot path of every keystroke: each edit restarts
//! a short timer, and only an undisturbed timer fires a compile. A manual
//! request bypasses the timer entirely. Timestamps are plain wall-clock
//! seconds (`egui` input time), which keeps the whole thing deterministic in
//! tests.

/// Seconds an edited document must sit untouched before an auto compile fires.
pub const QUIET_PERIOD: f64 = 0.3;

#[derive(Debug, Default)]
pub struct DebounceState {
    /// Time of the most recent source mutation, if one is awaiting a compile.
    /// `None` means the timer is idle.
    last_edit_time: Option<f64>,
    /// Set by an explicit user request; consumed on the next poll.
    manual_requested: bool,
}

impl DebounceState {
    /// Record a source mutation, (re)starting the quiet-period timer.
    pub fn on_change(&mut self, now: f64) {
        self.last_edit_time = Some(now);
    }

    /// Request an immediate compile, regardless of the auto toggle or any
    /// running timer.
    pub fn request_manual(&mut self) {
        self.manual_requested = true;
    }

    /// True while an automatic compile is scheduled but has not fired yet.
    pub fn timer_pending(&self) -> bool {
        self.last_edit_time.is_some()
    }

    /// Seconds until the pending timer elapses, for repaint scheduling.
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.last_edit_time
            .map(|t| (t + QUIET_PERIOD - now).max(0.0))
    }

    /// Decide whether a compile should fire at `now`, consuming the trigger.
    ///
    /// A pending manual request always fires. Otherwise the timer fires only
    /// when auto-compile is enabled and the quiet period has elapsed without
    /// further edits. Both paths clear the timer, so a burst of N edits yields
    /// at most one automatic compile, of the final source.
    pub fn poll(&mut self, now: f64, auto_enabled: bool) -> bool {
        if self.manual_requested {
            self.manual_requested = false;
            self.last_edit_time = None;
            return true;
        }
        if !auto_enabled {
            return false;
        }
        match self.last_edit_time {
            Some(t) if now - t >= QUIET_PERIOD => {
                self.last_edit_time = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_edits_fire_once_after_quiet_period() {
        let mut d = DebounceState::default();
        // Five edits inside one quiet period.
        for i in 0..5 {
            let now = i as f64 * 0.05;
            d.on_change(now);
            assert!(!d.poll(now, true), "must not fire mid-burst");
        }
        let last_edit = 4.0 * 0.05;
        assert!(!d.poll(last_edit + QUIET_PERIOD - 0.01, true));
        assert!(d.poll(last_edit + QUIET_PERIOD, true));
        // Consumed: no second fire.
        assert!(!d.poll(last_edit + QUIET_PERIOD + 10.0, true));
    }

    #[test]
    fn edit_restarts_the_timer() {
        let mut d = DebounceState::default();
        d.on_change(0.0);
        d.on_change(0.25);
        assert!(!d.poll(0.35, true), "first edit's deadline must not fire");
        assert!(d.poll(0.25 + QUIET_PERIOD, true));
    }

    #[test]
    fn manual_fires_immediately_even_with_auto_off() {
        let mut d = DebounceState::default();
        d.on_change(0.0);
        d.request_manual();
        assert!(d.poll(0.0, false));
        assert!(!d.poll(100.0, false), "timer cleared by manual fire");
    }

    #[test]
    fn auto_off_suppresses_edit_triggers() {
        let mut d = DebounceState::default();
        d.on_change(0.0);
        assert!(!d.poll(10.0, false));
        // Still pending; enabling auto later lets it fire.
        assert!(d.poll(10.0, true));
    }

    #[test]
    fn remaining_counts_down_and_clamps() {
        let mut d = DebounceState::default();
        assert_eq!(d.remaining(0.0), None);
        d.on_change(1.0);
        assert!((d.remaining(1.1).unwrap() - (QUIET_PERIOD - 0.1)).abs() < 1e-9);
        assert_eq!(d.remaining(5.0), Some(0.0));
    }
}
