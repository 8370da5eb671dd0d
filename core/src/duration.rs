//! Dual-domain buff lifetime.
//!
//! A [`DurationTracker`] counts down turns, seconds, both, or neither.
//! Authored values come from content and never change; remaining values are
//! runtime state that ticks down and is refreshed or extended on re-stack.

use stackbuff_types::DurationSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct DurationTracker {
    authored_turns: Option<i32>,
    authored_seconds: Option<f32>,
    remaining_turns: i32,
    remaining_seconds: f32,
    initialized: bool,
}

impl DurationTracker {
    pub fn new(authored_turns: Option<i32>, authored_seconds: Option<f32>) -> Self {
        Self {
            authored_turns,
            authored_seconds,
            remaining_turns: 0,
            remaining_seconds: 0.0,
            initialized: false,
        }
    }

    pub fn infinite() -> Self {
        Self::new(None, None)
    }

    pub fn from_spec(spec: &DurationSpec) -> Self {
        Self::new(spec.turns, spec.seconds)
    }

    pub fn has_turns(&self) -> bool {
        self.authored_turns.is_some()
    }

    pub fn has_time(&self) -> bool {
        self.authored_seconds.is_some()
    }

    /// Neither domain enabled: never expires, ticks do nothing.
    pub fn is_infinite(&self) -> bool {
        !self.has_turns() && !self.has_time()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn remaining_turns(&self) -> i32 {
        self.remaining_turns
    }

    pub fn remaining_seconds(&self) -> f32 {
        self.remaining_seconds
    }

    fn authored_turns_clamped(&self) -> i32 {
        self.authored_turns.map_or(0, |t| t.max(0))
    }

    fn authored_seconds_clamped(&self) -> f32 {
        self.authored_seconds.map_or(0.0, |s| s.max(0.0))
    }

    /// Copy authored values into the runtime counters. Safe to call again
    /// (re-initializes).
    pub fn init_runtime(&mut self) {
        self.initialized = true;
        self.remaining_turns = self.authored_turns_clamped();
        self.remaining_seconds = self.authored_seconds_clamped();
    }

    /// Refresh: overwrite what remains with the authored duration.
    pub fn reset_to_authored(&mut self) {
        if !self.initialized {
            self.init_runtime();
            return;
        }

        if self.has_turns() {
            self.remaining_turns = self.authored_turns_clamped();
        }
        if self.has_time() {
            self.remaining_seconds = self.authored_seconds_clamped();
        }
    }

    /// Refresh and extend: add the authored duration onto what remains.
    /// Infinite trackers stay infinite.
    pub fn stack_from_authored(&mut self) {
        if self.is_infinite() {
            return;
        }

        if !self.initialized {
            self.init_runtime();
            return;
        }

        if self.has_turns() {
            self.remaining_turns = self
                .remaining_turns
                .saturating_add(self.authored_turns_clamped());
        }
        if self.has_time() {
            self.remaining_seconds += self.authored_seconds_clamped();
        }
    }

    pub fn tick_turn(&mut self) {
        if self.is_infinite() {
            return;
        }

        if !self.initialized {
            self.init_runtime();
        }

        if self.has_turns() {
            self.remaining_turns = self.remaining_turns.saturating_sub(1);
        }
    }

    pub fn tick_time(&mut self, dt: f32) {
        if self.is_infinite() || dt <= 0.0 {
            return;
        }

        if !self.initialized {
            self.init_runtime();
        }

        if self.has_time() {
            self.remaining_seconds -= dt;
        }
    }

    /// Expiry rule:
    /// - infinite: never
    /// - turns only: remaining turns <= 0
    /// - time only: remaining seconds <= 0
    /// - both: whichever runs out first
    ///
    /// An uninitialized tracker is judged by its authored values.
    pub fn is_expired(&self) -> bool {
        if self.is_infinite() {
            return false;
        }

        let (turns, seconds) = if self.initialized {
            (self.remaining_turns, self.remaining_seconds)
        } else {
            (self.authored_turns_clamped(), self.authored_seconds_clamped())
        };

        let turns_expired = self.has_turns() && turns <= 0;
        let time_expired = self.has_time() && seconds <= 0.0;
        turns_expired || time_expired
    }

    /// Drop runtime state; the next use re-initializes from authored values.
    pub fn clear_runtime(&mut self) {
        self.initialized = false;
        self.remaining_turns = 0;
        self.remaining_seconds = 0.0;
    }

    /// Remaining values for display, `None` for disabled domains.
    pub fn remaining(&self) -> (Option<i32>, Option<f32>) {
        (
            self.has_turns().then_some(self.remaining_turns),
            self.has_time().then_some(self.remaining_seconds),
        )
    }
}

impl From<DurationSpec> for DurationTracker {
    fn from(spec: DurationSpec) -> Self {
        Self::from_spec(&spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_expire_after_authored_ticks() {
        let mut d = DurationTracker::new(Some(3), None);
        d.init_runtime();

        d.tick_turn();
        d.tick_turn();
        assert!(!d.is_expired(), "one turn should remain");

        d.tick_turn();
        assert!(d.is_expired());
    }

    #[test]
    fn test_infinite_never_expires() {
        let mut d = DurationTracker::infinite();
        d.init_runtime();
        for _ in 0..100 {
            d.tick_turn();
            d.tick_time(10.0);
        }
        assert!(d.is_infinite());
        assert!(!d.is_expired());
    }

    #[test]
    fn test_both_domains_earliest_wins() {
        let mut d = DurationTracker::new(Some(2), Some(100.0));
        d.init_runtime();
        d.tick_turn();
        d.tick_turn();
        assert!(d.is_expired(), "turns ran out before time");
        assert_eq!(d.remaining_seconds(), 100.0);

        let mut d = DurationTracker::new(Some(50), Some(1.0));
        d.init_runtime();
        d.tick_time(1.0);
        assert!(d.is_expired(), "time ran out before turns");
    }

    #[test]
    fn test_stack_from_authored_extends() {
        let mut d = DurationTracker::new(Some(3), Some(5.0));
        d.init_runtime();
        d.tick_turn();
        d.tick_time(2.0);

        d.stack_from_authored();
        assert_eq!(d.remaining_turns(), 5);
        assert_eq!(d.remaining_seconds(), 8.0);
    }

    #[test]
    fn test_stack_from_authored_before_init_only_inits() {
        let mut d = DurationTracker::new(Some(3), None);
        d.stack_from_authored();
        assert!(d.is_initialized());
        assert_eq!(d.remaining_turns(), 3);
    }

    #[test]
    fn test_reset_to_authored_refreshes_without_accumulating() {
        let mut d = DurationTracker::new(Some(4), None);
        d.init_runtime();
        d.tick_turn();
        d.tick_turn();

        d.reset_to_authored();
        assert_eq!(d.remaining_turns(), 4);
        d.reset_to_authored();
        assert_eq!(d.remaining_turns(), 4);
    }

    #[test]
    fn test_tick_time_ignores_non_positive_dt() {
        let mut d = DurationTracker::new(None, Some(2.0));
        d.init_runtime();
        d.tick_time(0.0);
        d.tick_time(-1.0);
        assert_eq!(d.remaining_seconds(), 2.0);

        d.tick_time(2.5);
        assert_eq!(d.remaining_seconds(), -0.5);
        d.tick_time(0.0);
        assert_eq!(d.remaining_seconds(), -0.5, "blocked frame on a spent tracker");
        assert!(d.is_expired());
    }

    #[test]
    fn test_negative_authored_values_clamp_to_zero() {
        let mut d = DurationTracker::new(Some(-2), None);
        d.init_runtime();
        assert_eq!(d.remaining_turns(), 0);
        assert!(d.is_expired());
    }

    #[test]
    fn test_zero_duration_expired_immediately() {
        let mut d = DurationTracker::new(Some(0), Some(0.0));
        d.init_runtime();
        assert!(!d.is_infinite());
        assert!(d.is_expired());
    }

    #[test]
    fn test_tick_auto_initializes() {
        let mut d = DurationTracker::new(Some(2), None);
        d.tick_turn();
        assert!(d.is_initialized());
        assert_eq!(d.remaining_turns(), 1);
    }

    #[test]
    fn test_uninitialized_expiry_uses_authored() {
        assert!(!DurationTracker::new(Some(1), None).is_expired());
        assert!(DurationTracker::new(Some(0), None).is_expired());
    }

    #[test]
    fn test_turns_can_go_negative() {
        let mut d = DurationTracker::new(Some(1), None);
        d.init_runtime();
        d.tick_turn();
        d.tick_turn();
        assert_eq!(d.remaining_turns(), -1);
        assert!(d.is_expired());
    }

    #[test]
    fn test_clear_runtime() {
        let mut d = DurationTracker::new(Some(2), None);
        d.init_runtime();
        d.tick_turn();
        d.clear_runtime();
        assert!(!d.is_initialized());
        d.tick_turn();
        assert_eq!(d.remaining_turns(), 1);
    }

    #[test]
    fn test_remaining_reports_enabled_domains() {
        let mut d = DurationTracker::from_spec(&DurationSpec::seconds(4.0));
        d.init_runtime();
        assert_eq!(d.remaining(), (None, Some(4.0)));
    }
}
