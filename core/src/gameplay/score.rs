use crate::modifiers::ModifierAccumulator;

/// Round score state and the tuning values buffs adjust.
///
/// `per_slot_value` and `multiplier_increase` are a base value plus the sum of
/// every live buff delta, clamped at 0. Runtime score values are only changed
/// through the methods below and never go negative; the multiplier never drops
/// below 1.
#[derive(Debug)]
pub struct ScoreModel {
    base_per_slot: i32,
    per_slot: ModifierAccumulator,
    base_multiplier_increase: i32,
    per_match_multiplier: ModifierAccumulator,

    start_multiplier: i32,
    raw_score: i32,
    multiplier: i32,
    prev_round_score: i32,
    current_score: i32,
    target_score: i32,
}

impl Default for ScoreModel {
    fn default() -> Self {
        Self::new(10, 1)
    }
}

impl ScoreModel {
    pub fn new(base_per_slot: i32, base_multiplier_increase: i32) -> Self {
        Self {
            base_per_slot: base_per_slot.max(0),
            per_slot: ModifierAccumulator::new(),
            base_multiplier_increase: base_multiplier_increase.max(0),
            per_match_multiplier: ModifierAccumulator::new(),
            start_multiplier: 1,
            raw_score: 0,
            multiplier: 1,
            prev_round_score: 0,
            current_score: 0,
            target_score: 0,
        }
    }

    // ─── Tuning ─────────────────────────────────────────────────────────────

    /// Score awarded per matched slot
    pub fn per_slot_value(&self) -> i32 {
        self.base_per_slot.saturating_add(self.per_slot.total()).max(0)
    }

    /// Multiplier gained per match
    pub fn multiplier_increase(&self) -> i32 {
        self.base_multiplier_increase
            .saturating_add(self.per_match_multiplier.total())
            .max(0)
    }

    pub fn per_slot_modifiers(&self) -> &ModifierAccumulator {
        &self.per_slot
    }

    pub fn per_match_multiplier_modifiers(&self) -> &ModifierAccumulator {
        &self.per_match_multiplier
    }

    // ─── Scoring ────────────────────────────────────────────────────────────

    pub fn add_raw_score_per_slot(&mut self, slots: i32) {
        self.raw_score = self
            .raw_score
            .saturating_add(slots.saturating_mul(self.per_slot_value()))
            .max(0);
        self.update_current_score();
    }

    pub fn increase_multiplier_per_match(&mut self, times: i32) {
        self.multiplier = self
            .multiplier
            .saturating_add(times.saturating_mul(self.multiplier_increase()))
            .max(1);
        self.update_current_score();
    }

    pub fn change_raw_score(&mut self, delta: i32) {
        self.raw_score = self.raw_score.saturating_add(delta).max(0);
        self.update_current_score();
    }

    pub fn change_multiplier(&mut self, delta: i32) {
        self.multiplier = self.multiplier.saturating_add(delta).max(1);
        self.update_current_score();
    }

    pub fn set_target_score(&mut self, value: i32) {
        self.target_score = value.max(0);
    }

    pub fn change_target_score(&mut self, by: i32) {
        self.target_score = self.target_score.saturating_add(by).max(0);
    }

    /// Multiplier a new round starts from
    pub fn set_start_multiplier(&mut self, value: i32) {
        self.start_multiplier = value.max(1);
    }

    /// Bank the round: the current score carries over, raw score and
    /// multiplier start again.
    pub fn finish_round(&mut self) {
        self.prev_round_score = self.current_score;
        self.raw_score = 0;
        self.multiplier = self.start_multiplier;
    }

    /// Zero all runtime score state. Tuning modifiers are untouched.
    pub fn reset_scores(&mut self) {
        self.raw_score = 0;
        self.current_score = 0;
        self.prev_round_score = 0;
        self.multiplier = self.start_multiplier;
    }

    fn update_current_score(&mut self) {
        self.current_score = self
            .prev_round_score
            .saturating_add(self.raw_score.saturating_mul(self.multiplier));
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn raw_score(&self) -> i32 {
        self.raw_score
    }

    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }

    pub fn prev_round_score(&self) -> i32 {
        self.prev_round_score
    }

    pub fn current_score(&self) -> i32 {
        self.current_score
    }

    pub fn target_score(&self) -> i32 {
        self.target_score
    }

    pub fn target_reached(&self) -> bool {
        self.target_score > 0 && self.current_score >= self.target_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::Revoke;

    #[test]
    fn test_per_slot_value_follows_live_deltas() {
        let score = ScoreModel::new(10, 1);
        let bonus = score.per_slot_modifiers().add_delta(5);
        assert_eq!(score.per_slot_value(), 15);

        bonus.revoke().unwrap();
        assert_eq!(score.per_slot_value(), 10);
    }

    #[test]
    fn test_tuning_clamps_at_zero() {
        let score = ScoreModel::new(10, 1);
        let _malus = score.per_slot_modifiers().add_delta(-25);
        let _mult = score.per_match_multiplier_modifiers().add_delta(-3);
        assert_eq!(score.per_slot_value(), 0);
        assert_eq!(score.multiplier_increase(), 0);
    }

    #[test]
    fn test_current_score_is_prev_plus_raw_times_multiplier() {
        let mut score = ScoreModel::new(10, 2);
        score.add_raw_score_per_slot(3);
        score.increase_multiplier_per_match(1);
        assert_eq!(score.raw_score(), 30);
        assert_eq!(score.multiplier(), 3);
        assert_eq!(score.current_score(), 90);

        score.finish_round();
        assert_eq!(score.prev_round_score(), 90);
        score.add_raw_score_per_slot(1);
        assert_eq!(score.current_score(), 90 + 10);
    }

    #[test]
    fn test_runtime_values_clamp() {
        let mut score = ScoreModel::new(10, 1);
        score.change_raw_score(-50);
        score.change_multiplier(-10);
        score.change_target_score(-5);
        assert_eq!(score.raw_score(), 0);
        assert_eq!(score.multiplier(), 1);
        assert_eq!(score.target_score(), 0);
    }

    #[test]
    fn test_target_reached() {
        let mut score = ScoreModel::new(10, 1);
        assert!(!score.target_reached(), "no target set");

        score.set_target_score(50);
        score.add_raw_score_per_slot(4);
        assert!(!score.target_reached());
        score.add_raw_score_per_slot(1);
        assert!(score.target_reached());
    }

    #[test]
    fn test_reset_scores_keeps_modifiers() {
        let mut score = ScoreModel::new(10, 1);
        let _bonus = score.per_slot_modifiers().add_delta(2);
        score.add_raw_score_per_slot(2);
        score.reset_scores();
        assert_eq!(score.current_score(), 0);
        assert_eq!(score.per_slot_value(), 12);
    }

    #[test]
    fn test_large_values_saturate() {
        let mut score = ScoreModel::new(i32::MAX, 1);
        let _bonus = score.per_slot_modifiers().add_delta(i32::MAX);
        assert_eq!(score.per_slot_value(), i32::MAX);

        score.add_raw_score_per_slot(3);
        score.change_multiplier(i32::MAX);
        assert_eq!(score.raw_score(), i32::MAX);
        assert_eq!(score.multiplier(), i32::MAX);
        assert_eq!(score.current_score(), i32::MAX);
    }
}
