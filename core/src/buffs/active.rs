use stackbuff_types::ActiveEffectSpec;

use crate::gameplay::GameContext;

/// Apply a one-shot effect. Actives change state directly and are never
/// registered, so nothing is revoked later.
pub fn apply_active(spec: &ActiveEffectSpec, ctx: &GameContext) {
    match spec {
        ActiveEffectSpec::Score {
            raw_score_delta,
            multiplier_delta,
            target_score_delta,
        } => {
            let mut score = ctx.score.borrow_mut();
            if let Some(delta) = raw_score_delta {
                score.change_raw_score(*delta);
            }
            if let Some(delta) = multiplier_delta {
                score.change_multiplier(*delta);
            }
            if let Some(delta) = target_score_delta {
                score.change_target_score(*delta);
            }
        }
        ActiveEffectSpec::GameplayTimer { add_seconds } => {
            if ctx.timer.borrow_mut().add_seconds(*add_seconds) {
                tracing::debug!(add_seconds, "Active effect finished the gameplay timer");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::{GameplayTimer, ScoreModel};

    #[test]
    fn test_score_active_changes_runtime_values() {
        let ctx = GameContext::new(ScoreModel::new(10, 1), GameplayTimer::new(10.0));
        apply_active(
            &ActiveEffectSpec::Score {
                raw_score_delta: Some(20),
                multiplier_delta: Some(2),
                target_score_delta: Some(100),
            },
            &ctx,
        );

        let score = ctx.score.borrow();
        assert_eq!(score.raw_score(), 20);
        assert_eq!(score.multiplier(), 3);
        assert_eq!(score.current_score(), 60);
        assert_eq!(score.target_score(), 100);
    }

    #[test]
    fn test_timer_active_adds_seconds() {
        let ctx = GameContext::new(ScoreModel::default(), GameplayTimer::new(10.0));
        ctx.timer.borrow_mut().start();
        apply_active(&ActiveEffectSpec::GameplayTimer { add_seconds: 2.5 }, &ctx);
        assert_eq!(ctx.timer.borrow().current_time(), 12.5);
    }
}
