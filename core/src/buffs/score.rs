use std::cell::RefCell;
use std::rc::Rc;

use stackbuff_types::formatting::format_signed;

use crate::effects::{ApplyScope, BuffBehavior};
use crate::error::BuffError;
use crate::gameplay::{GameContext, ScoreModel};

/// Adjusts score tuning while active.
///
/// Each stack adds its deltas once; removing the stack revokes exactly those
/// deltas, leaving other buffs' contributions in place.
#[derive(Debug, Default)]
pub struct ScoreBuff {
    per_slot_delta: Option<i32>,
    per_match_multiplier_delta: Option<i32>,
    score: Option<Rc<RefCell<ScoreModel>>>,
}

impl ScoreBuff {
    pub fn new(per_slot_delta: Option<i32>, per_match_multiplier_delta: Option<i32>) -> Self {
        Self {
            per_slot_delta,
            per_match_multiplier_delta,
            score: None,
        }
    }
}

impl BuffBehavior<GameContext> for ScoreBuff {
    fn init(&mut self, ctx: &GameContext) -> Result<(), BuffError> {
        self.score = Some(Rc::clone(&ctx.score));
        Ok(())
    }

    fn on_apply(&mut self, scope: &mut ApplyScope) -> Result<(), BuffError> {
        let score = self
            .score
            .as_ref()
            .ok_or(BuffError::MissingCapability("score model"))?;
        let score = score
            .try_borrow()
            .map_err(|_| BuffError::MissingCapability("score model (busy)"))?;

        if let Some(delta) = self.per_slot_delta {
            scope.track(score.per_slot_modifiers().add_delta(delta));
        }
        if let Some(delta) = self.per_match_multiplier_delta {
            scope.track(score.per_match_multiplier_modifiers().add_delta(delta));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(d) = self.per_slot_delta {
            parts.push(format!("{} per slot", format_signed(d)));
        }
        if let Some(d) = self.per_match_multiplier_delta {
            parts.push(format!("{} multiplier per match", format_signed(d)));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationTracker;
    use crate::effects::StackableEffect;

    #[test]
    fn test_apply_before_init_is_missing_capability() {
        let mut buff = ScoreBuff::new(Some(5), None);
        let mut scope = ApplyScope::new();
        let err = buff.on_apply(&mut scope).unwrap_err();
        assert_eq!(err, BuffError::MissingCapability("score model"));
        assert!(scope.is_empty());
    }

    #[test]
    fn test_stacks_add_and_remove_deltas() {
        let ctx = GameContext::default();
        let base = ctx.score.borrow().per_slot_value();

        let mut effect = StackableEffect::new(
            "bonus",
            DurationTracker::new(Some(3), None),
            ScoreBuff::new(Some(5), Some(1)),
        );
        effect.init(&ctx).unwrap();
        effect.apply().unwrap();
        effect.apply().unwrap();
        assert_eq!(ctx.score.borrow().per_slot_value(), base + 10);
        assert_eq!(ctx.score.borrow().per_match_multiplier_modifiers().total(), 2);

        effect.remove().unwrap();
        assert_eq!(ctx.score.borrow().per_slot_value(), base + 5);
        effect.remove().unwrap();
        assert_eq!(ctx.score.borrow().per_slot_value(), base);
        assert!(ctx.score.borrow().per_match_multiplier_modifiers().is_empty());
    }

    #[test]
    fn test_describe() {
        let buff = ScoreBuff::new(Some(5), Some(-1));
        assert_eq!(buff.describe(), "+5 per slot, -1 multiplier per match");
    }
}
