use stackbuff_types::{BuffDefinition, BuffEffectSpec};

use super::{ScoreBuff, TimerBuff};
use crate::duration::DurationTracker;
use crate::effects::{BuffBehavior, StackableEffect};
use crate::gameplay::GameContext;

/// Build the runtime effect for a buff definition.
///
/// The effect's id is the definition id, so building the same definition
/// twice produces effects the registry treats as one buff.
pub fn build_effect(def: &BuffDefinition) -> StackableEffect<GameContext> {
    let behavior: Box<dyn BuffBehavior<GameContext>> = match &def.effect {
        BuffEffectSpec::Score {
            per_slot_delta,
            per_match_multiplier_delta,
        } => Box::new(ScoreBuff::new(*per_slot_delta, *per_match_multiplier_delta)),
        BuffEffectSpec::GameplayTimer {
            tick_speed_multiplier,
            pause,
        } => Box::new(TimerBuff::new(*tick_speed_multiplier, *pause)),
    };

    StackableEffect::with_behavior(
        def.id.clone(),
        DurationTracker::from_spec(&def.duration),
        behavior,
    )
    .with_name(def.name.clone())
    .with_stacking(def.can_stack_duration, def.can_stack_effect)
}

#[cfg(test)]
mod tests {
    use stackbuff_types::DurationSpec;

    use super::*;

    #[test]
    fn test_build_effect_carries_definition() {
        let def = BuffDefinition {
            id: "slow_time".into(),
            name: "Slow Time".into(),
            enabled: true,
            duration: DurationSpec::seconds(8.0),
            can_stack_duration: true,
            can_stack_effect: false,
            effect: BuffEffectSpec::GameplayTimer {
                tick_speed_multiplier: Some(0.5),
                pause: false,
            },
        };

        let effect = build_effect(&def);
        assert_eq!(effect.id(), "slow_time");
        assert_eq!(effect.name(), "Slow Time");
        assert!(effect.can_stack_duration());
        assert!(!effect.can_stack_effect());
        assert!(effect.duration().has_time());
        assert!(!effect.duration().has_turns());
        assert_eq!(effect.describe(), "timer speed x0.50");
    }
}
