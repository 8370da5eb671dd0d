//! Buff and card definition types
//!
//! Definitions are templates loaded from TOML content files that describe
//! what a card does when activated and how long its buffs last.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// ═══════════════════════════════════════════════════════════════════════════
// Duration
// ═══════════════════════════════════════════════════════════════════════════

/// Authored lifetime of a buff.
///
/// Each domain is optional. A spec with neither domain set is infinite: the
/// buff stays active until it is cleared explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DurationSpec {
    /// Active for this many resolved turns (matches)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<i32>,

    /// Active for this many seconds of gameplay time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f32>,
}

impl DurationSpec {
    pub fn infinite() -> Self {
        Self::default()
    }

    pub fn turns(turns: i32) -> Self {
        Self {
            turns: Some(turns),
            seconds: None,
        }
    }

    pub fn seconds(seconds: f32) -> Self {
        Self {
            turns: None,
            seconds: Some(seconds),
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.turns.is_none() && self.seconds.is_none()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Buff Definitions
// ═══════════════════════════════════════════════════════════════════════════

/// What a buff modifies while it is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BuffEffectSpec {
    /// Adjusts score tuning for as long as the buff lasts
    Score {
        /// Added to the score earned per matched slot
        #[serde(default)]
        per_slot_delta: Option<i32>,
        /// Added to the multiplier gained per match
        #[serde(default)]
        per_match_multiplier_delta: Option<i32>,
    },
    /// Slows, speeds up or freezes the gameplay countdown
    GameplayTimer {
        /// Multiplies the countdown speed (0.5 = half speed)
        #[serde(default)]
        tick_speed_multiplier: Option<f32>,
        /// Pause the countdown entirely while active
        #[serde(default)]
        pause: bool,
    },
}

/// Definition of a buff (loaded from config).
///
/// One definition maps to exactly one runtime effect. Activating the same
/// definition again while it is active re-stacks that effect instead of
/// creating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffDefinition {
    /// Unique identifier (e.g., "double_slots")
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    // ─── Duration ───────────────────────────────────────────────────────────
    #[serde(default)]
    pub duration: DurationSpec,

    /// Re-activation adds the authored duration on top of what remains
    /// (otherwise it just refreshes to the authored duration)
    #[serde(default)]
    pub can_stack_duration: bool,

    /// Re-activation applies the effect once more
    #[serde(default)]
    pub can_stack_effect: bool,

    // ─── Effect ─────────────────────────────────────────────────────────────
    pub effect: BuffEffectSpec,
}

// ═══════════════════════════════════════════════════════════════════════════
// Card Definitions
// ═══════════════════════════════════════════════════════════════════════════

/// A one-shot effect applied immediately when a card is activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ActiveEffectSpec {
    Score {
        #[serde(default)]
        raw_score_delta: Option<i32>,
        #[serde(default)]
        multiplier_delta: Option<i32>,
        #[serde(default)]
        target_score_delta: Option<i32>,
    },
    GameplayTimer {
        add_seconds: f32,
    },
}

/// A card: a bundle of one-shot actives and buff references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub quality: i32,

    /// Buff definition IDs registered when the card is activated
    #[serde(default)]
    pub buffs: Vec<String>,

    #[serde(default)]
    pub actives: Vec<ActiveEffectSpec>,
}

/// Root of a definitions TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionConfig {
    #[serde(default, rename = "buff")]
    pub buffs: Vec<BuffDefinition>,

    #[serde(default, rename = "card")]
    pub cards: Vec<CardDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_buff() {
        let toml = r#"
[[buff]]
id = "rich_slots"
name = "Rich Slots"
can_stack_effect = true
duration = { turns = 3 }

[buff.effect]
kind = "score"
per_slot_delta = 5
"#;

        let config: DefinitionConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.buffs.len(), 1);
        let buff = &config.buffs[0];
        assert!(buff.enabled);
        assert!(buff.can_stack_effect);
        assert!(!buff.can_stack_duration);
        assert_eq!(buff.duration, DurationSpec::turns(3));
        assert_eq!(
            buff.effect,
            BuffEffectSpec::Score {
                per_slot_delta: Some(5),
                per_match_multiplier_delta: None,
            }
        );
    }

    #[test]
    fn test_missing_duration_is_infinite() {
        let toml = r#"
[[buff]]
id = "frozen"
name = "Frozen Clock"

[buff.effect]
kind = "gameplay_timer"
pause = true
"#;

        let config: DefinitionConfig = toml::from_str(toml).unwrap();
        assert!(config.buffs[0].duration.is_infinite());
        assert_eq!(
            config.buffs[0].effect,
            BuffEffectSpec::GameplayTimer {
                tick_speed_multiplier: None,
                pause: true,
            }
        );
    }

    #[test]
    fn test_parse_card_with_actives() {
        let toml = r#"
[[card]]
id = "hourglass"
title = "Hourglass"
quality = 2
buffs = ["slow_time"]

[[card.actives]]
kind = "gameplay_timer"
add_seconds = 10.0

[[card.actives]]
kind = "score"
raw_score_delta = 100
"#;

        let config: DefinitionConfig = toml::from_str(toml).unwrap();
        let card = &config.cards[0];
        assert_eq!(card.buffs, vec!["slow_time".to_string()]);
        assert_eq!(card.actives.len(), 2);
        assert_eq!(
            card.actives[0],
            ActiveEffectSpec::GameplayTimer { add_seconds: 10.0 }
        );
    }
}
