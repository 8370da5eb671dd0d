use stackbuff_types::CardDefinition;
use thiserror::Error;

use crate::buffs::{apply_active, build_effect};
use crate::definitions::DefinitionSet;
use crate::error::BuffError;
use crate::gameplay::GameContext;
use crate::registry::{BuffRegistry, RegisterOutcome};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown card '{0}'")]
    UnknownCard(String),
    #[error("unknown buff '{0}'")]
    UnknownBuff(String),
}

/// Result of registering one buff from a card
#[derive(Debug)]
pub struct BuffActivation {
    pub buff_id: String,
    pub result: Result<RegisterOutcome, BuffError>,
}

#[derive(Debug, Default)]
pub struct CardActivation {
    pub buffs: Vec<BuffActivation>,
    /// Referenced buffs that are undefined or disabled
    pub skipped: Vec<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// The gameplay countdown reached 0 during this frame
    pub timer_finished: bool,
    /// Buffs that expired during this frame
    pub expired: Vec<String>,
}

/// Drives a [`BuffRegistry`] from host game events.
///
/// Owns the collaborators buffs modify and the loaded definitions. Every
/// method runs to completion on the caller's thread.
pub struct BuffSession {
    ctx: GameContext,
    registry: BuffRegistry<GameContext>,
    definitions: DefinitionSet,
}

impl BuffSession {
    pub fn new(ctx: GameContext, definitions: DefinitionSet) -> Self {
        Self {
            ctx,
            registry: BuffRegistry::new(),
            definitions,
        }
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn registry(&self) -> &BuffRegistry<GameContext> {
        &self.registry
    }

    pub fn definitions(&self) -> &DefinitionSet {
        &self.definitions
    }

    // ─── Activation ─────────────────────────────────────────────────────────

    /// Activate a card: apply its one-shot actives, then register each
    /// enabled buff it references.
    pub fn activate_card(&mut self, card_id: &str) -> Result<CardActivation, SessionError> {
        let card: CardDefinition = self
            .definitions
            .card(card_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownCard(card_id.to_string()))?;

        for active in &card.actives {
            apply_active(active, &self.ctx);
        }

        let mut activation = CardActivation::default();
        for buff_id in &card.buffs {
            match self.register_buff(buff_id) {
                Ok(result) => activation.buffs.push(BuffActivation {
                    buff_id: buff_id.clone(),
                    result,
                }),
                Err(e) => {
                    tracing::warn!(card_id, buff_id = %buff_id, error = %e, "Skipping card buff");
                    activation.skipped.push(buff_id.clone());
                }
            }
        }

        tracing::debug!(
            card_id,
            actives = card.actives.len(),
            buffs = activation.buffs.len(),
            skipped = activation.skipped.len(),
            "Card activated"
        );
        Ok(activation)
    }

    /// Register a single buff definition by id.
    pub fn activate_buff(
        &mut self,
        buff_id: &str,
    ) -> Result<Result<RegisterOutcome, BuffError>, SessionError> {
        self.register_buff(buff_id)
    }

    fn register_buff(
        &mut self,
        buff_id: &str,
    ) -> Result<Result<RegisterOutcome, BuffError>, SessionError> {
        let def = self
            .definitions
            .buff(buff_id)
            .filter(|def| def.enabled)
            .ok_or_else(|| SessionError::UnknownBuff(buff_id.to_string()))?;

        Ok(self.registry.register(build_effect(def), &self.ctx))
    }

    // ─── Host events ────────────────────────────────────────────────────────

    /// Advance one frame. The countdown and time-based buffs see the same
    /// `dt`; pass 0 for a blocked frame.
    pub fn tick_frame(&mut self, dt: f32) -> FrameOutcome {
        let timer_finished = self.ctx.timer.borrow_mut().tick(dt);
        self.registry.tick_time(dt);

        FrameOutcome {
            timer_finished,
            expired: self.registry.take_expired(),
        }
    }

    /// Score a match of `slots` slots, then advance turn-based buffs.
    /// Returns the buffs that expired.
    pub fn resolve_match(&mut self, slots: i32) -> Vec<String> {
        {
            let mut score = self.ctx.score.borrow_mut();
            score.add_raw_score_per_slot(slots);
            score.increase_multiplier_per_match(1);
        }
        self.registry.tick_turn();
        self.registry.take_expired()
    }

    /// Remove every active buff.
    pub fn teardown(&mut self) {
        self.registry.clear_all();
    }
}

impl Drop for BuffSession {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            self.teardown();
        }
    }
}
