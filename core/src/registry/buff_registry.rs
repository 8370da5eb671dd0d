//! Buff registry
//!
//! Per-buff lifecycle: Unregistered → Active → Removed.
//!
//! Single threaded by contract: the host calls `register`, `tick_time`,
//! `tick_turn` and `clear_all` from one game loop thread and every call runs
//! to completion. Effects hold `Rc` based handles, so the registry is not
//! `Send` for most contexts anyway.

use hashbrown::HashMap;

use crate::effects::StackableEffect;
use crate::error::BuffError;

/// What `register` did with an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First registration: initialized, applied once, now ticking
    Activated,
    /// Already active and stacks its effect: applied once more
    Restacked { stacks: usize },
    /// Already active, does not stack its effect: duration updated only
    Refreshed,
}

#[derive(Debug, Clone, Copy)]
enum Tick {
    Turn,
    Time(f32),
}

/// Tracks active buffs and their stack counts.
///
/// Effects are identified by [`StackableEffect::id`]. Registering an id that
/// is already active is a re-stack event; the incoming instance only signals
/// the event and is dropped, the stored effect keeps its own policy and
/// duration.
#[derive(Debug)]
pub struct BuffRegistry<C> {
    /// Active effects keyed by id
    active: HashMap<String, StackableEffect<C>>,

    /// Ids of active effects with a turn domain, in registration order
    turn_ticked: Vec<String>,

    /// Ids of active effects with a time domain, in registration order
    time_ticked: Vec<String>,

    /// Applied stacks per active effect. Mirrors each effect's stack depth
    /// so a removal issues exactly that many `remove` calls.
    stack_counts: HashMap<String, usize>,

    /// Ids of buffs that expired during ticks. Grows until the host drains
    /// it with `take_expired`; `clear_all` discards it.
    expired: Vec<String>,
}

impl<C> Default for BuffRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> BuffRegistry<C> {
    pub fn new() -> Self {
        Self {
            active: HashMap::new(),
            turn_ticked: Vec::new(),
            time_ticked: Vec::new(),
            stack_counts: HashMap::new(),
            expired: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a buff.
    ///
    /// - Already active: refresh or extend its duration, and apply another
    ///   stack if it stacks its effect.
    /// - New: initialize the duration, reject finite buffs that start out
    ///   expired, run `init` and the first `apply`, then start ticking.
    ///
    /// A failed first apply never activates the buff; its partial stack is
    /// unwound on the spot. A failed re-stack apply still counts as a stack
    /// so the eventual removal unwinds it.
    pub fn register(
        &mut self,
        effect: StackableEffect<C>,
        ctx: &C,
    ) -> Result<RegisterOutcome, BuffError> {
        if self.active.contains_key(effect.id()) {
            return self.restack(effect.id().to_string());
        }

        let mut effect = effect;
        let id = effect.id().to_string();

        effect.duration_mut().init_runtime();
        if !effect.duration().is_infinite() && effect.duration().is_expired() {
            tracing::warn!(buff_id = %id, "Buff has 0 duration and is not infinite. Ignoring.");
            return Err(BuffError::InvalidRegistration { id });
        }

        if let Err(e) = effect.init(ctx) {
            tracing::warn!(buff_id = %id, error = %e, "Buff init failed; not registering");
            return Err(e);
        }

        if let Err(e) = effect.apply() {
            tracing::warn!(buff_id = %id, error = %e, "Buff apply failed; not registering");
            if let Err(unwind) = effect.remove() {
                tracing::warn!(buff_id = %id, error = %unwind, "Failed to unwind partial apply");
            }
            return Err(e);
        }

        if effect.duration().has_turns() {
            self.turn_ticked.push(id.clone());
        }
        if effect.duration().has_time() {
            self.time_ticked.push(id.clone());
        }
        self.stack_counts.insert(id.clone(), 1);

        tracing::debug!(
            buff_id = %id,
            turns = ?effect.duration().remaining().0,
            seconds = ?effect.duration().remaining().1,
            "Buff activated"
        );
        self.active.insert(id, effect);
        Ok(RegisterOutcome::Activated)
    }

    fn restack(&mut self, id: String) -> Result<RegisterOutcome, BuffError> {
        let Some(existing) = self.active.get_mut(&id) else {
            return Ok(RegisterOutcome::Refreshed);
        };

        if existing.can_stack_duration() {
            existing.duration_mut().stack_from_authored();
        } else {
            existing.duration_mut().reset_to_authored();
        }

        if !existing.can_stack_effect() {
            tracing::debug!(buff_id = %id, "Buff refreshed");
            return Ok(RegisterOutcome::Refreshed);
        }

        let result = existing.apply();

        // The stack is committed whether or not apply succeeded
        let count = self.stack_counts.entry(id.clone()).or_insert(1);
        *count = (*count + 1).max(1);
        let stacks = *count;

        match result {
            Ok(()) => {
                tracing::debug!(buff_id = %id, stacks, "Buff re-stacked");
                Ok(RegisterOutcome::Restacked { stacks })
            }
            Err(e) => {
                tracing::warn!(buff_id = %id, stacks, error = %e, "Buff re-stack apply failed");
                Err(e)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ticking
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance time-based durations by `dt` seconds. Call once per frame;
    /// pass 0 for a blocked frame. Non-positive `dt` does nothing at all.
    pub fn tick_time(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.tick(Tick::Time(dt));
    }

    /// Advance turn-based durations by one. Call once per resolved turn.
    pub fn tick_turn(&mut self) {
        self.tick(Tick::Turn);
    }

    fn tick(&mut self, tick: Tick) {
        let len = match tick {
            Tick::Turn => self.turn_ticked.len(),
            Tick::Time(_) => self.time_ticked.len(),
        };

        // Reverse so removing the current entry never shifts an unvisited one
        for i in (0..len).rev() {
            let id = match tick {
                Tick::Turn => self.turn_ticked.get(i),
                Tick::Time(_) => self.time_ticked.get(i),
            };
            let Some(id) = id.cloned() else {
                continue;
            };

            let Some(effect) = self.active.get_mut(&id) else {
                tracing::error!(buff_id = %id, "BUG: ticked buff missing from active set");
                self.unindex(&id);
                continue;
            };

            let duration = effect.duration_mut();
            if duration.is_infinite() {
                continue;
            }
            match tick {
                Tick::Turn if duration.has_turns() => duration.tick_turn(),
                Tick::Time(dt) if duration.has_time() => duration.tick_time(dt),
                _ => continue,
            }

            if duration.is_expired() {
                tracing::debug!(buff_id = %id, "Buff expired");
                self.remove_internal(&id);
                self.expired.push(id);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Removal
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove a buff early, unwinding every stack. Returns the removed
    /// effect, or `None` if it was not active.
    pub fn remove(&mut self, id: &str) -> Option<StackableEffect<C>> {
        self.remove_internal(id)
    }

    fn remove_internal(&mut self, id: &str) -> Option<StackableEffect<C>> {
        self.unindex(id);
        let mut effect = self.active.remove(id)?;

        let stacks = self.stack_counts.remove(id).unwrap_or_else(|| {
            tracing::error!(buff_id = %id, "BUG: missing stack count, assuming 1");
            1
        });

        // One remove per applied stack, matching the apply contract
        for _ in 0..stacks {
            if let Err(e) = effect.remove() {
                tracing::warn!(buff_id = %id, error = %e, "Error while removing buff stack");
            }
        }

        tracing::debug!(buff_id = %id, stacks, "Buff removed");
        Some(effect)
    }

    fn unindex(&mut self, id: &str) {
        self.turn_ticked.retain(|t| t != id);
        self.time_ticked.retain(|t| t != id);
    }

    /// Remove every active buff (level/session teardown).
    pub fn clear_all(&mut self) {
        let ids: Vec<String> = self.active.keys().cloned().collect();
        for id in &ids {
            self.remove_internal(id);
        }

        self.active.clear();
        self.turn_ticked.clear();
        self.time_ticked.clear();
        self.stack_counts.clear();
        self.expired.clear();

        if !ids.is_empty() {
            tracing::debug!(count = ids.len(), "Cleared all buffs");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&StackableEffect<C>> {
        self.active.get(id)
    }

    pub fn stack_count(&self, id: &str) -> Option<usize> {
        self.stack_counts.get(id).copied()
    }

    pub fn active_effects(&self) -> impl Iterator<Item = &StackableEffect<C>> {
        self.active.values()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Ids of buffs ticked by `tick_turn`
    pub fn turn_ticked(&self) -> &[String] {
        &self.turn_ticked
    }

    /// Ids of buffs ticked by `tick_time`
    pub fn time_ticked(&self) -> &[String] {
        &self.time_ticked
    }

    /// Check if any buff can still expire by ticking
    pub fn has_ticking_effects(&self) -> bool {
        !self.turn_ticked.is_empty() || !self.time_ticked.is_empty()
    }

    /// Take any buffs that expired since the last call (drains the queue)
    pub fn take_expired(&mut self) -> Vec<String> {
        std::mem::take(&mut self.expired)
    }

    #[cfg(test)]
    pub(crate) fn stack_counts_len(&self) -> usize {
        self.stack_counts.len()
    }

    #[cfg(test)]
    pub(crate) fn force_drop_stack_count(&mut self, id: &str) {
        self.stack_counts.remove(id);
    }
}
