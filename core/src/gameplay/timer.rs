use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::error::RevokeError;
use crate::modifiers::{MultiplierStack, Revoke};

/// Gameplay countdown driven by the host's frame delta.
///
/// The host passes `dt = 0` for blocked frames. Tick speed is the product of
/// every live [`MultiplierStack`] entry, so a slow-time buff and a haste buff
/// compose without knowing about each other.
#[derive(Debug, Default)]
pub struct GameplayTimer {
    max_time: f32,
    current_time: f32,
    active: bool,
    /// Set once when the countdown reaches 0, cleared by `start`/`reset`
    finished: bool,
    clamp_to_max: bool,
    /// Seconds consumed by the most recent tick, after speed modifiers
    tick_delta: f32,
    elapsed_active: f32,
    tick_speed: MultiplierStack,
    /// Live pause holds; the countdown is frozen while any exist
    holds: Rc<Cell<usize>>,
}

impl GameplayTimer {
    pub fn new(max_time: f32) -> Self {
        let max_time = max_time.max(0.0);
        Self {
            max_time,
            current_time: max_time,
            ..Self::default()
        }
    }

    pub fn with_clamp_to_max(mut self, clamp: bool) -> Self {
        self.clamp_to_max = clamp;
        self
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.active = true;
        self.finished = false;
        self.current_time = self.max_time;
        self.elapsed_active = 0.0;
        self.tick_delta = 0.0;
    }

    pub fn reset(&mut self) {
        self.start();
        self.active = false;
    }

    /// Advance the countdown. Returns true on the tick that finished it.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.tick_delta = 0.0;
        if !self.is_active() || dt <= 0.0 {
            return false;
        }

        let dt = dt * self.tick_speed.product();
        self.tick_delta = dt;
        self.elapsed_active += dt;
        self.apply_delta(-dt)
    }

    pub fn pause(&mut self) {
        self.active = false;
        self.tick_delta = 0.0;
    }

    pub fn resume(&mut self) {
        if self.finished {
            tracing::debug!("Resume ignored; timer already finished");
            return;
        }
        self.active = true;
    }

    /// Freeze the countdown until the returned handle is revoked.
    ///
    /// Holds compose: the countdown runs again only once every hold is
    /// released, and only if it was running underneath them. Unlike
    /// `pause`, a hold never changes whether the timer was started.
    pub fn hold(&self) -> PauseHandle {
        self.holds.set(self.holds.get() + 1);
        PauseHandle {
            owner: Rc::downgrade(&self.holds),
            revoked: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_held(&self) -> bool {
        self.holds.get() > 0
    }

    pub fn set_max_time(&mut self, max_time: f32) {
        self.max_time = max_time.max(0.0);
        if self.clamp_to_max {
            self.current_time = self.current_time.min(self.max_time);
        }
    }

    // ─── Effect helpers ─────────────────────────────────────────────────────

    /// Add (or with a negative value, remove) remaining seconds.
    pub fn add_seconds(&mut self, seconds: f32) -> bool {
        if seconds == 0.0 {
            return false;
        }
        self.apply_delta(seconds)
    }

    pub fn set_seconds(&mut self, seconds: f32) -> bool {
        self.current_time = self.clamped(seconds.max(0.0));
        self.try_finish()
    }

    pub fn multiply_remaining(&mut self, factor: f32) -> bool {
        self.current_time = self.clamped((self.current_time * factor).max(0.0));
        self.try_finish()
    }

    /// Speed modifiers; push a factor to acquire a revocable handle
    pub fn tick_speed(&self) -> &MultiplierStack {
        &self.tick_speed
    }

    fn apply_delta(&mut self, delta: f32) -> bool {
        self.current_time = self.clamped(self.current_time + delta).max(0.0);
        self.try_finish()
    }

    fn clamped(&self, seconds: f32) -> f32 {
        if self.clamp_to_max {
            seconds.min(self.max_time)
        } else {
            seconds
        }
    }

    /// Latch `finished` the first time an active countdown hits 0
    fn try_finish(&mut self) -> bool {
        if self.current_time > 0.0 || !self.is_active() || self.finished {
            return false;
        }
        self.finished = true;
        self.active = false;
        self.current_time = 0.0;
        tracing::debug!(elapsed = self.elapsed_active, "Gameplay timer finished");
        true
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Started, not paused, and not held
    pub fn is_active(&self) -> bool {
        self.active && !self.is_held()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick_delta_seconds(&self) -> f32 {
        self.tick_delta
    }

    pub fn elapsed_active_seconds(&self) -> f32 {
        self.elapsed_active
    }

    pub fn tick_speed_multiplier(&self) -> f32 {
        self.tick_speed.product()
    }
}

/// Revocation handle for one [`GameplayTimer::hold`] call.
#[derive(Debug, Clone)]
pub struct PauseHandle {
    owner: Weak<Cell<usize>>,
    revoked: Rc<Cell<bool>>,
}

impl Revoke for PauseHandle {
    fn revoke(&self) -> Result<(), RevokeError> {
        if self.revoked.get() {
            return Ok(());
        }
        self.revoked.set(true);

        let Some(holds) = self.owner.upgrade() else {
            return Err(RevokeError::OwnerDropped);
        };
        holds.set(holds.get().saturating_sub(1));
        Ok(())
    }

    fn is_revoked(&self) -> bool {
        self.revoked.get()
    }
}
