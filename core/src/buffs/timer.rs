use std::cell::RefCell;
use std::rc::Rc;

use stackbuff_types::formatting::format_multiplier;

use crate::effects::{ApplyScope, BuffBehavior};
use crate::error::BuffError;
use crate::gameplay::{GameContext, GameplayTimer};

/// Changes how the gameplay countdown runs while active.
#[derive(Debug, Default)]
pub struct TimerBuff {
    tick_speed_multiplier: Option<f32>,
    pause: bool,
    timer: Option<Rc<RefCell<GameplayTimer>>>,
}

impl TimerBuff {
    pub fn new(tick_speed_multiplier: Option<f32>, pause: bool) -> Self {
        Self {
            tick_speed_multiplier,
            pause,
            timer: None,
        }
    }

    fn timer(&self) -> Result<&Rc<RefCell<GameplayTimer>>, BuffError> {
        self.timer
            .as_ref()
            .ok_or(BuffError::MissingCapability("gameplay timer"))
    }
}

impl BuffBehavior<GameContext> for TimerBuff {
    fn init(&mut self, ctx: &GameContext) -> Result<(), BuffError> {
        self.timer = Some(Rc::clone(&ctx.timer));
        Ok(())
    }

    fn on_apply(&mut self, scope: &mut ApplyScope) -> Result<(), BuffError> {
        let timer = self.timer()?;
        let timer = timer
            .try_borrow()
            .map_err(|_| BuffError::MissingCapability("gameplay timer (busy)"))?;

        if self.pause {
            scope.track(timer.hold());
        }
        if let Some(multiplier) = self.tick_speed_multiplier {
            scope.track(timer.tick_speed().push(multiplier));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match (self.pause, self.tick_speed_multiplier) {
            (true, Some(m)) => format!("timer paused, speed {}", format_multiplier(m)),
            (true, None) => "timer paused".to_string(),
            (false, Some(m)) => format!("timer speed {}", format_multiplier(m)),
            (false, None) => String::new(),
        }
    }
}
