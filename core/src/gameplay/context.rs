use std::cell::RefCell;
use std::rc::Rc;

use super::{GameplayTimer, ScoreModel};

/// Collaborators handed to buffs at registration.
///
/// Cloning shares the same underlying systems.
#[derive(Debug, Clone, Default)]
pub struct GameContext {
    pub score: Rc<RefCell<ScoreModel>>,
    pub timer: Rc<RefCell<GameplayTimer>>,
}

impl GameContext {
    pub fn new(score: ScoreModel, timer: GameplayTimer) -> Self {
        Self {
            score: Rc::new(RefCell::new(score)),
            timer: Rc::new(RefCell::new(timer)),
        }
    }
}
