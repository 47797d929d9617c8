//! What the controller hands back to the game each tick.

use tk_core::ProjectileKind;
use tk_motion::Movement;

/// A cast to issue this tick; `angle` is relative to the agent's heading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastOrder {
    pub kind:         ProjectileKind,
    pub angle:        f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlCommand {
    pub speed:  f64,
    pub strafe: f64,
    pub turn:   f64,
    pub cast:   Option<CastOrder>,
}

impl ControlCommand {
    /// Stand still, cast nothing.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn from_movement(movement: Movement) -> Self {
        Self { speed: movement.speed, strafe: movement.strafe, turn: movement.turn, cast: None }
    }

    pub fn movement(&self) -> Movement {
        Movement::new(self.speed, self.strafe, self.turn)
    }

    pub fn is_idle(&self) -> bool {
        self.speed == 0.0 && self.strafe == 0.0 && self.turn == 0.0 && self.cast.is_none()
    }
}
