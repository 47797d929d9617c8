//! Per-tick movement limits.

use tk_core::GameRules;
use tk_world::Unit;

/// Speed and turn caps for one wizard, as a function of the tick offset from
/// the moment the bounds were taken.  Haste applies while
/// `tick < hastened_ticks`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    forward:        f64,
    backward:       f64,
    strafe:         f64,
    max_turn:       f64,
    movement_bonus: f64,
    rotation_bonus: f64,
    hastened_ticks: u64,
}

impl Bounds {
    pub fn new(rules: &GameRules, hastened_ticks: u64) -> Self {
        Self {
            forward:        rules.wizard_forward_speed,
            backward:       rules.wizard_backward_speed,
            strafe:         rules.wizard_strafe_speed,
            max_turn:       rules.wizard_max_turn_angle,
            movement_bonus: rules.haste_movement_bonus,
            rotation_bonus: rules.haste_rotation_bonus,
            hastened_ticks,
        }
    }

    /// Bounds for `unit` with its current haste.
    pub fn for_unit(rules: &GameRules, unit: &Unit) -> Self {
        Self::new(rules, unit.hastened_ticks())
    }

    #[inline]
    fn hastened(&self, tick: u64) -> bool {
        tick < self.hastened_ticks
    }

    #[inline]
    pub fn movement_factor(&self, tick: u64) -> f64 {
        1.0 + if self.hastened(tick) { self.movement_bonus } else { 0.0 }
    }

    #[inline]
    pub fn rotation_factor(&self, tick: u64) -> f64 {
        1.0 + if self.hastened(tick) { self.rotation_bonus } else { 0.0 }
    }

    #[inline]
    pub fn max_speed(&self, tick: u64) -> f64 {
        self.forward * self.movement_factor(tick)
    }

    /// Negative: the fastest backward speed.
    #[inline]
    pub fn min_speed(&self, tick: u64) -> f64 {
        -self.backward * self.movement_factor(tick)
    }

    #[inline]
    pub fn max_strafe_speed(&self, tick: u64) -> f64 {
        self.strafe * self.movement_factor(tick)
    }

    #[inline]
    pub fn max_turn(&self, tick: u64) -> f64 {
        self.max_turn * self.rotation_factor(tick)
    }

    #[inline]
    pub fn min_turn(&self, tick: u64) -> f64 {
        -self.max_turn(tick)
    }

    #[inline]
    pub fn limit_turn(&self, value: f64, tick: u64) -> f64 {
        value.max(self.min_turn(tick)).min(self.max_turn(tick))
    }
}
