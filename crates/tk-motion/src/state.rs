//! Trajectory samples and the commands between them.

use tk_core::Point;

/// Where the agent is, and which way it faces, `tick` ticks from now.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementState {
    pub tick:     u64,
    pub position: Point,
    pub angle:    f64,
}

impl MovementState {
    pub fn new(tick: u64, position: Point, angle: f64) -> Self {
        Self { tick, position, angle }
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn forward(&self) -> Point {
        Point::from_angle(self.angle)
    }
}

/// One tick of control output.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    /// Along the heading; negative is backwards.
    pub speed:  f64,
    /// Along the left orthogonal of the heading.
    pub strafe: f64,
    pub turn:   f64,
}

impl Movement {
    pub const IDLE: Movement = Movement { speed: 0.0, strafe: 0.0, turn: 0.0 };

    pub fn new(speed: f64, strafe: f64, turn: f64) -> Self {
        Self { speed, strafe, turn }
    }
}

/// A command and the state it leads to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub movement: Movement,
    pub state:    MovementState,
}

/// Realized motion: the starting state followed by one [`Step`] per tick.
///
/// States and movements stay in lock-step by construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    pub initial: MovementState,
    pub steps:   Vec<Step>,
}

impl Trajectory {
    /// A trajectory with no movement.
    pub fn at_rest(initial: MovementState) -> Self {
        Self { initial, steps: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// State after the last step, or the initial state.
    pub fn final_state(&self) -> &MovementState {
        self.steps.last().map_or(&self.initial, |s| &s.state)
    }

    /// All states including the initial one.
    pub fn states(&self) -> impl Iterator<Item = &MovementState> {
        std::iter::once(&self.initial).chain(self.steps.iter().map(|s| &s.state))
    }

    pub fn movements(&self) -> impl Iterator<Item = &Movement> {
        self.steps.iter().map(|s| &s.movement)
    }
}
