//! Replaying a realized trajectory one tick at a time.

use tk_core::Point;

use crate::bounds::Bounds;
use crate::state::{Movement, MovementState, Trajectory};

/// Position within an immutable [`Trajectory`].
///
/// The cursor owns its trajectory; rebuilding means calling [`reset`] with a
/// fresh one, never patching the old one in place.
///
/// [`reset`]: MovementCursor::reset
#[derive(Clone, Debug)]
pub struct MovementCursor {
    trajectory: Trajectory,
    index:      usize,
}

impl MovementCursor {
    pub fn new(trajectory: Trajectory) -> Self {
        Self { trajectory, index: 0 }
    }

    /// Replace the trajectory and rewind.
    pub fn reset(&mut self, trajectory: Trajectory) {
        self.trajectory = trajectory;
        self.index = 0;
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Movements already handed out.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.trajectory.len() - self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.trajectory.len()
    }

    /// The movement `next` would return, without advancing.
    pub fn peek(&self) -> Option<&Movement> {
        self.trajectory.steps.get(self.index).map(|s| &s.movement)
    }

    /// Where the agent should be before the next movement is applied.
    pub fn expected_state(&self) -> &MovementState {
        match self.index {
            0 => &self.trajectory.initial,
            i => &self.trajectory.steps[i - 1].state,
        }
    }

    /// `true` once `actual` is more than one tick's reach from where the
    /// trajectory says the agent should be.
    pub fn has_drifted(&self, actual: Point, bounds: &Bounds) -> bool {
        let expected = self.expected_state();
        actual.distance(expected.position) > bounds.max_speed(expected.tick)
    }
}

impl Iterator for MovementCursor {
    type Item = Movement;

    fn next(&mut self) -> Option<Movement> {
        let movement = self.peek().copied()?;
        self.index += 1;
        Some(movement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}
