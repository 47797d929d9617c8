//! Path-to-commands realization.
//!
//! `realize` walks the path point by point, issuing the command that moves
//! the agent straight at the current point each tick until it is within one
//! tick's reach, then moves on to the next point.  With a look-at point the
//! heading is steered toward it only once the turn would take at least as
//! long as the rest of the walk; until then the agent faces where it goes and
//! keeps full forward speed.

use tk_core::{Point, normalize_angle};

use crate::bounds::Bounds;
use crate::state::{Movement, MovementState, Step, Trajectory};

/// Hard cap on realized ticks.
pub const MAX_STEPS: usize = 10_000;

/// The single-tick command that moves from `state` toward `toward`.
///
/// With `face = Some(p)` the turn heads for `p`; otherwise it heads for
/// `toward`.
pub fn next_movement(toward: Point, state: &MovementState, face: Option<Point>, bounds: &Bounds) -> Movement {
    let tick = state.tick;
    let direction = toward - state.position;
    let norm = direction.norm();

    let mut angle_to = 0.0;
    let mut speed = 0.0;
    let mut strafe = 0.0;
    if norm != 0.0 {
        angle_to = normalize_angle(direction.absolute_rotation() - state.angle);
        let cap = if angle_to.abs() <= std::f64::consts::FRAC_PI_2 {
            bounds.max_speed(tick)
        } else {
            -bounds.min_speed(tick)
        };
        speed = angle_to.cos() * cap;
        strafe = bounds.max_strafe_speed(tick) * angle_to.sin();
        let factor = (norm / speed.hypot(strafe)).min(1.0);
        speed *= factor;
        strafe *= factor;
    }

    let wanted = match face {
        Some(look) => normalize_angle((look - state.position).absolute_rotation() - state.angle),
        None => angle_to,
    };
    Movement::new(speed, strafe, bounds.limit_turn(wanted, tick))
}

/// World displacement produced by `movement` from `state`.
pub fn shift(state: &MovementState, movement: &Movement) -> Point {
    let forward = state.forward();
    forward * movement.speed + forward.left_orthogonal() * movement.strafe
}

/// Apply one command.
pub fn next_step(toward: Point, state: &MovementState, face: Option<Point>, bounds: &Bounds) -> Step {
    let movement = next_movement(toward, state, face, bounds);
    let next = MovementState::new(
        state.tick + 1,
        state.position + shift(state, &movement),
        normalize_angle(state.angle + movement.turn),
    );
    Step { movement, state: next }
}

/// Realize `path` from `initial`, optionally ending up facing `look_at`.
///
/// An empty path yields an empty trajectory.
pub fn realize(path: &[Point], look_at: Option<Point>, bounds: &Bounds, initial: MovementState) -> Trajectory {
    let mut trajectory = Trajectory::at_rest(initial);
    let Some(&last) = path.last() else {
        return trajectory;
    };

    // tail[i]: path length from path[i] to the end.
    let mut tail = vec![0.0; path.len()];
    for i in (0..path.len().saturating_sub(1)).rev() {
        tail[i] = tail[i + 1] + path[i].distance(path[i + 1]);
    }

    let mut state = initial;
    let push = |trajectory: &mut Trajectory, state: &mut MovementState, toward: Point, face: Option<Point>| {
        let step = next_step(toward, state, face, bounds);
        *state = step.state;
        trajectory.steps.push(step);
    };

    for (i, &point) in path.iter().enumerate() {
        while point.distance(state.position) > bounds.max_speed(state.tick) && trajectory.len() < MAX_STEPS {
            let remaining = point.distance(state.position) + tail[i];
            let face = facing(look_at, &state, remaining, bounds);
            push(&mut trajectory, &mut state, point, face);
        }
    }

    if let Some(look) = look_at {
        while angle_to(look, &state).abs() > bounds.max_turn(state.tick) * 0.1 && trajectory.len() < MAX_STEPS {
            push(&mut trajectory, &mut state, last, Some(look));
        }
    }

    if state.position != last && trajectory.len() < MAX_STEPS {
        push(&mut trajectory, &mut state, last, look_at);
    }

    if trajectory.len() >= MAX_STEPS {
        tracing::warn!(steps = trajectory.len(), "trajectory truncated");
    }
    trajectory
}

#[inline]
fn angle_to(point: Point, state: &MovementState) -> f64 {
    normalize_angle((point - state.position).absolute_rotation() - state.angle)
}

/// `Some(look_at)` once turning to it takes at least as many ticks as
/// covering the `remaining` path.
fn facing(look_at: Option<Point>, state: &MovementState, remaining: f64, bounds: &Bounds) -> Option<Point> {
    let look = look_at?;
    let turn_ticks = angle_to(look, state).abs() / bounds.max_turn(state.tick);
    let move_ticks = remaining / bounds.max_speed(state.tick);
    (turn_ticks >= move_ticks).then_some(look)
}
