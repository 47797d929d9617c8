//! `tk-motion` — turning a polyline into per-tick control commands.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`bounds`]   | `Bounds`: per-tick speed and turn caps, haste-aware             |
//! | [`state`]    | `MovementState`, `Movement`, `Step`, `Trajectory`               |
//! | [`realizer`] | `next_movement`, `shift`, `next_step`, `realize`                |
//! | [`cursor`]   | `MovementCursor`: index into an immutable `Trajectory`          |
//!
//! # Motion model
//!
//! A wizard has no inertia.  Each tick it picks a forward speed in
//! `[min_speed, max_speed]`, a strafe speed in `[-max_strafe, max_strafe]`
//! and a turn in `[-max_turn, max_turn]`.  The displacement is computed from
//! the heading *before* the turn is applied:
//!
//! ```text
//! position' = position + forward·speed + left(forward)·strafe
//! angle'    = normalize(angle + turn)
//! ```
//!
//! Realization is pure: the same inputs always yield the same trajectory.

pub mod bounds;
pub mod cursor;
pub mod realizer;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bounds::Bounds;
pub use cursor::MovementCursor;
pub use realizer::{MAX_STEPS, next_movement, next_step, realize, shift};
pub use state::{Movement, MovementState, Step, Trajectory};
