//! `tk-cast` — aiming projectiles at static and moving targets.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`solution`] | `CastSolution`, `Rejection`                                    |
//! | [`solver`]   | `CastSolver`: static, moving and wizard regimes                |
//! | [`shadow`]   | `tangent_shadow`: friendly-fire risk behind an ally            |
//! | [`error`]    | `CastError`, `CastResult<T>`                                   |
//!
//! # Regimes
//!
//! A target with zero mean velocity is shot at directly: the aim is the
//! bearing clamped to the cast cone.  A moving target gets a golden-section
//! search over the cast angle that minimises the arrival-time difference
//! between projectile and target at the crossing of their lines; when that
//! misses, a second search over flight time finds the closest approach.
//! Wizards dodge, so they are only shot at when dead ahead and close enough
//! that they cannot walk out of the projectile's reach.
//!
//! Every accepted shot is checked against allied wizards before it is
//! returned.

pub mod error;
pub mod shadow;
pub mod solution;
pub mod solver;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CastError, CastResult};
pub use shadow::tangent_shadow;
pub use solution::{CastSolution, Rejection};
pub use solver::CastSolver;
