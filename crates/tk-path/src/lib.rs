//! `tk-path` — local path planning among moving obstacles.
//!
//! The planner runs a best-first search over an integer grid anchored at the
//! agent.  Every search node carries the (fractional) tick at which the agent
//! would arrive there, so moving units and projectiles are tested where they
//! will be, not where they are.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`config`]  | `PlannerConfig`                                            |
//! | [`barrier`] | `MovingObstacle`, `Barrier`, per-search caches             |
//! | [`planner`] | `PathRequest`, `plan`, `plan_for_agent`                    |
//! | [`path`]    | `LocalPath`                                                |
//! | [`error`]   | `PathError`, `PathResult<T>`                               |

pub mod barrier;
pub mod config;
pub mod error;
pub mod path;
pub mod planner;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use barrier::{Barrier, MovingObstacle};
pub use config::PlannerConfig;
pub use error::{PathError, PathResult};
pub use path::LocalPath;
pub use planner::{PathRequest, plan, plan_for_agent};
