//! `tk-core` — foundational types for the tactical kernel.
//!
//! This crate is a dependency of every other `tk-*` crate.  It has no
//! `tk-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UnitId`, `NodeId`                                    |
//! | [`point`]       | `Point`, `GridPoint`, `normalize_angle`               |
//! | [`line`]        | `Line` segment                                        |
//! | [`circle`]      | `Circle` with static and swept intersection tests     |
//! | [`minimize`]    | `golden_section`, `INVERTED_PHI`                      |
//! | [`time`]        | `Tick`, `TickBudget`                                  |
//! | [`rules`]       | `GameRules`, `ProjectileKind`, `ProjectileSpec`       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod circle;
pub mod error;
pub mod ids;
pub mod line;
pub mod minimize;
pub mod point;
pub mod rules;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use circle::Circle;
pub use error::{CoreError, CoreResult};
pub use ids::{NodeId, UnitId};
pub use line::Line;
pub use minimize::{INVERTED_PHI, golden_section, golden_section_iterations};
pub use point::{GridPoint, Point, normalize_angle};
pub use rules::{GameRules, ProjectileKind, ProjectileSpec};
pub use time::{Tick, TickBudget};
