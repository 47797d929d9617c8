//! `tk-tactics` — the per-tick tactical controller.
//!
//! Glues the kernel together: a macro waypoint from `tk-route`, a local path
//! from `tk-path`, a kinematic trajectory from `tk-motion` replayed one
//! movement per tick, and a shot from `tk-cast`, all inside the tick's share
//! of the game's time allowance.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`controller`] | `TacticalController`, `ControllerConfig`                   |
//! | [`builder`]    | `ControllerBuilder`                                        |
//! | [`session`]    | `Session`, per-agent state between ticks                    |
//! | [`objective`]  | `Objective`                                                |
//! | [`command`]    | `ControlCommand`, `CastOrder`                              |
//! | [`allowance`]  | `TimeAllowance`, `AllowanceConfig`, `Role`                 |
//! | [`observer`]   | `DecisionObserver`, `Decision`, `NoopObserver`             |
//! | [`error`]      | `TacticsError`, `TacticsResult<T>`                         |
//!
//! # Replanning
//!
//! The trajectory is kept while it still describes reality.  It is rebuilt
//! when it runs out, when the agent is more than one tick's reach from where
//! it should be, or when the local target or look-at point moves.

pub mod allowance;
pub mod builder;
pub mod command;
pub mod controller;
pub mod error;
pub mod objective;
pub mod observer;
pub mod session;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use allowance::{AllowanceConfig, Role, TimeAllowance};
pub use builder::ControllerBuilder;
pub use command::{CastOrder, ControlCommand};
pub use controller::{ControllerConfig, TacticalController};
pub use error::{TacticsError, TacticsResult};
pub use objective::Objective;
pub use observer::{Decision, DecisionObserver, NoopObserver};
pub use session::Session;
