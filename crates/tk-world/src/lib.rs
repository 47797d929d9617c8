//! `tk-world` — the world as the engine sees it for one tick.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`unit`]        | `Unit`, `UnitKind`, `Faction`, `Status`, `StatusKind`     |
//! | [`snapshot`]    | `WorldSnapshot` (read-only per-tick view, id lookup)      |
//! | [`builder`]     | `WorldBuilder` (fluent, validating construction)          |
//! | [`target`]      | `Target` tagged variant resolved against a snapshot      |
//! | [`history`]     | `UnitHistory` (speed ring and sightings across ticks)    |
//! | [`error`]       | `WorldError`, `WorldResult`                               |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public value types. |

pub mod builder;
pub mod error;
pub mod history;
pub mod snapshot;
pub mod target;
pub mod unit;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use history::{SPEED_SAMPLES, UnitHistory, UnitRecord};
pub use snapshot::WorldSnapshot;
pub use target::Target;
pub use unit::{Faction, Status, StatusKind, Unit, UnitKind};
