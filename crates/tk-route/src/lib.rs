//! `tk-route` — the coarse waypoint graph used to pick a lane and a next
//! waypoint before local planning.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `RouteGraph` (dense arc matrix + R-tree), `Lane`, `LaneSet`  |
//! | [`router`] | `Router` trait, `RoutePath`, `DijkstraRouter`                |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod graph;
pub mod router;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RouteError, RouteResult};
pub use graph::{Lane, LaneSet, RouteGraph, TILES};
pub use router::{DijkstraRouter, RoutePath, Router};
