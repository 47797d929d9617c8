//! Routing error type.

use thiserror::Error;

use tk_core::{CoreError, NodeId};

#[derive(Debug, Error)]
pub enum RouteError {
    /// The graph is connected by construction, so this is an invariant
    /// violation rather than a planning outcome.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in route graph")]
    NodeNotFound(NodeId),

    #[error("tile ({x}, {y}) has no waypoint")]
    MissingTile { x: usize, y: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RouteResult<T> = Result<T, RouteError>;
