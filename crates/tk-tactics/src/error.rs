use thiserror::Error;

use tk_cast::CastError;
use tk_core::CoreError;
use tk_path::PathError;
use tk_route::RouteError;
use tk_world::WorldError;

#[derive(Debug, Error)]
pub enum TacticsError {
    #[error("controller configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Cast(#[from] CastError),
}

impl TacticsError {
    /// `true` if some stage ran out of the tick's time allowance.
    pub fn is_timeout(&self) -> bool {
        match self {
            TacticsError::Core(e) => e.is_timeout(),
            TacticsError::Path(e) => e.is_timeout(),
            TacticsError::Cast(e) => e.is_timeout(),
            TacticsError::Route(RouteError::Core(e)) => e.is_timeout(),
            TacticsError::Config(_) | TacticsError::World(_) | TacticsError::Route(_) => false,
        }
    }
}

pub type TacticsResult<T> = Result<T, TacticsError>;
