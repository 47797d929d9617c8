use thiserror::Error;

use tk_core::CoreError;
use tk_world::WorldError;

#[derive(Debug, Error)]
pub enum CastError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    World(#[from] WorldError),
}

impl CastError {
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CastError::Core(e) if e.is_timeout())
    }
}

pub type CastResult<T> = Result<T, CastError>;
