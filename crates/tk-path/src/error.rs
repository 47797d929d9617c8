use thiserror::Error;

use tk_core::CoreError;
use tk_world::WorldError;

#[derive(Debug, Error)]
pub enum PathError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    World(#[from] WorldError),
}

impl PathError {
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, PathError::Core(e) if e.is_timeout())
    }
}

pub type PathResult<T> = Result<T, PathError>;
