use thiserror::Error;

use tk_core::UnitId;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unit {0} is not in the snapshot")]
    UnknownUnit(UnitId),

    #[error("unit {id} is a {found}, expected a {expected}")]
    KindMismatch {
        id:       UnitId,
        expected: &'static str,
        found:    &'static str,
    },

    #[error("controlled unit {0} is missing from the snapshot")]
    MissingAgent(UnitId),

    #[error("unit {0} appears more than once in the snapshot")]
    DuplicateUnit(UnitId),
}

pub type WorldResult<T> = Result<T, WorldError>;
