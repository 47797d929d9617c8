//! Kernel error type.
//!
//! Sub-crates wrap `CoreError` as one variant of their own enum via `#[from]`
//! so a timeout raised deep inside a search loop reaches the tick handler
//! unchanged.

use std::time::Duration;

use thiserror::Error;

/// The base error type shared by all `tk-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The per-tick wall-clock budget ran out at `site`.
    #[error("time budget exhausted at {site}: {elapsed:?} spent of {limit:?}")]
    Timeout {
        site:    &'static str,
        elapsed: Duration,
        limit:   Duration,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// `true` for the one condition the tick handler recovers from.
    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::Timeout { .. })
    }
}

/// Shorthand result type for `tk-core`.
pub type CoreResult<T> = Result<T, CoreError>;
