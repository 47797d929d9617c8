//! Game time and the per-tick wall-clock budget.
//!
//! # Design
//!
//! Game time is an integer `Tick` counter advanced by the game server.  The
//! engine itself never advances it; it only reads it from the snapshot.
//!
//! Wall-clock time is a separate concern: `TickBudget` is started at the top
//! of a decision and handed by reference to every search loop, which calls
//! `check(site)` at its cancellation points.  A tripped budget surfaces as
//! `CoreError::Timeout` and unwinds through `?` to the tick handler.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute game tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickBudget ───────────────────────────────────────────────────────────────

/// Wall-clock allowance for one decision.
#[derive(Copy, Clone, Debug)]
pub struct TickBudget {
    started: Instant,
    limit:   Duration,
}

impl TickBudget {
    /// Start the clock now with the given allowance.
    pub fn start(limit: Duration) -> Self {
        Self { started: Instant::now(), limit }
    }

    /// A budget that never trips.  Used by tests and offline tools.
    pub fn unlimited() -> Self {
        Self::start(Duration::MAX)
    }

    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    /// Return `Err(Timeout)` once the elapsed time reaches the limit.
    ///
    /// The comparison is `>=`, so a zero budget fails on the first check.
    pub fn check(&self, site: &'static str) -> CoreResult<()> {
        let elapsed = self.elapsed();
        if elapsed >= self.limit {
            return Err(CoreError::Timeout { site, elapsed, limit: self.limit });
        }
        Ok(())
    }
}
