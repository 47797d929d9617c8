//! Wall-clock allowance per tick.
//!
//! The game grants a fixed pool up front plus a per-tick increment.  Each
//! tick may spend the smaller of what is left of the pool so far and an even
//! share of what will be left over the rest of the game, so an early burst
//! never starves the late game.

use std::time::Duration;

use tk_core::TickBudget;

use crate::error::{TacticsError, TacticsResult};

/// Whether the agent drives its team's plan or only follows it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    Leader,
    #[default]
    Follower,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllowanceConfig {
    /// Pool available before the first tick.
    pub initial:           Duration,
    pub leader_per_tick:   Duration,
    pub follower_per_tick: Duration,
    /// Fraction of the computed limit actually handed out.
    pub safety_factor:     f64,
}

impl Default for AllowanceConfig {
    fn default() -> Self {
        Self {
            initial:           Duration::from_secs(10),
            leader_per_tick:   Duration::from_millis(20),
            follower_per_tick: Duration::from_millis(10),
            safety_factor:     0.9,
        }
    }
}

impl AllowanceConfig {
    pub fn validate(&self) -> TacticsResult<()> {
        if !(self.safety_factor > 0.0 && self.safety_factor <= 1.0) {
            return Err(TacticsError::Config(format!(
                "safety_factor must be in (0, 1], got {}",
                self.safety_factor
            )));
        }
        Ok(())
    }

    pub fn per_tick(&self, role: Role) -> Duration {
        match role {
            Role::Leader   => self.leader_per_tick,
            Role::Follower => self.follower_per_tick,
        }
    }
}

/// Running account of time spent against the game's allowance.
#[derive(Clone, Debug)]
pub struct TimeAllowance {
    config:     AllowanceConfig,
    role:       Role,
    tick_count: u64,
    spent:      Duration,
}

impl TimeAllowance {
    pub fn new(config: AllowanceConfig, role: Role, tick_count: u64) -> Self {
        Self { config, role, tick_count, spent: Duration::ZERO }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn spent(&self) -> Duration {
        self.spent
    }

    /// Everything granted up to and including `tick`.
    pub fn full(&self, tick: u64) -> Duration {
        let ticks = u32::try_from(tick).unwrap_or(u32::MAX);
        self.config.initial.saturating_add(self.config.per_tick(self.role).saturating_mul(ticks))
    }

    /// Time the decision at `tick` may take.
    pub fn limit(&self, tick: u64) -> Duration {
        let now = self.full(tick).saturating_sub(self.spent);
        let left_ticks = u32::try_from(self.tick_count.saturating_sub(tick).max(1)).unwrap_or(u32::MAX);
        let share = self.full(self.tick_count).saturating_sub(self.spent) / left_ticks;
        now.min(share).mul_f64(self.config.safety_factor)
    }

    /// Start the clock for `tick`.
    pub fn budget(&self, tick: u64) -> TickBudget {
        TickBudget::start(self.limit(tick))
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.spent = self.spent.saturating_add(elapsed);
    }
}
