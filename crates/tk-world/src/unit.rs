//! Units: everything with a position and a radius.
//!
//! Wizards, minions, buildings, trees, bonuses and projectiles share one
//! struct.  The variant-specific data is small (an owner for projectiles, a
//! cooldown for attackers) so a flat record is simpler than a trait object
//! hierarchy and keeps the snapshot a single `Vec`.

use tk_core::{Circle, Point, ProjectileKind, Tick, UnitId};

// ── Faction ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Faction {
    Allied,
    Hostile,
    /// Neutral minions and all trees.
    #[default]
    Neutral,
}

// ── UnitKind ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitKind {
    Wizard,
    Minion,
    Building,
    Tree,
    Bonus,
    Projectile(ProjectileKind),
}

impl UnitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Wizard        => "wizard",
            UnitKind::Minion        => "minion",
            UnitKind::Building      => "building",
            UnitKind::Tree          => "tree",
            UnitKind::Bonus         => "bonus",
            UnitKind::Projectile(_) => "projectile",
        }
    }

    /// Buildings and trees never move.
    #[inline]
    pub fn is_static_obstacle(self) -> bool {
        matches!(self, UnitKind::Building | UnitKind::Tree)
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKind {
    Hastened,
    Frozen,
    Shielded,
    Empowered,
    Burning,
}

/// A timed buff or debuff.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub kind:            StatusKind,
    pub remaining_ticks: u64,
}

// ── Unit ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id:       UnitId,
    pub kind:     UnitKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub faction:  Faction,
    pub position: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub velocity: Point,
    /// Heading in radians.
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle:    f64,
    pub radius:   f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub life:     i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<Status>,
    /// Ticks until the unit may attack or cast again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub remaining_action_cooldown: u64,
    /// Caster of a projectile.
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner:    Option<UnitId>,
}

impl Unit {
    pub fn new(id: UnitId, kind: UnitKind, faction: Faction, position: Point, radius: f64) -> Self {
        Self {
            id,
            kind,
            faction,
            position,
            velocity: Point::ZERO,
            angle: 0.0,
            radius,
            life: 0,
            statuses: Vec::new(),
            remaining_action_cooldown: 0,
            owner: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Point) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_life(mut self, life: i32) -> Self {
        self.life = life;
        self
    }

    pub fn with_status(mut self, kind: StatusKind, remaining_ticks: u64) -> Self {
        self.statuses.push(Status { kind, remaining_ticks });
        self
    }

    pub fn with_cooldown(mut self, ticks: u64) -> Self {
        self.remaining_action_cooldown = ticks;
        self
    }

    pub fn with_owner(mut self, owner: UnitId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Remaining ticks of `kind`, zero if the status is absent.
    pub fn status_ticks(&self, kind: StatusKind) -> u64 {
        self.statuses
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.remaining_ticks)
            .max()
            .unwrap_or(0)
    }

    #[inline]
    pub fn hastened_ticks(&self) -> u64 {
        self.status_ticks(StatusKind::Hastened)
    }

    #[inline]
    pub fn is_hastened(&self) -> bool {
        self.hastened_ticks() > 0
    }

    /// Position after `ticks` ticks at the current velocity.
    #[inline]
    pub fn extrapolate(&self, ticks: f64) -> Point {
        self.position + self.velocity * ticks
    }

    #[inline]
    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, UnitKind::Projectile(_))
    }

    /// Same faction, excluding neutrals which are nobody's ally.
    #[inline]
    pub fn is_ally_of(&self, other: &Unit) -> bool {
        self.faction != Faction::Neutral && self.faction == other.faction
    }

    /// Tick at which the unit may act again.
    #[inline]
    pub fn ready_at(&self, now: Tick) -> Tick {
        now + self.remaining_action_cooldown
    }
}
