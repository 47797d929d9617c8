//! Match-wide game constants and projectile specifications.
//!
//! `GameRules::default()` holds the reference values of the arena.  The game
//! server may send different ones; nothing in the engine hard-codes them.

use std::f64::consts::PI;

use crate::error::{CoreError, CoreResult};

// ── ProjectileKind ───────────────────────────────────────────────────────────

/// Projectile families a wizard can fire or be hit by.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProjectileKind {
    #[default]
    MagicMissile,
    FrostBolt,
    Fireball,
    /// Thrown by fetish minions; never cast by the agent.
    Dart,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 4] = [
        ProjectileKind::MagicMissile,
        ProjectileKind::FrostBolt,
        ProjectileKind::Fireball,
        ProjectileKind::Dart,
    ];

    /// Label used in CSV traces and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectileKind::MagicMissile => "magic_missile",
            ProjectileKind::FrostBolt    => "frost_bolt",
            ProjectileKind::Fireball     => "fireball",
            ProjectileKind::Dart         => "dart",
        }
    }
}

impl std::fmt::Display for ProjectileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProjectileSpec ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileSpec {
    pub radius: f64,
    /// Distance travelled per tick.
    pub speed:  f64,
    /// Area-damage radius around the detonation point, `None` for projectiles
    /// that only hit what they touch.
    pub explosion_radius: Option<f64>,
}

impl ProjectileSpec {
    /// Radius within which the projectile harms a unit: the explosion radius
    /// if it has one, otherwise its own body.
    #[inline]
    pub fn blast_radius(&self) -> f64 {
        self.explosion_radius.unwrap_or(self.radius)
    }

    #[inline]
    pub fn explodes(&self) -> bool {
        self.explosion_radius.is_some()
    }
}

// ── GameRules ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameRules {
    /// Side length of the square arena.
    pub map_size:   f64,
    /// Total ticks in one match.
    pub tick_count: u64,

    pub wizard_radius:          f64,
    pub wizard_forward_speed:   f64,
    pub wizard_backward_speed:  f64,
    pub wizard_strafe_speed:    f64,
    /// Maximum heading change per tick, radians.
    pub wizard_max_turn_angle:  f64,
    pub wizard_cast_range:      f64,
    pub wizard_vision_range:    f64,

    /// Fractional speed bonus while hastened.
    pub haste_movement_bonus: f64,
    /// Fractional turn-rate bonus while hastened.
    pub haste_rotation_bonus: f64,

    /// Half of the staff sector: casts are limited to `heading ± this`.
    pub cast_half_angle: f64,

    pub minion_radius: f64,
    pub minion_speed:  f64,
    pub bonus_radius:  f64,

    pub dart:          ProjectileSpec,
    pub magic_missile: ProjectileSpec,
    pub frost_bolt:    ProjectileSpec,
    pub fireball:      ProjectileSpec,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            map_size:   4000.0,
            tick_count: 20_000,

            wizard_radius:         35.0,
            wizard_forward_speed:  4.0,
            wizard_backward_speed: 3.0,
            wizard_strafe_speed:   3.0,
            wizard_max_turn_angle: PI / 30.0,
            wizard_cast_range:     500.0,
            wizard_vision_range:   600.0,

            haste_movement_bonus: 0.3,
            haste_rotation_bonus: 0.5,

            cast_half_angle: PI / 12.0,

            minion_radius: 25.0,
            minion_speed:  3.0,
            bonus_radius:  20.0,

            dart:          ProjectileSpec { radius: 5.0, speed: 50.0, explosion_radius: None },
            magic_missile: ProjectileSpec { radius: 10.0, speed: 40.0, explosion_radius: None },
            frost_bolt:    ProjectileSpec { radius: 15.0, speed: 35.0, explosion_radius: None },
            fireball:      ProjectileSpec { radius: 20.0, speed: 30.0, explosion_radius: Some(100.0) },
        }
    }
}

impl GameRules {
    pub fn projectile(&self, kind: ProjectileKind) -> &ProjectileSpec {
        match kind {
            ProjectileKind::MagicMissile => &self.magic_missile,
            ProjectileKind::FrostBolt    => &self.frost_bolt,
            ProjectileKind::Fireball     => &self.fireball,
            ProjectileKind::Dart         => &self.dart,
        }
    }

    /// Speed multiplier for a wizard, `1 + bonus` while hastened.
    #[inline]
    pub fn movement_factor(&self, hastened: bool) -> f64 {
        1.0 + if hastened { self.haste_movement_bonus } else { 0.0 }
    }

    /// Average of the four movement directions,
    /// `(forward + backward + 2·strafe) / 4`.
    pub fn wizard_mean_speed(&self, hastened: bool) -> f64 {
        let base = (self.wizard_forward_speed
            + self.wizard_backward_speed
            + 2.0 * self.wizard_strafe_speed)
            / 4.0;
        base * self.movement_factor(hastened)
    }

    /// Reject non-positive sizes and speeds.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("map_size", self.map_size),
            ("wizard_radius", self.wizard_radius),
            ("wizard_forward_speed", self.wizard_forward_speed),
            ("wizard_backward_speed", self.wizard_backward_speed),
            ("wizard_strafe_speed", self.wizard_strafe_speed),
            ("wizard_max_turn_angle", self.wizard_max_turn_angle),
            ("wizard_cast_range", self.wizard_cast_range),
            ("cast_half_angle", self.cast_half_angle),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.tick_count == 0 {
            return Err(CoreError::Config("tick_count must be positive".into()));
        }
        for kind in ProjectileKind::ALL {
            let spec = self.projectile(kind);
            if !(spec.radius > 0.0 && spec.speed > 0.0) {
                return Err(CoreError::Config(format!(
                    "{kind} needs positive radius and speed"
                )));
            }
        }
        Ok(())
    }
}
