use std::fmt;

use tk_core::Point;

/// Why a shot was turned down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// No target, a bonus, or a projectile kind the target is immune to.
    InvalidTarget,
    /// The clamped aim line does not pass through the target.
    OutOfCone,
    /// The projectile cannot reach the target.
    OutOfRange,
    /// Neither search found a crossing within the combined radii.
    NoIntercept,
    /// The target can step out of reach before the projectile arrives.
    Dodgeable,
    /// An allied wizard would be hit.
    FriendlyFire,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::InvalidTarget => "invalid_target",
            Rejection::OutOfCone => "out_of_cone",
            Rejection::OutOfRange => "out_of_range",
            Rejection::NoIntercept => "no_intercept",
            Rejection::Dodgeable => "dodgeable",
            Rejection::FriendlyFire => "friendly_fire",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Firing geometry for one projectile on one tick.
///
/// `angle` is relative to the shooter's heading.  The projectile flies
/// through everything closer than `min_distance` and, for exploding kinds,
/// detonates at `max_distance`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastSolution {
    pub accepted:     bool,
    pub angle:        f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub intercept:    Option<Point>,
    pub flight_ticks: f64,
    /// Tangent friendly-fire risk in `[0, 1]`; see [`tangent_shadow`](crate::tangent_shadow).
    pub ally_shadow:  f64,
    pub rejection:    Option<Rejection>,
}

impl CastSolution {
    pub fn rejected(reason: Rejection) -> Self {
        Self {
            accepted:     false,
            angle:        0.0,
            min_distance: 0.0,
            max_distance: 0.0,
            intercept:    None,
            flight_ticks: 0.0,
            ally_shadow:  0.0,
            rejection:    Some(reason),
        }
    }

    pub(crate) fn accepted(angle: f64, min_distance: f64, max_distance: f64, intercept: Point, flight_ticks: f64) -> Self {
        Self {
            accepted: true,
            angle,
            min_distance,
            max_distance,
            intercept: Some(intercept),
            flight_ticks,
            ally_shadow: 0.0,
            rejection: None,
        }
    }
}
