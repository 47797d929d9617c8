//! Plain data row types written by trace backends.

use std::time::Duration;

use tk_cast::CastSolution;
use tk_core::Tick;
use tk_tactics::Decision;

/// One tick's decision for the traced agent.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRow {
    pub tick:        u64,
    pub x:           f64,
    pub y:           f64,
    pub heading:     f64,
    pub speed:       f64,
    pub strafe:      f64,
    pub turn:        f64,
    /// Projectile kind, empty when nothing was cast.
    pub cast:        String,
    pub cast_angle:  f64,
    pub path_length: f64,
    pub replanned:   bool,
    pub timed_out:   bool,
    pub elapsed_us:  u64,
    /// `u64::MAX` for an unlimited budget.
    pub limit_us:    u64,
}

impl From<&Decision> for DecisionRow {
    fn from(d: &Decision) -> Self {
        let cast = d.command.cast;
        Self {
            tick:        d.tick.0,
            x:           d.position.x,
            y:           d.position.y,
            heading:     d.heading,
            speed:       d.command.speed,
            strafe:      d.command.strafe,
            turn:        d.command.turn,
            cast:        cast.map(|c| c.kind.to_string()).unwrap_or_default(),
            cast_angle:  cast.map_or(0.0, |c| c.angle),
            path_length: d.path_length,
            replanned:   d.replanned,
            timed_out:   d.timed_out,
            elapsed_us:  micros(d.elapsed),
            limit_us:    micros(d.limit),
        }
    }
}

/// One run of the cast solver, accepted or not.
#[derive(Debug, Clone, PartialEq)]
pub struct CastRow {
    pub tick:         u64,
    pub accepted:     bool,
    pub angle:        f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub flight_ticks: f64,
    pub ally_shadow:  f64,
    /// Rejection reason, empty for an accepted shot.
    pub rejection:    String,
}

impl CastRow {
    pub fn new(tick: Tick, solution: &CastSolution) -> Self {
        Self {
            tick:         tick.0,
            accepted:     solution.accepted,
            angle:        solution.angle,
            min_distance: solution.min_distance,
            max_distance: solution.max_distance,
            flight_ticks: solution.flight_ticks,
            ally_shadow:  solution.ally_shadow,
            rejection:    solution.rejection.map(|r| r.as_str().to_owned()).unwrap_or_default(),
        }
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
