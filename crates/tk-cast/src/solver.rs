//! Cast-angle and cast-distance solver.

use std::f64::consts::FRAC_1_PI;

use tracing::{debug, trace};

use tk_core::{
    Circle, GameRules, INVERTED_PHI, Line, Point, ProjectileKind, ProjectileSpec, TickBudget, golden_section,
    golden_section_iterations, normalize_angle,
};
use tk_world::{Target, Unit, UnitHistory, UnitKind, WorldSnapshot};

use crate::error::CastResult;
use crate::shadow::tangent_shadow;
use crate::solution::{CastSolution, Rejection};

/// Tolerance for "the aim line passes through the target's centre".
const CENTER_EPSILON: f64 = 1e-3;

/// Solves shots for the agent of one snapshot.
///
/// The solver borrows everything it reads; build a fresh one per tick.
pub struct CastSolver<'a> {
    rules:   &'a GameRules,
    world:   &'a WorldSnapshot,
    history: &'a UnitHistory,
}

/// Geometry shared by every regime for one (shooter, target, projectile).
struct Shot<'u> {
    origin:     Point,
    /// Distance from the shooter's centre at which the projectile appears.
    muzzle:     f64,
    heading:    f64,
    target:     &'u Unit,
    spec:       ProjectileSpec,
    cast_range: f64,
    half_angle: f64,
}

impl Shot<'_> {
    fn direction(&self, cast_angle: f64) -> Point {
        Point::from_angle(normalize_angle(self.heading + cast_angle))
    }

    fn bearing(&self, point: Point) -> f64 {
        normalize_angle((point - self.origin).absolute_rotation() - self.heading)
    }

    fn clamp(&self, angle: f64) -> f64 {
        angle.clamp(-self.half_angle, self.half_angle)
    }

    /// Segment from the shooter to the end of the cast range along `angle`.
    fn aim_line(&self, angle: f64) -> Line {
        Line::new(self.origin, self.origin + self.direction(angle) * self.cast_range)
    }

    /// Largest centre distance at which projectile and target still touch.
    fn tolerance(&self) -> f64 {
        self.target.radius + self.spec.radius - 1.0
    }
}

/// Where a projectile ray crosses the target's line of motion.
#[derive(Copy, Clone, Debug)]
struct Crossing {
    point:           Point,
    projectile_time: f64,
    unit_time:       f64,
}

impl Crossing {
    fn delta(&self) -> f64 {
        (self.projectile_time - self.unit_time).abs()
    }
}

impl<'a> CastSolver<'a> {
    pub fn new(rules: &'a GameRules, world: &'a WorldSnapshot, history: &'a UnitHistory) -> Self {
        Self { rules, world, history }
    }

    /// Aim `kind` at `target`.
    ///
    /// A shot that cannot be made is `Ok` with `accepted == false`.  Errors
    /// are a spent budget or a target that is not in the snapshot under the
    /// tagged kind.
    pub fn solve(&self, target: Target, kind: ProjectileKind, budget: &TickBudget) -> CastResult<CastSolution> {
        budget.check("cast.solve")?;
        let me = self.world.agent()?;
        let Some(unit) = self.world.resolve(target)? else {
            return Ok(CastSolution::rejected(Rejection::InvalidTarget));
        };
        if !can_hit(unit.kind, kind) {
            return Ok(CastSolution::rejected(Rejection::InvalidTarget));
        }

        let shot = Shot {
            origin:     me.position,
            muzzle:     me.radius,
            heading:    me.angle,
            target:     unit,
            spec:       *self.rules.projectile(kind),
            cast_range: self.rules.wizard_cast_range,
            half_angle: self.rules.cast_half_angle,
        };

        let mut solution = if unit.kind == UnitKind::Wizard {
            self.wizard(&shot)
        } else {
            let velocity = self.history.mean_velocity(unit.id);
            if velocity == Point::ZERO {
                self.stationary(&shot)
            } else {
                self.moving(&shot, velocity, budget)?
            }
        };

        if let Some(intercept) = solution.intercept.filter(|_| solution.accepted) {
            solution.ally_shadow = self
                .world
                .allied_wizards()
                .map(|ally| tangent_shadow(shot.origin, intercept, &ally.circle(), shot.spec.blast_radius()))
                .fold(0.0, f64::max);
        }

        debug!(
            %target,
            %kind,
            accepted = solution.accepted,
            angle = solution.angle,
            min_distance = solution.min_distance,
            rejection = solution.rejection.map(Rejection::as_str),
            "cast solved"
        );
        Ok(solution)
    }

    // ── Regimes ──────────────────────────────────────────────────────────────

    fn stationary(&self, shot: &Shot<'_>) -> CastSolution {
        let position = shot.target.position;
        let angle = shot.clamp(shot.bearing(position));
        let line = shot.aim_line(angle);
        let nearest = line.nearest(position);
        let on_segment = line.has_point(nearest);
        let collision = if on_segment { nearest } else { line.end };

        if collision.distance(position) > shot.spec.radius + shot.target.radius {
            let reason = if on_segment { Rejection::OutOfCone } else { Rejection::OutOfRange };
            return CastSolution::rejected(reason);
        }

        let distance = shot.origin.distance(collision);
        if self.friendly_fire(shot, angle, collision) {
            return CastSolution::rejected(Rejection::FriendlyFire);
        }
        CastSolution::accepted(angle, distance, max_distance(shot, distance), collision, distance / shot.spec.speed)
    }

    fn wizard(&self, shot: &Shot<'_>) -> CastSolution {
        let target = shot.target;
        let angle = shot.clamp(shot.bearing(target.position));
        let line = shot.aim_line(angle);
        let nearest = line.nearest(target.position);
        if !line.has_point(nearest) {
            return CastSolution::rejected(Rejection::OutOfRange);
        }
        if nearest.distance(target.position) > CENTER_EPSILON {
            return CastSolution::rejected(Rejection::OutOfCone);
        }

        let distance = shot.origin.distance(target.position);
        let ticks = (distance / shot.spec.speed).ceil();
        if target.remaining_action_cooldown as f64 <= ticks {
            let reach = ticks * self.rules.wizard_mean_speed(target.is_hastened()) + distance;
            if reach > shot.cast_range + target.radius + shot.spec.radius {
                return CastSolution::rejected(Rejection::Dodgeable);
            }
        }

        self.stationary(shot)
    }

    fn moving(&self, shot: &Shot<'_>, velocity: Point, budget: &TickBudget) -> CastResult<CastSolution> {
        let position = shot.target.position;
        let speed = velocity.norm();
        let distance = shot.origin.distance(position);
        let precision = (shot.spec.radius / distance * FRAC_1_PI).min(INVERTED_PHI);
        let iterations = golden_section_iterations(precision);

        let current = shot.bearing(position);
        let future = shot.bearing(position + velocity);
        let (low, high) = if current < future {
            (shot.clamp(current), shot.half_angle)
        } else {
            (-shot.half_angle, shot.clamp(current))
        };

        budget.check("cast.angle")?;
        let time_delta = |angle: f64| crossing(shot, velocity, angle).map_or(f64::MAX, |c| c.delta());
        let angle = golden_section(&time_delta, low, high, iterations);
        trace!(low, high, iterations, angle, "cast angle search");

        let hit = match crossing(shot, velocity, angle) {
            Some(c) if c.delta() * speed <= shot.tolerance() => Some((angle, c.point, c.projectile_time)),
            _ => {
                budget.check("cast.approach")?;
                closest_approach(shot, velocity, iterations)
            }
        };
        let Some((angle, intercept, flight_ticks)) = hit else {
            return Ok(CastSolution::rejected(Rejection::NoIntercept));
        };

        let to_intercept = shot.origin.distance(intercept);
        let min_distance = (to_intercept - self.min_distance_reduce(shot.target)).max(0.0);
        if min_distance > shot.cast_range - 1.0 {
            return Ok(CastSolution::rejected(Rejection::OutOfRange));
        }
        if self.friendly_fire(shot, angle, intercept) {
            return Ok(CastSolution::rejected(Rejection::FriendlyFire));
        }
        Ok(CastSolution::accepted(
            angle,
            min_distance,
            max_distance(shot, to_intercept),
            intercept,
            flight_ticks,
        ))
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    /// How far short of the intercept the projectile may start hitting: a
    /// wizard's one-tick reach, otherwise the target's radius.
    fn min_distance_reduce(&self, target: &Unit) -> f64 {
        match target.kind {
            UnitKind::Wizard => self.rules.wizard_forward_speed * self.rules.movement_factor(target.is_hastened()),
            _ => target.radius,
        }
    }

    /// `true` if the projectile flying from the muzzle to `intercept`, or its
    /// explosion there, would touch an allied wizard.
    fn friendly_fire(&self, shot: &Shot<'_>, angle: f64, intercept: Point) -> bool {
        let muzzle = shot.muzzle.min(shot.origin.distance(intercept));
        let initial = shot.origin + shot.direction(angle) * muzzle;
        let projectile = Circle::new(initial, shot.spec.radius);
        let explosion = shot.spec.explosion_radius.map(|r| Circle::new(intercept, r));

        self.world.allied_wizards().any(|ally| {
            let body = ally.circle();
            body.has_intersection_moving(&projectile, intercept)
                || explosion.is_some_and(|e| body.has_intersection(&e))
        })
    }
}

/// Bonuses and projectiles cannot be shot; frost bolts do nothing to
/// buildings and trees.
fn can_hit(target: UnitKind, kind: ProjectileKind) -> bool {
    match target {
        UnitKind::Bonus | UnitKind::Projectile(_) => false,
        UnitKind::Building | UnitKind::Tree => kind != ProjectileKind::FrostBolt,
        UnitKind::Wizard | UnitKind::Minion => true,
    }
}

fn max_distance(shot: &Shot<'_>, distance: f64) -> f64 {
    if shot.spec.explodes() { distance } else { f64::INFINITY }
}

/// Crossing of the projectile ray at `angle` with the target's path, if both
/// reach it moving forwards and the projectile, capped at cast range, ends up
/// touching the target there.
fn crossing(shot: &Shot<'_>, velocity: Point, angle: f64) -> Option<Crossing> {
    let origin = shot.origin;
    let position = shot.target.position;
    let direction = shot.direction(angle);
    let point = Line::new(origin, origin + direction).intersection(&Line::new(position, position + velocity))?;

    let projectile_time = (point - origin).dot(direction) / shot.spec.speed;
    let unit_time = (point - position).dot(velocity) / velocity.square_norm();
    if projectile_time < 0.0 || unit_time < 0.0 {
        return None;
    }

    let reach = (shot.spec.speed * projectile_time).min(shot.cast_range);
    let projectile = origin + direction * reach;
    let unit = position + velocity * unit_time;
    if projectile.distance(unit) > shot.tolerance() {
        return None;
    }
    Some(Crossing { point: unit, projectile_time, unit_time })
}

/// Search flight time for the closest approach when aiming at the target's
/// extrapolated position.  Returns `(angle, intercept, ticks)` on a hit.
fn closest_approach(shot: &Shot<'_>, velocity: Point, iterations: usize) -> Option<(f64, Point, f64)> {
    let position = shot.target.position;
    let aim = |t: f64| shot.clamp(shot.bearing(position + velocity * t));
    let miss = |t: f64| {
        let projectile = shot.origin + shot.direction(aim(t)) * (shot.spec.speed * t);
        projectile.distance(position + velocity * t)
    };

    let horizon = shot.cast_range / shot.spec.speed;
    let t = golden_section(&miss, 0.0, horizon, iterations);
    let gap = miss(t);
    trace!(t, gap, "closest approach");
    (gap <= shot.tolerance()).then(|| (aim(t), position + velocity * t, t))
}
