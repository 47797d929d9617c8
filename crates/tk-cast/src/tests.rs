//! Unit tests for tk-cast.

#[cfg(test)]
mod helpers {
    use tk_core::{GameRules, Point, ProjectileKind, Tick, TickBudget, UnitId};
    use tk_world::{Faction, Target, Unit, UnitHistory, UnitKind, WorldBuilder, WorldSnapshot};

    use crate::{CastSolution, CastSolver};

    pub const ME: UnitId = UnitId(1);
    pub const TARGET: UnitId = UnitId(2);
    pub const ALLY: UnitId = UnitId(3);

    pub fn me() -> Unit {
        Unit::new(ME, UnitKind::Wizard, Faction::Allied, Point::new(1000.0, 1000.0), 35.0)
    }

    pub fn minion(x: f64, y: f64, vx: f64, vy: f64) -> Unit {
        Unit::new(TARGET, UnitKind::Minion, Faction::Hostile, Point::new(x, y), 25.0)
            .with_velocity(Point::new(vx, vy))
    }

    pub fn enemy_wizard(x: f64, y: f64) -> Unit {
        Unit::new(TARGET, UnitKind::Wizard, Faction::Hostile, Point::new(x, y), 35.0)
    }

    pub fn ally(x: f64, y: f64) -> Unit {
        Unit::new(ALLY, UnitKind::Wizard, Faction::Allied, Point::new(x, y), 35.0)
    }

    pub fn world(units: impl IntoIterator<Item = Unit>) -> WorldSnapshot {
        WorldBuilder::new(ME).unit(me()).units(units).build().unwrap()
    }

    /// History in which every unit has moved at its current velocity for a
    /// full ring of samples.
    pub fn settled(world: &WorldSnapshot) -> UnitHistory {
        let mut history = UnitHistory::new();
        let mut seen = world.clone();
        for tick in 0..10 {
            seen.tick = Tick(tick);
            history.observe(&seen);
        }
        history
    }

    pub fn solve(world: &WorldSnapshot, target: Target, kind: ProjectileKind) -> CastSolution {
        let rules = GameRules::default();
        let history = settled(world);
        CastSolver::new(&rules, world, &history).solve(target, kind, &TickBudget::unlimited()).unwrap()
    }

    /// The projectile, flying `flight_ticks`, ends up touching the target
    /// extrapolated by the same number of ticks.
    pub fn assert_intercepts(solution: &CastSolution, target: &Unit, kind: ProjectileKind) {
        let rules = GameRules::default();
        let spec = rules.projectile(kind);
        let direction = Point::from_angle(me().angle + solution.angle);
        let projectile = me().position + direction * (spec.speed * solution.flight_ticks);
        let unit = target.extrapolate(solution.flight_ticks);
        let gap = projectile.distance(unit);
        assert!(gap <= target.radius + spec.radius, "missed by {gap}");
    }
}

#[cfg(test)]
mod stationary {
    use std::f64::consts::PI;

    use tk_core::{Point, ProjectileKind, UnitId};
    use tk_world::{Faction, Target, Unit, UnitKind};

    use super::helpers::*;
    use crate::Rejection;

    #[test]
    fn target_dead_ahead() {
        let w = world([minion(1100.0, 1000.0, 0.0, 0.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(s.accepted);
        assert_eq!(s.angle, 0.0);
        assert!((s.min_distance - 100.0).abs() < 1e-9);
        assert_eq!(s.max_distance, f64::INFINITY);
        assert!((s.flight_ticks - 2.5).abs() < 1e-9);
        assert_eq!(s.intercept, Some(Point::new(1100.0, 1000.0)));
        assert_eq!(s.rejection, None);
    }

    #[test]
    fn fireball_caps_the_distance_and_spares_the_caster() {
        // The explosion would reach the caster; only other wizards count.
        let w = world([minion(1100.0, 1000.0, 0.0, 0.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::Fireball);
        assert!(s.accepted);
        assert!((s.max_distance - 100.0).abs() < 1e-9);
    }

    #[test]
    fn wide_bearing_is_out_of_cone() {
        let w = world([minion(1100.0, 1100.0, 0.0, 0.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(!s.accepted);
        assert_eq!(s.rejection, Some(Rejection::OutOfCone));
    }

    #[test]
    fn slightly_off_axis_is_clamped_and_still_hits() {
        let w = world([minion(1400.0, 1000.0 + 400.0 * (PI / 12.0).tan() + 20.0, 0.0, 0.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(s.accepted);
        assert!((s.angle - PI / 12.0).abs() < 1e-12);
    }

    #[test]
    fn behind_is_out_of_range() {
        let w = world([minion(900.0, 1000.0, 0.0, 0.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::OutOfRange));
    }

    #[test]
    fn too_far_is_out_of_range() {
        let w = world([minion(1600.0, 1000.0, 0.0, 0.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::OutOfRange));
    }

    #[test]
    fn frost_bolt_ignores_buildings() {
        let tower = Unit::new(TARGET, UnitKind::Building, Faction::Hostile, Point::new(1200.0, 1000.0), 50.0);
        let w = world([tower]);
        let s = solve(&w, Target::Building(TARGET), ProjectileKind::FrostBolt);
        assert_eq!(s.rejection, Some(Rejection::InvalidTarget));
        assert!(solve(&w, Target::Building(TARGET), ProjectileKind::MagicMissile).accepted);
    }

    #[test]
    fn no_target_and_bonus_are_invalid() {
        let bonus = Unit::new(UnitId(9), UnitKind::Bonus, Faction::Neutral, Point::new(1100.0, 1000.0), 20.0);
        let w = world([bonus]);
        assert_eq!(solve(&w, Target::None, ProjectileKind::Dart).rejection, Some(Rejection::InvalidTarget));
        assert_eq!(solve(&w, Target::Bonus(UnitId(9)), ProjectileKind::Dart).rejection, Some(Rejection::InvalidTarget));
    }
}

#[cfg(test)]
mod moving {
    use tk_core::ProjectileKind;
    use tk_world::Target;

    use super::helpers::*;
    use crate::Rejection;

    #[test]
    fn crossing_minion_is_led() {
        let target = minion(1300.0, 1060.0, 0.0, -3.0);
        let w = world([target.clone()]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(s.accepted);
        assert!(s.angle > 0.0 && s.angle < 0.2, "angle {}", s.angle);
        assert!((s.min_distance - 277.35).abs() < 0.5, "min {}", s.min_distance);
        assert_eq!(s.max_distance, f64::INFINITY);
        let intercept = s.intercept.unwrap();
        assert!(intercept.y < target.position.y);
        assert_intercepts(&s, &target, ProjectileKind::MagicMissile);
    }

    #[test]
    fn crossing_the_other_way_mirrors_the_angle() {
        let down = minion(1300.0, 1000.0, 0.0, -3.0);
        let up = minion(1300.0, 1000.0, 0.0, 3.0);
        let a = solve(&world([down.clone()]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        let b = solve(&world([up.clone()]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(a.accepted && b.accepted);
        assert!(a.angle < 0.0);
        assert!((a.angle + b.angle).abs() < 1e-9);
        assert_intercepts(&a, &down, ProjectileKind::MagicMissile);
        assert_intercepts(&b, &up, ProjectileKind::MagicMissile);
    }

    #[test]
    fn head_on_target_uses_closest_approach() {
        let target = minion(1300.0, 1000.0, -3.0, 0.0);
        let s = solve(&world([target.clone()]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(s.accepted);
        assert_eq!(s.angle, 0.0);
        assert!(s.flight_ticks > 6.5 && s.flight_ticks < 7.5, "flight {}", s.flight_ticks);
        assert_intercepts(&s, &target, ProjectileKind::MagicMissile);
    }

    #[test]
    fn runaway_beyond_range_has_no_intercept() {
        let target = minion(1520.0, 1000.0, 3.0, 0.0);
        let s = solve(&world([target]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::NoIntercept));
    }

    #[test]
    fn fireball_explodes_at_the_intercept() {
        let target = minion(1300.0, 1060.0, 0.0, -3.0);
        let s = solve(&world([target.clone()]), Target::Minion(TARGET), ProjectileKind::Fireball);
        assert!(s.accepted);
        let intercept = s.intercept.unwrap();
        assert!((s.max_distance - me().position.distance(intercept)).abs() < 1e-9);
        assert!(s.min_distance < s.max_distance);
    }
}

#[cfg(test)]
mod wizards {
    use tk_core::ProjectileKind;
    use tk_world::{StatusKind, Target};

    use super::helpers::*;
    use crate::Rejection;

    #[test]
    fn wizard_dead_ahead_is_shot() {
        let s = solve(&world([enemy_wizard(1300.0, 1000.0)]), Target::Wizard(TARGET), ProjectileKind::MagicMissile);
        assert!(s.accepted);
        assert!((s.min_distance - 300.0).abs() < 1e-9);
    }

    #[test]
    fn wizard_off_the_aim_line_is_skipped() {
        let s = solve(&world([enemy_wizard(1300.0, 1200.0)]), Target::Wizard(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::OutOfCone));
    }

    #[test]
    fn hastened_wizard_at_the_edge_can_dodge() {
        let plain = enemy_wizard(1499.0, 1000.0);
        let quick = plain.clone().with_status(StatusKind::Hastened, 50);
        assert!(solve(&world([plain]), Target::Wizard(TARGET), ProjectileKind::MagicMissile).accepted);
        let s = solve(&world([quick.clone()]), Target::Wizard(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::Dodgeable));

        // Still on cooldown when the missile lands: no dodge check.
        let busy = quick.with_cooldown(20);
        let s = solve(&world([busy]), Target::Wizard(TARGET), ProjectileKind::MagicMissile);
        assert!(s.accepted);
        assert!((s.min_distance - 499.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod friendly_fire {
    use tk_core::ProjectileKind;
    use tk_world::Target;

    use super::helpers::*;
    use crate::Rejection;

    #[test]
    fn ally_at_the_impact_blocks_the_shot() {
        let target = minion(1300.0, 1000.0, 0.0, 0.0);
        let blocked = solve(&world([target.clone(), ally(1300.0, 1040.0)]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(!blocked.accepted);
        assert_eq!(blocked.rejection, Some(Rejection::FriendlyFire));

        let clear = solve(&world([target, ally(1300.0, 1200.0)]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(clear.accepted);
    }

    #[test]
    fn explosion_radius_counts_for_fireballs_only() {
        let w = world([minion(1300.0, 1000.0, 0.0, 0.0), ally(1400.0, 1000.0)]);
        assert!(solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile).accepted);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::Fireball);
        assert_eq!(s.rejection, Some(Rejection::FriendlyFire));
    }

    #[test]
    fn ally_at_a_moving_intercept_blocks_the_shot() {
        let w = world([minion(1300.0, 1060.0, 0.0, -3.0), ally(1340.0, 1040.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::FriendlyFire));
    }

    #[test]
    fn ally_on_the_line_of_fire_blocks_the_shot() {
        let target = minion(1300.0, 1000.0, 0.0, 0.0);
        let blocked = solve(&world([target.clone(), ally(1150.0, 1000.0)]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(!blocked.accepted);
        assert_eq!(blocked.rejection, Some(Rejection::FriendlyFire));

        let clear = solve(&world([target, ally(1150.0, 1200.0)]), Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert!(clear.accepted);
    }

    #[test]
    fn ally_grazing_the_missile_track_blocks_it() {
        let w = world([minion(1300.0, 1000.0, 0.0, 0.0), ally(1150.0, 1030.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::MagicMissile);
        assert_eq!(s.rejection, Some(Rejection::FriendlyFire));
    }

    #[test]
    fn ally_beside_the_line_only_raises_the_shadow() {
        let w = world([minion(1300.0, 1000.0, 0.0, 0.0), ally(1150.0, 1080.0)]);
        let s = solve(&w, Target::Minion(TARGET), ProjectileKind::Fireball);
        assert!(s.accepted);
        assert!(s.ally_shadow > 0.5 && s.ally_shadow < 0.7, "shadow {}", s.ally_shadow);

        let lone = solve(&world([minion(1300.0, 1000.0, 0.0, 0.0)]), Target::Minion(TARGET), ProjectileKind::Fireball);
        assert_eq!(lone.ally_shadow, 0.0);
    }
}

#[cfg(test)]
mod shadow {
    use tk_core::{Circle, Point};

    use crate::tangent_shadow;

    fn ally() -> Circle {
        Circle::new(Point::new(100.0, 0.0), 35.0)
    }

    #[test]
    fn axis_is_full_shadow() {
        let s = tangent_shadow(Point::new(300.0, 0.0), Point::ZERO, &ally(), 10.0);
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn falls_off_towards_the_tangents() {
        let s = tangent_shadow(Point::new(300.0, 50.0), Point::ZERO, &ally(), 10.0);
        assert!(s > 0.6 && s < 0.75, "shadow {s}");
        let edge = tangent_shadow(Point::new(300.0, 130.0), Point::ZERO, &ally(), 10.0);
        assert!(edge < s);
    }

    #[test]
    fn outside_the_cone_is_clear() {
        assert_eq!(tangent_shadow(Point::new(300.0, 300.0), Point::ZERO, &ally(), 10.0), 0.0);
        assert_eq!(tangent_shadow(Point::new(-300.0, 0.0), Point::ZERO, &ally(), 10.0), 0.0);
    }

    #[test]
    fn between_target_and_ally_is_clear() {
        assert_eq!(tangent_shadow(Point::new(50.0, 0.0), Point::ZERO, &ally(), 10.0), 0.0);
    }

    #[test]
    fn blast_radius_widens_the_cone() {
        let shooter = Point::new(300.0, 160.0);
        assert_eq!(tangent_shadow(shooter, Point::ZERO, &ally(), 10.0), 0.0);
        assert!(tangent_shadow(shooter, Point::ZERO, &ally(), 50.0) > 0.0);
    }

    #[test]
    fn target_inside_the_grown_ally_is_full_shadow() {
        let near = Circle::new(Point::new(30.0, 0.0), 35.0);
        assert_eq!(tangent_shadow(Point::new(-500.0, 0.0), Point::ZERO, &near, 10.0), 1.0);
    }
}

#[cfg(test)]
mod budget {
    use std::time::Duration;

    use tk_core::{GameRules, ProjectileKind, TickBudget, UnitId};
    use tk_world::{Target, UnitHistory};

    use super::helpers::*;
    use crate::CastSolver;

    #[test]
    fn zero_budget_times_out() {
        let rules = GameRules::default();
        let w = world([minion(1300.0, 1060.0, 0.0, -3.0)]);
        let history = UnitHistory::new();
        let err = CastSolver::new(&rules, &w, &history)
            .solve(Target::Minion(TARGET), ProjectileKind::MagicMissile, &TickBudget::start(Duration::ZERO))
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn vanished_target_is_an_error() {
        let rules = GameRules::default();
        let w = world([]);
        let history = UnitHistory::new();
        let err = CastSolver::new(&rules, &w, &history)
            .solve(Target::Minion(UnitId(42)), ProjectileKind::MagicMissile, &TickBudget::unlimited())
            .unwrap_err();
        assert!(!err.is_timeout());
    }
}
