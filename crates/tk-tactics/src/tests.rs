//! Unit tests for tk-tactics.

#[cfg(test)]
mod helpers {
    use std::time::Duration;

    use tk_cast::CastSolution;
    use tk_core::{Point, Tick, UnitId};
    use tk_motion::Trajectory;
    use tk_path::LocalPath;
    use tk_route::DijkstraRouter;
    use tk_world::{Faction, Unit, UnitKind, WorldBuilder, WorldSnapshot};

    use crate::{
        AllowanceConfig, ControllerBuilder, ControllerConfig, Decision, DecisionObserver, TacticalController,
        TacticsError,
    };

    pub const ME: UnitId = UnitId(1);
    pub const TARGET: UnitId = UnitId(2);
    pub const ALLY: UnitId = UnitId(3);

    pub fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    pub fn me_at(x: f64, y: f64, angle: f64) -> Unit {
        Unit::new(ME, UnitKind::Wizard, Faction::Allied, p(x, y), 35.0).with_angle(angle)
    }

    pub fn minion(x: f64, y: f64) -> Unit {
        Unit::new(TARGET, UnitKind::Minion, Faction::Hostile, p(x, y), 25.0)
    }

    pub fn ally(x: f64, y: f64) -> Unit {
        Unit::new(ALLY, UnitKind::Wizard, Faction::Allied, p(x, y), 35.0)
    }

    pub fn world(tick: u64, units: impl IntoIterator<Item = Unit>) -> WorldSnapshot {
        WorldBuilder::new(ME).tick(Tick(tick)).units(units).build().unwrap()
    }

    /// An allowance no test decision can exhaust.
    pub fn roomy() -> ControllerConfig {
        ControllerConfig {
            allowance: AllowanceConfig {
                initial: Duration::from_secs(1000),
                leader_per_tick: Duration::from_secs(1),
                follower_per_tick: Duration::from_secs(1),
                ..AllowanceConfig::default()
            },
            ..ControllerConfig::default()
        }
    }

    pub fn controller_with(config: ControllerConfig) -> TacticalController<DijkstraRouter> {
        ControllerBuilder::new(DijkstraRouter).config(config).build().unwrap()
    }

    pub fn controller() -> TacticalController<DijkstraRouter> {
        controller_with(roomy())
    }

    #[derive(Default)]
    pub struct Recorder {
        pub replans:   usize,
        pub casts:     Vec<CastSolution>,
        pub timeouts:  usize,
        pub decisions: Vec<Decision>,
    }

    impl DecisionObserver for Recorder {
        fn on_replan(&mut self, _tick: Tick, _path: &LocalPath, _trajectory: &Trajectory) {
            self.replans += 1;
        }

        fn on_cast(&mut self, _tick: Tick, solution: &CastSolution) {
            self.casts.push(*solution);
        }

        fn on_timeout(&mut self, _tick: Tick, error: &TacticsError) {
            assert!(error.is_timeout());
            self.timeouts += 1;
        }

        fn on_decision(&mut self, decision: &Decision) {
            self.decisions.push(decision.clone());
        }
    }
}

// ── TimeAllowance ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod allowance {
    use std::time::Duration;

    use crate::{AllowanceConfig, Role, TimeAllowance};

    fn ms(d: Duration) -> f64 {
        d.as_secs_f64() * 1000.0
    }

    #[test]
    fn first_tick_gets_a_fair_share() {
        let leader = TimeAllowance::new(AllowanceConfig::default(), Role::Leader, 20_000);
        assert!((ms(leader.limit(0)) - 18.45).abs() < 1e-6, "{:?}", leader.limit(0));

        let follower = TimeAllowance::new(AllowanceConfig::default(), Role::Follower, 20_000);
        assert!((ms(follower.limit(0)) - 9.45).abs() < 1e-6, "{:?}", follower.limit(0));
    }

    #[test]
    fn full_grows_by_the_role_increment() {
        let a = TimeAllowance::new(AllowanceConfig::default(), Role::Leader, 20_000);
        assert_eq!(a.full(0), Duration::from_secs(10));
        assert_eq!(a.full(100), Duration::from_secs(12));
    }

    #[test]
    fn overspending_leaves_nothing() {
        let mut a = TimeAllowance::new(AllowanceConfig::default(), Role::Follower, 20_000);
        a.record(Duration::from_secs(11));
        assert_eq!(a.spent(), Duration::from_secs(11));
        assert_eq!(a.limit(0), Duration::ZERO);
        // Ten seconds later at 10 ms a tick the pool has refilled.
        assert!(a.limit(1000) > Duration::ZERO);
    }

    #[test]
    fn last_tick_may_use_the_remainder() {
        let a = TimeAllowance::new(AllowanceConfig::default(), Role::Leader, 100);
        let limit = a.limit(100);
        assert!((limit.as_secs_f64() - 12.0 * 0.9).abs() < 1e-9, "{limit:?}");
    }

    #[test]
    fn safety_factor_is_validated() {
        let bad = AllowanceConfig { safety_factor: 0.0, ..AllowanceConfig::default() };
        assert!(bad.validate().is_err());
        assert!(AllowanceConfig::default().validate().is_ok());
    }
}

// ── Builder / config ──────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tk_core::GameRules;
    use tk_route::DijkstraRouter;

    use crate::{ControllerBuilder, ControllerConfig, TacticsError};

    #[test]
    fn defaults_build() {
        let c = ControllerBuilder::new(DijkstraRouter).build().unwrap();
        assert_eq!(c.graph().node_count(), 52);
        assert_eq!(c.rules(), &GameRules::default());
    }

    #[test]
    fn shadow_threshold_out_of_range_is_rejected() {
        let config = ControllerConfig { max_ally_shadow: 1.5, ..ControllerConfig::default() };
        let err = ControllerBuilder::new(DijkstraRouter).config(config).build().err().unwrap();
        assert!(matches!(err, TacticsError::Config(_)));
    }

    #[test]
    fn planner_config_is_checked() {
        let mut config = ControllerConfig::default();
        config.planner.step_size = 0;
        let err = ControllerBuilder::new(DijkstraRouter).config(config).build().err().unwrap();
        assert!(matches!(err, TacticsError::Core(_)));
    }

    #[test]
    fn bad_rules_are_rejected() {
        let rules = GameRules { map_size: 0.0, ..GameRules::default() };
        assert!(ControllerBuilder::new(DijkstraRouter).rules(rules).build().is_err());
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use crate::{ControlCommand, NoopObserver, Objective, Role};

    use super::helpers::*;

    #[test]
    fn open_field_walks_straight_at_full_speed() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let mut rec = Recorder::default();
        let objective = Objective::move_to(p(1200.0, 1000.0));

        let command = c.decide(&world(0, [me_at(1000.0, 1000.0, 0.0)]), &objective, &mut session, &mut rec).unwrap();
        assert_eq!(command, ControlCommand { speed: 4.0, strafe: 0.0, turn: 0.0, cast: None });
        assert_eq!(session.path().unwrap().points, vec![p(1000.0, 1000.0), p(1200.0, 1000.0)]);
        assert_eq!(session.waypoint(), Some(p(1200.0, 1000.0)));
        assert_eq!(session.replans(), 1);
        assert_eq!(rec.replans, 1);
        assert_eq!(rec.decisions.len(), 1);
        assert!(rec.decisions[0].replanned);
        assert!(!rec.decisions[0].timed_out);
        assert!((rec.decisions[0].path_length - 200.0).abs() < 1e-9);
    }

    #[test]
    fn following_the_trajectory_does_not_replan() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let objective = Objective::move_to(p(1200.0, 1000.0));
        c.decide(&world(0, [me_at(1000.0, 1000.0, 0.0)]), &objective, &mut session, &mut NoopObserver).unwrap();

        let expected = *session.cursor().unwrap().expected_state();
        let me = me_at(expected.position.x, expected.position.y, expected.angle);
        let command = c.decide(&world(1, [me]), &objective, &mut session, &mut NoopObserver).unwrap();
        assert_eq!(session.replans(), 1);
        assert_eq!(session.decisions(), 2);
        assert_eq!(command.speed, 4.0);
        assert_eq!(session.cursor().unwrap().index(), 2);
    }

    #[test]
    fn drift_forces_a_replan() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let objective = Objective::move_to(p(1200.0, 1000.0));
        c.decide(&world(0, [me_at(1000.0, 1000.0, 0.0)]), &objective, &mut session, &mut NoopObserver).unwrap();

        c.decide(&world(1, [me_at(1050.0, 1000.0, 0.0)]), &objective, &mut session, &mut NoopObserver).unwrap();
        assert_eq!(session.replans(), 2);
        assert_eq!(session.path().unwrap().start(), Some(p(1050.0, 1000.0)));
    }

    #[test]
    fn new_destination_forces_a_replan() {
        let c = controller();
        let mut session = c.new_session(Role::Follower);
        c.decide(
            &world(0, [me_at(1000.0, 1000.0, 0.0)]),
            &Objective::move_to(p(1200.0, 1000.0)),
            &mut session,
            &mut NoopObserver,
        )
        .unwrap();

        let expected = *session.cursor().unwrap().expected_state();
        let me = me_at(expected.position.x, expected.position.y, expected.angle);
        c.decide(&world(1, [me]), &Objective::move_to(p(1000.0, 1300.0)), &mut session, &mut NoopObserver).unwrap();
        assert_eq!(session.replans(), 2);
        assert_eq!(session.waypoint(), Some(p(1000.0, 1300.0)));
    }

    #[test]
    fn small_destination_jitter_keeps_the_plan() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        c.decide(
            &world(0, [me_at(1000.0, 1000.0, 0.0)]),
            &Objective::move_to(p(1200.0, 1000.0)),
            &mut session,
            &mut NoopObserver,
        )
        .unwrap();

        let expected = *session.cursor().unwrap().expected_state();
        let me = me_at(expected.position.x, expected.position.y, expected.angle);
        c.decide(&world(1, [me]), &Objective::move_to(p(1203.0, 1000.0)), &mut session, &mut NoopObserver).unwrap();
        assert_eq!(session.replans(), 1);
    }

    #[test]
    fn invalidate_drops_the_plan() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let objective = Objective::move_to(p(1200.0, 1000.0));
        c.decide(&world(0, [me_at(1000.0, 1000.0, 0.0)]), &objective, &mut session, &mut NoopObserver).unwrap();
        session.invalidate();
        assert!(session.cursor().is_none());
        assert!(session.path().is_none());
        assert!(session.waypoint().is_none());
    }
}

// ── Macro route ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use crate::{NoopObserver, Objective, Role};

    use super::helpers::*;

    #[test]
    fn far_destination_steers_for_a_waypoint() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let start = p(1000.0, 1000.0);
        let destination = p(3800.0, 3800.0);
        c.decide(&world(0, [me_at(start.x, start.y, 0.0)]), &Objective::move_to(destination), &mut session, &mut NoopObserver)
            .unwrap();

        let ahead = session.route_ahead();
        assert!(!ahead.is_empty());
        let waypoint = session.waypoint().unwrap();
        assert_eq!(waypoint, ahead[0]);
        assert!(c.graph().nodes().any(|(_, position)| position == waypoint));
        assert!(waypoint.distance(destination) < start.distance(destination));
        assert!(waypoint.distance(start) > 0.5 * c.rules().wizard_vision_range);

        let last_node = c.graph().nearest_node(destination).unwrap();
        assert_eq!(ahead.last().copied(), Some(c.graph().position(last_node).unwrap()));
        assert_eq!(session.path().unwrap().end(), Some(waypoint));
    }

    #[test]
    fn close_destination_skips_the_route() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let destination = p(3800.0, 3800.0);
        c.decide(&world(0, [me_at(3500.0, 3500.0, 0.0)]), &Objective::move_to(destination), &mut session, &mut NoopObserver)
            .unwrap();
        assert!(session.route_ahead().is_empty());
        assert_eq!(session.waypoint(), Some(destination));
    }
}

// ── Casting ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cast {
    use tk_core::{ProjectileKind, UnitId};
    use tk_world::Target;

    use crate::{ControllerConfig, Objective, Role, TacticsError};

    use super::helpers::*;

    fn attack() -> Objective {
        Objective::move_to(p(1000.0, 1000.0)).attack(Target::Minion(TARGET), ProjectileKind::MagicMissile)
    }

    fn fireball() -> Objective {
        Objective::move_to(p(1000.0, 1000.0)).attack(Target::Minion(TARGET), ProjectileKind::Fireball)
    }

    #[test]
    fn stationary_minion_ahead_is_shot() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let mut rec = Recorder::default();
        let units = [me_at(1000.0, 1000.0, 0.0), minion(1300.0, 1000.0)];
        let command = c.decide(&world(0, units), &attack(), &mut session, &mut rec).unwrap();

        assert_eq!(command.speed, 0.0);
        assert_eq!(command.strafe, 0.0);
        assert_eq!(command.turn, 0.0);
        let order = command.cast.unwrap();
        assert_eq!(order.kind, ProjectileKind::MagicMissile);
        assert!(order.angle.abs() < 1e-9);
        assert!((order.min_distance - 300.0).abs() < 1e-6);
        assert_eq!(rec.casts.len(), 1);
    }

    #[test]
    fn ally_shadow_above_threshold_holds_fire() {
        let c = controller_with(ControllerConfig { max_ally_shadow: 0.3, ..roomy() });
        let mut session = c.new_session(Role::Leader);
        let mut rec = Recorder::default();
        let units = [me_at(1000.0, 1000.0, 0.0), minion(1300.0, 1000.0), ally(1150.0, 1080.0)];
        let command = c.decide(&world(0, units), &fireball(), &mut session, &mut rec).unwrap();

        assert!(command.cast.is_none());
        assert_eq!(rec.casts.len(), 1);
        assert!(rec.casts[0].accepted);
        assert!(rec.casts[0].ally_shadow > 0.3);
    }

    #[test]
    fn default_threshold_tolerates_a_grazing_ally() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let units = [me_at(1000.0, 1000.0, 0.0), minion(1300.0, 1000.0), ally(1150.0, 1080.0)];
        let command = c.decide(&world(0, units), &fireball(), &mut session, &mut Recorder::default()).unwrap();
        assert!(command.cast.is_some());
    }

    #[test]
    fn cooldown_skips_the_solver() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let mut rec = Recorder::default();
        let units = [me_at(1000.0, 1000.0, 0.0).with_cooldown(5), minion(1300.0, 1000.0)];
        let command = c.decide(&world(0, units), &attack(), &mut session, &mut rec).unwrap();
        assert!(command.cast.is_none());
        assert!(rec.casts.is_empty());
    }

    #[test]
    fn vanished_target_is_an_error() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let objective =
            Objective::move_to(p(1000.0, 1000.0)).attack(Target::Minion(UnitId(99)), ProjectileKind::MagicMissile);
        let err = c
            .decide(&world(0, [me_at(1000.0, 1000.0, 0.0)]), &objective, &mut session, &mut Recorder::default())
            .unwrap_err();
        assert!(matches!(err, TacticsError::World(_)));
        assert!(!err.is_timeout());
    }

    #[test]
    fn explicit_look_at_overrides_the_target() {
        let c = controller();
        let mut session = c.new_session(Role::Leader);
        let objective = attack().looking_at(p(1000.0, 1500.0));
        let units = [me_at(1000.0, 1000.0, 0.0), minion(1300.0, 1000.0)];
        let command = c.decide(&world(0, units), &objective, &mut session, &mut Recorder::default()).unwrap();
        assert!(command.turn > 0.0);
    }
}

// ── Timeouts ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeout {
    use std::time::Duration;

    use tk_core::CoreError;
    use tk_path::PathError;

    use crate::{AllowanceConfig, ControlCommand, ControllerConfig, Objective, Role, TacticsError};

    use super::helpers::*;

    #[test]
    fn empty_allowance_idles_and_reports() {
        let config = ControllerConfig {
            allowance: AllowanceConfig {
                initial: Duration::ZERO,
                leader_per_tick: Duration::ZERO,
                follower_per_tick: Duration::ZERO,
                ..AllowanceConfig::default()
            },
            ..ControllerConfig::default()
        };
        let c = controller_with(config);
        let mut session = c.new_session(Role::Follower);
        let mut rec = Recorder::default();
        let command = c
            .decide(&world(0, [me_at(1000.0, 1000.0, 0.0)]), &Objective::move_to(p(1200.0, 1000.0)), &mut session, &mut rec)
            .unwrap();

        assert_eq!(command, ControlCommand::idle());
        assert!(command.is_idle());
        assert_eq!(session.timeouts(), 1);
        assert!(session.cursor().is_none());
        assert_eq!(rec.timeouts, 1);
        assert_eq!(rec.decisions.len(), 1);
        assert!(rec.decisions[0].timed_out);
        assert_eq!(rec.decisions[0].limit, Duration::ZERO);
    }

    #[test]
    fn timeouts_are_recognised_through_wrappers() {
        let timeout = || CoreError::Timeout { site: "test", elapsed: Duration::from_millis(2), limit: Duration::from_millis(1) };
        assert!(TacticsError::from(timeout()).is_timeout());
        assert!(TacticsError::from(PathError::from(timeout())).is_timeout());
        assert!(!TacticsError::Config("x".into()).is_timeout());
    }
}
