//! Unit tests for tk-world.

#[cfg(test)]
mod helpers {
    use tk_core::{Point, UnitId};

    use crate::{Faction, Unit, UnitKind};

    pub fn wizard(id: u64, faction: Faction, x: f64, y: f64) -> Unit {
        Unit::new(UnitId(id), UnitKind::Wizard, faction, Point::new(x, y), 35.0)
    }

    pub fn tree(id: u64, x: f64, y: f64) -> Unit {
        Unit::new(UnitId(id), UnitKind::Tree, Faction::Neutral, Point::new(x, y), 20.0)
    }

    pub fn minion(id: u64, faction: Faction, x: f64, y: f64) -> Unit {
        Unit::new(UnitId(id), UnitKind::Minion, faction, Point::new(x, y), 25.0)
    }
}

#[cfg(test)]
mod builder {
    use tk_core::{Point, Tick, UnitId};

    use super::helpers::*;
    use crate::{Faction, Unit, UnitKind, WorldBuilder, WorldError};

    #[test]
    fn builds_and_indexes() {
        let world = WorldBuilder::new(UnitId(1))
            .tick(Tick(7))
            .unit(wizard(1, Faction::Allied, 100.0, 100.0))
            .unit(tree(2, 200.0, 200.0))
            .build()
            .unwrap();
        assert_eq!(world.tick, Tick(7));
        assert_eq!(world.len(), 2);
        assert_eq!(world.get(UnitId(2)).unwrap().kind, UnitKind::Tree);
        assert!(world.get(UnitId(3)).is_none());
    }

    #[test]
    fn missing_agent_is_rejected() {
        let err = WorldBuilder::new(UnitId(1)).unit(tree(2, 0.0, 0.0)).build().unwrap_err();
        assert!(matches!(err, WorldError::MissingAgent(UnitId(1))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = WorldBuilder::new(UnitId(1))
            .unit(wizard(1, Faction::Allied, 0.0, 0.0))
            .unit(tree(1, 5.0, 5.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, WorldError::DuplicateUnit(UnitId(1))));
    }

    #[test]
    fn agent_must_be_a_wizard() {
        let err = WorldBuilder::new(UnitId(1))
            .unit(Unit::new(UnitId(1), UnitKind::Minion, Faction::Allied, Point::ZERO, 25.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, WorldError::KindMismatch { expected: "wizard", found: "minion", .. }));
    }
}

#[cfg(test)]
mod snapshot {
    use tk_core::{Point, ProjectileKind, UnitId};

    use super::helpers::*;
    use crate::{Faction, Target, Unit, UnitKind, WorldBuilder, WorldError, WorldSnapshot};

    fn world() -> WorldSnapshot {
        WorldBuilder::new(UnitId(1))
            .unit(wizard(1, Faction::Allied, 1000.0, 1000.0))
            .unit(wizard(2, Faction::Allied, 1100.0, 1000.0))
            .unit(wizard(3, Faction::Hostile, 1400.0, 1000.0))
            .unit(minion(4, Faction::Hostile, 1300.0, 1000.0))
            .unit(tree(5, 1200.0, 1200.0))
            .unit(
                Unit::new(UnitId(6), UnitKind::Projectile(ProjectileKind::MagicMissile), Faction::Allied, Point::new(1010.0, 1000.0), 10.0)
                    .with_owner(UnitId(1)),
            )
            .unit(
                Unit::new(UnitId(7), UnitKind::Projectile(ProjectileKind::FrostBolt), Faction::Hostile, Point::new(1350.0, 1000.0), 15.0)
                    .with_owner(UnitId(3)),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn resolve_checks_kind() {
        let w = world();
        assert_eq!(w.resolve(Target::Minion(UnitId(4))).unwrap().unwrap().id, UnitId(4));
        assert!(w.resolve(Target::None).unwrap().is_none());
        assert!(matches!(
            w.resolve(Target::Wizard(UnitId(4))),
            Err(WorldError::KindMismatch { expected: "wizard", found: "minion", .. })
        ));
        assert!(matches!(w.resolve(Target::Tree(UnitId(99))), Err(WorldError::UnknownUnit(UnitId(99)))));
    }

    #[test]
    fn allies_exclude_self_and_enemies() {
        let w = world();
        let allies: Vec<_> = w.allied_wizards().map(|u| u.id).collect();
        assert_eq!(allies, vec![UnitId(2)]);
    }

    #[test]
    fn moving_obstacles_skip_own_projectiles() {
        let w = world();
        let ids: Vec<_> = w.moving_obstacles().map(|u| u.id).collect();
        assert_eq!(ids, vec![UnitId(2), UnitId(3), UnitId(4), UnitId(7)]);
        assert_eq!(w.static_obstacles().count(), 1);
    }
}

#[cfg(test)]
mod target {
    use tk_core::UnitId;

    use crate::{Target, UnitKind};

    #[test]
    fn tag_matching() {
        assert!(Target::Building(UnitId(3)).matches(UnitKind::Building));
        assert!(!Target::Building(UnitId(3)).matches(UnitKind::Tree));
        assert!(!Target::None.matches(UnitKind::Wizard));
        assert_eq!(Target::None.id(), None);
        assert_eq!(Target::Wizard(UnitId(8)).to_string(), "wizard#8");
    }
}

#[cfg(test)]
mod history {
    use tk_core::{Point, Tick, UnitId};

    use super::helpers::*;
    use crate::{Faction, UnitHistory};

    #[test]
    fn mean_over_full_ring() {
        let mut history = UnitHistory::new();
        let m = minion(4, Faction::Hostile, 0.0, 0.0).with_velocity(Point::new(3.0, 0.0));
        for t in 0..10 {
            history.record(&m, Tick(t));
        }
        assert_eq!(history.mean_velocity(UnitId(4)), Point::new(3.0, 0.0));
    }

    #[test]
    fn first_sighting_counts_once() {
        let mut history = UnitHistory::new();
        let m = minion(4, Faction::Hostile, 0.0, 0.0).with_velocity(Point::new(0.0, 5.0));
        history.record(&m, Tick(100));
        assert_eq!(history.mean_velocity(UnitId(4)), Point::new(0.0, 0.5));
        assert_eq!(history.get(UnitId(4)).unwrap().first_seen(), Tick(100));
    }

    #[test]
    fn gaps_count_as_standing_still() {
        let mut history = UnitHistory::new();
        let m = minion(4, Faction::Hostile, 0.0, 0.0).with_velocity(Point::new(2.0, 0.0));
        for t in 0..10 {
            history.record(&m, Tick(t));
        }
        // Unseen for ticks 10..=13, seen again at 14.
        history.record(&m, Tick(14));
        // Ring: [14] + four zeros + five older samples.
        assert_eq!(history.mean_velocity(UnitId(4)), Point::new(1.2, 0.0));
    }

    #[test]
    fn long_absence_clears_ring() {
        let mut history = UnitHistory::new();
        let moving = minion(4, Faction::Hostile, 0.0, 0.0).with_velocity(Point::new(2.0, 0.0));
        for t in 0..10 {
            history.record(&moving, Tick(t));
        }
        let still = minion(4, Faction::Hostile, 0.0, 0.0);
        history.record(&still, Tick(500));
        assert_eq!(history.mean_velocity(UnitId(4)), Point::ZERO);
        assert_eq!(history.get(UnitId(4)).unwrap().last_activity(), Some(Tick(9)));
    }

    #[test]
    fn unknown_unit_is_still() {
        assert_eq!(UnitHistory::new().mean_velocity(UnitId(1)), Point::ZERO);
    }

    #[test]
    fn forget_stale() {
        let mut history = UnitHistory::new();
        history.record(&tree(1, 0.0, 0.0), Tick(10));
        history.record(&tree(2, 0.0, 0.0), Tick(100));
        assert_eq!(history.forget_stale(Tick(120), 50), 1);
        assert_eq!(history.len(), 1);
        assert!(history.get(UnitId(2)).is_some());
    }
}
