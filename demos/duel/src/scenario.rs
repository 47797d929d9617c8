//! Scenario files and the built-in tree-field scenario.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use tk_core::{Circle, GameRules, Point, ProjectileKind, UnitId};
use tk_tactics::ControllerConfig;
use tk_world::{Faction, Unit, UnitKind};

fn default_ticks() -> u64 {
    600
}

/// Everything needed to run one duel.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub rules:       GameRules,
    #[serde(default)]
    pub controller:  ControllerConfig,
    #[serde(default = "default_ticks")]
    pub ticks:       u64,
    /// The controlled wizard.
    pub me:          Unit,
    pub destination: Point,
    #[serde(default)]
    pub projectile:  ProjectileKind,
    /// Every other unit on the map.
    #[serde(default)]
    pub units:       Vec<Unit>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let scenario = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(scenario)
    }

    /// A wizard crossing a random copse toward three minions walking the
    /// other way.
    pub fn built_in(seed: u64) -> Self {
        let rules = GameRules::default();
        let start = Point::new(600.0, 3400.0);
        let destination = Point::new(1800.0, 2200.0);
        let me = Unit::new(UnitId(1), UnitKind::Wizard, Faction::Allied, start, rules.wizard_radius)
            .with_angle(-std::f64::consts::FRAC_PI_4)
            .with_life(100);

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut units: Vec<Unit> = Vec::new();
        for attempt in 0..TREE_ATTEMPTS {
            if units.len() == TREE_COUNT {
                break;
            }
            let position = Point::new(rng.gen_range(700.0..1700.0), rng.gen_range(2300.0..3300.0));
            let tree = Circle::new(position, rng.gen_range(20.0..50.0));
            let clear = |p: Point| position.distance(p) > tree.radius + 2.0 * rules.wizard_radius;
            if clear(start) && clear(destination) && units.iter().all(|t| !t.circle().has_intersection(&tree)) {
                let id = UnitId(100 + attempt as u64);
                units.push(Unit::new(id, UnitKind::Tree, Faction::Neutral, position, tree.radius));
            }
        }

        for (i, offset) in [0.0, 60.0, 120.0].into_iter().enumerate() {
            let position = Point::new(2000.0 + offset, 2000.0 + offset);
            units.push(
                Unit::new(UnitId(10 + i as u64), UnitKind::Minion, Faction::Hostile, position, rules.minion_radius)
                    .with_velocity(Point::new(-1.5, 1.5))
                    .with_life(MINION_LIFE),
            );
        }

        Self {
            rules,
            controller: ControllerConfig::default(),
            ticks: default_ticks(),
            me,
            destination,
            projectile: ProjectileKind::MagicMissile,
            units,
        }
    }
}

const TREE_COUNT: usize = 25;
const TREE_ATTEMPTS: usize = 500;
const MINION_LIFE: i32 = 36;
