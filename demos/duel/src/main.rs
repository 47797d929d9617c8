//! duel: end-to-end run of the tactical controller.
//!
//! One wizard crosses a copse toward a macro destination while hostile
//! minions walk into range.  Every tick the controller picks a waypoint,
//! replans when needed, replays its trajectory and shoots whatever it can
//! hit cleanly.  Pass a JSON scenario path to replace the built-in one.
//!
//! `RUST_LOG=tk_tactics=debug` shows replans and cast decisions.

mod arena;
mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use tk_output::{CsvTraceWriter, TraceObserver};
use tk_route::DijkstraRouter;
use tk_tactics::{ControllerBuilder, Objective, Role};
use tk_world::{Target, Unit, UnitKind};

use arena::Arena;
use scenario::Scenario;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64  = 42;
const OUTPUT_DIR: &str = "output/duel";
/// Distance at which the destination counts as reached.
const ARRIVAL:    f64  = 5.0;

// ── Objective ─────────────────────────────────────────────────────────────────

/// Shoot the closest hostile in vision, otherwise just walk.
fn choose_objective(scenario: &Scenario, arena: &Arena) -> Objective {
    let me = arena.me();
    let walk = Objective::move_to(scenario.destination);
    let vision = scenario.rules.wizard_vision_range;
    let closest = arena
        .hostiles()
        .map(|u| (u, u.position.distance(me.position)))
        .filter(|&(_, d)| d <= vision)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match closest.and_then(|(u, _)| target_of(u)) {
        Some(target) => walk.attack(target, scenario.projectile),
        None => walk,
    }
}

fn target_of(unit: &Unit) -> Option<Target> {
    match unit.kind {
        UnitKind::Minion => Some(Target::Minion(unit.id)),
        UnitKind::Wizard => Some(Target::Wizard(unit.id)),
        _ => None,
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Scenario.
    let scenario = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Scenario::load(&path)?,
        None => Scenario::built_in(SEED),
    };
    println!("=== duel: tactical controller ===");
    println!(
        "Ticks: {}  |  Units: {}  |  Start: {}  |  Destination: {}",
        scenario.ticks,
        scenario.units.len(),
        scenario.me.position,
        scenario.destination
    );
    println!();

    // 2. Controller.
    let controller = ControllerBuilder::new(DijkstraRouter)
        .rules(scenario.rules.clone())
        .config(scenario.controller.clone())
        .build()?;
    println!("Route graph: {} waypoints", controller.graph().node_count());
    let mut session = controller.new_session(Role::Leader);

    // 3. Trace output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = TraceObserver::new(CsvTraceWriter::new(Path::new(OUTPUT_DIR))?);

    // 4. Run.
    let mut arena = Arena::new(scenario.rules.clone(), scenario.me.clone(), scenario.units.clone());
    let mut arrived_at = None;
    let t0 = Instant::now();
    while arena.tick() < scenario.ticks {
        let world = arena.snapshot()?;
        let objective = choose_objective(&scenario, &arena);
        let command = controller.decide(&world, &objective, &mut session, &mut obs)?;
        arena.step(&command);

        if arrived_at.is_none() && arena.me().position.distance(scenario.destination) <= ARRIVAL {
            arrived_at = Some(arena.tick());
            info!(tick = arena.tick(), "destination reached");
        }
    }
    let elapsed = t0.elapsed();
    obs.finish()?;

    // 5. Summary.
    let (decisions, casts) = obs.counts();
    let me = arena.me();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  decisions.csv : {decisions} rows");
    println!("  casts.csv     : {casts} rows");
    println!();
    println!("{:<22} {}", "Replans", session.replans());
    println!("{:<22} {}", "Timeouts", session.timeouts());
    println!("{:<22} {:.1} ms", "Decision time", session.allowance().spent().as_secs_f64() * 1000.0);
    println!("{:<22} {}", "Projectiles fired", arena.casts);
    println!("{:<22} {}", "Hits", arena.hits);
    println!("{:<22} {}", "Kills", arena.kills);
    println!("{:<22} {}", "Final position", me.position);
    println!("{:<22} {:.1}", "Distance to go", me.position.distance(scenario.destination));
    match arrived_at {
        Some(tick) => println!("{:<22} {tick}", "Arrived at tick"),
        None => println!("{:<22} no", "Arrived"),
    }

    Ok(())
}
