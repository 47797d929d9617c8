//! The per-tick decision: macro waypoint, local plan, movement, cast.

use tracing::{debug, trace, warn};

use tk_cast::CastSolver;
use tk_core::{GameRules, Point, TickBudget};
use tk_motion::{Bounds, MovementCursor, MovementState, realize};
use tk_path::{PlannerConfig, plan_for_agent};
use tk_route::{RouteError, RouteGraph, Router};
use tk_world::{Unit, WorldSnapshot};

use crate::allowance::{AllowanceConfig, Role, TimeAllowance};
use crate::command::{CastOrder, ControlCommand};
use crate::error::{TacticsError, TacticsResult};
use crate::objective::Objective;
use crate::observer::{Decision, DecisionObserver};
use crate::session::{RouteState, Session};

// ── ControllerConfig ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    pub planner:            PlannerConfig,
    pub allowance:          AllowanceConfig,
    /// Accepted shots with a higher tangent shadow are held.
    pub max_ally_shadow:    f64,
    /// Destinations closer than this are planned for directly, without the
    /// macro route.
    pub direct_range:       f64,
    /// How far the local target or look-at may move before the trajectory
    /// is rebuilt.
    pub retarget_tolerance: f64,
    /// Units unseen for longer are dropped from the session history.
    pub history_max_age:    u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            planner:            PlannerConfig::default(),
            allowance:          AllowanceConfig::default(),
            max_ally_shadow:    0.75,
            direct_range:       600.0,
            retarget_tolerance: 10.0,
            history_max_age:    30,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> TacticsResult<()> {
        self.planner.validate()?;
        self.allowance.validate()?;
        if !(0.0..=1.0).contains(&self.max_ally_shadow) {
            return Err(TacticsError::Config(format!(
                "max_ally_shadow must be in [0, 1], got {}",
                self.max_ally_shadow
            )));
        }
        if !(self.direct_range >= 0.0) || !(self.retarget_tolerance >= 0.0) {
            return Err(TacticsError::Config("direct_range and retarget_tolerance must be non-negative".into()));
        }
        Ok(())
    }
}

// ── TacticalController ───────────────────────────────────────────────────────

/// Turns an [`Objective`] and a snapshot into one tick's [`ControlCommand`].
///
/// The controller itself is immutable; everything that persists between
/// ticks lives in the caller's [`Session`].  Build one with
/// [`ControllerBuilder`](crate::ControllerBuilder).
pub struct TacticalController<R: Router> {
    pub(crate) rules:  GameRules,
    pub(crate) graph:  RouteGraph,
    pub(crate) router: R,
    pub(crate) config: ControllerConfig,
}

/// Outcome of the fallible part of a decision.
struct Planned {
    command:   ControlCommand,
    replanned: bool,
}

impl<R: Router> TacticalController<R> {
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn new_session(&self, role: Role) -> Session {
        Session::new(TimeAllowance::new(self.config.allowance.clone(), role, self.rules.tick_count))
    }

    /// Decide what the snapshot's agent does this tick.
    ///
    /// Running out of time is not an error: the plan is dropped, the observer
    /// hears about it, and the agent idles.  Any other failure is returned.
    pub fn decide<O: DecisionObserver>(
        &self,
        world:     &WorldSnapshot,
        objective: &Objective,
        session:   &mut Session,
        observer:  &mut O,
    ) -> TacticsResult<ControlCommand> {
        let agent = world.agent()?;
        let budget = session.allowance.budget(world.tick.0);
        let outcome = self.decide_within(world, agent, objective, session, &budget, observer);
        let elapsed = budget.elapsed();
        session.allowance.record(elapsed);

        let (planned, timed_out) = match outcome {
            Ok(planned) => (planned, false),
            Err(e) if e.is_timeout() => {
                warn!(tick = world.tick.0, error = %e, "decision timed out; idling");
                session.invalidate();
                session.timeouts += 1;
                observer.on_timeout(world.tick, &e);
                (Planned { command: ControlCommand::idle(), replanned: false }, true)
            }
            Err(e) => return Err(e),
        };

        session.decisions += 1;
        observer.on_decision(&Decision {
            tick:        world.tick,
            position:    agent.position,
            heading:     agent.angle,
            command:     planned.command,
            path_length: session.path.as_ref().map_or(0.0, |p| p.length()),
            replanned:   planned.replanned,
            timed_out,
            elapsed,
            limit:       budget.limit(),
        });
        Ok(planned.command)
    }

    fn decide_within<O: DecisionObserver>(
        &self,
        world:     &WorldSnapshot,
        agent:     &Unit,
        objective: &Objective,
        session:   &mut Session,
        budget:    &TickBudget,
        observer:  &mut O,
    ) -> TacticsResult<Planned> {
        budget.check("tactics.decide")?;
        session.history.observe(world);
        let forgotten = session.history.forget_stale(world.tick, self.config.history_max_age);
        if forgotten > 0 {
            trace!(forgotten, "history pruned");
        }

        let waypoint = self.waypoint(agent, objective.destination, session)?;
        let look_at = match objective.look_at {
            Some(point) => Some(point),
            None => world.resolve(objective.target)?.map(|u| u.position),
        };

        // ── Movement ─────────────────────────────────────────────────────
        let bounds = Bounds::for_unit(&self.rules, agent);
        let replanned = self.needs_replan(agent, waypoint, look_at, session, &bounds);
        if replanned {
            budget.check("tactics.replan")?;
            let path = plan_for_agent(world, &self.rules, waypoint, &self.config.planner, budget)?;
            let trajectory = realize(
                &path.points,
                look_at,
                &bounds,
                MovementState::new(0, agent.position, agent.angle),
            );
            observer.on_replan(world.tick, &path, &trajectory);
            debug!(
                tick = world.tick.0,
                points = path.len(),
                reached = path.reached,
                steps = trajectory.len(),
                "replanned"
            );
            session.cursor = Some(MovementCursor::new(trajectory));
            session.path = Some(path);
            session.waypoint = Some(waypoint);
            session.look_at = look_at;
            session.replans += 1;
        }
        let movement = session.cursor.as_mut().and_then(Iterator::next).unwrap_or_default();
        let mut command = ControlCommand::from_movement(movement);

        // ── Cast ─────────────────────────────────────────────────────────
        let ready = objective.target.is_some() && agent.remaining_action_cooldown == 0;
        if let Some(kind) = objective.projectile.filter(|_| ready) {
            let solution = CastSolver::new(&self.rules, world, &session.history).solve(objective.target, kind, budget)?;
            observer.on_cast(world.tick, &solution);
            if solution.accepted && solution.ally_shadow <= self.config.max_ally_shadow {
                command.cast = Some(CastOrder {
                    kind,
                    angle:        solution.angle,
                    min_distance: solution.min_distance,
                    max_distance: solution.max_distance,
                });
            } else if solution.accepted {
                debug!(shadow = solution.ally_shadow, "cast held: ally in the line of fire");
            }
        }

        Ok(Planned { command, replanned })
    }

    fn needs_replan(
        &self,
        agent:    &Unit,
        waypoint: Point,
        look_at:  Option<Point>,
        session:  &Session,
        bounds:   &Bounds,
    ) -> bool {
        let tolerance = self.config.retarget_tolerance;
        let Some(cursor) = &session.cursor else { return true };
        if cursor.is_exhausted() || cursor.has_drifted(agent.position, bounds) {
            return true;
        }
        if session.waypoint.is_none_or(|w| w.distance(waypoint) > tolerance) {
            return true;
        }
        match (session.look_at, look_at) {
            (None, None) => false,
            (Some(a), Some(b)) => a.distance(b) > tolerance,
            _ => true,
        }
    }

    // ── Macro leg ────────────────────────────────────────────────────────────

    /// Local target for this tick: the destination when it is close, else the
    /// macro waypoint being steered for.
    fn waypoint(&self, agent: &Unit, destination: Point, session: &mut Session) -> TacticsResult<Point> {
        if agent.position.distance(destination) <= self.config.direct_range {
            session.route = None;
            return Ok(destination);
        }

        let stale = session
            .route
            .as_ref()
            .is_none_or(|r| r.destination.distance(destination) > self.config.retarget_tolerance);
        if stale {
            session.route = Some(self.route(agent.position, destination)?);
        }
        let Some(route) = session.route.as_mut() else {
            return Ok(destination);
        };

        let advance = 0.5 * self.rules.wizard_vision_range;
        while let Some(&next) = route.nodes.get(route.next) {
            let to_next = agent.position.distance(next);
            let passed = to_next <= advance
                && (route.next == 0 || agent.position.distance(route.nodes[route.next - 1]) > to_next);
            if !passed {
                break;
            }
            route.next += 1;
        }
        Ok(route.nodes.get(route.next).copied().unwrap_or(destination))
    }

    fn route(&self, from: Point, to: Point) -> TacticsResult<RouteState> {
        let (Some(src), Some(dst)) = (self.graph.nearest_node(from), self.graph.nearest_node(to)) else {
            return Err(TacticsError::Config("route graph has no nodes".into()));
        };
        let path = self.router.route(&self.graph, src, dst)?;
        let nodes = path
            .nodes
            .iter()
            .map(|&n| self.graph.position(n))
            .collect::<Result<Vec<_>, RouteError>>()?;
        debug!(%src, %dst, hops = nodes.len(), length = path.length, "macro route");
        Ok(RouteState { destination: to, nodes, next: 0 })
    }
}
