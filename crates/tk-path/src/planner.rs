//! Best-first search over a time-indexed grid.
//!
//! # Grid
//!
//! Search nodes are integer lattice points.  The lattice is shifted by the
//! fractional part of the start so the start node maps back to the exact
//! start; the node nearest the (shifted) target maps to the exact target.
//!
//! # Expansion
//!
//! Successor 0 jumps straight to the target node; successors 1..=8 are the
//! compass neighbours at `step_size`.  A step of length `l` advances the
//! arrival tick by `l / speed`.  Priority is the straight-line distance from
//! the successor to the target plus a proximity penalty, ties broken by
//! insertion order.  The accumulated path length is tracked separately and
//! only used to re-parent open nodes.
//!
//! # Termination
//!
//! A popped node within `max_error` of the target ends the search.  Running
//! out of iterations or tick horizon, or an empty heap, returns the path to
//! the lowest-priority node seen.  An exhausted [`TickBudget`] is an error.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use tk_core::{Circle, GameRules, GridPoint, Line, Point, TickBudget};
use tk_world::WorldSnapshot;

use crate::barrier::{BarrierCache, MovingObstacle, OccupancyCache};
use crate::config::PlannerConfig;
use crate::error::PathResult;
use crate::path::LocalPath;

/// Compass successors in expansion order, as multiples of `step_size`.
const COMPASS: [(i32, i32); 8] = [(1, 0), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1), (1, -1), (-1, 1)];

// ── PathRequest ──────────────────────────────────────────────────────────────

/// Everything one planning call needs to know about the world.
#[derive(Clone, Debug)]
pub struct PathRequest {
    pub start:    Point,
    pub target:   Point,
    /// Agent radius.
    pub radius:   f64,
    /// Mean travel speed used to convert path length into ticks.
    pub speed:    f64,
    pub map_size: f64,
    pub static_obstacles: Vec<Circle>,
    pub moving_obstacles: Vec<MovingObstacle>,
}

impl PathRequest {
    pub fn new(start: Point, radius: f64, target: Point, speed: f64, map_size: f64) -> Self {
        Self {
            start,
            target,
            radius,
            speed,
            map_size,
            static_obstacles: Vec::new(),
            moving_obstacles: Vec::new(),
        }
    }

    pub fn with_static(mut self, obstacle: Circle) -> Self {
        self.static_obstacles.push(obstacle);
        self
    }

    pub fn with_moving(mut self, obstacle: MovingObstacle) -> Self {
        self.moving_obstacles.push(obstacle);
        self
    }
}

// ── Entry points ─────────────────────────────────────────────────────────────

/// Plan a path for the snapshot's agent to `target`.
///
/// Buildings and trees are static obstacles.  Other wizards, minions and
/// projectiles not cast by the agent move at their current velocity.
pub fn plan_for_agent(
    world:  &WorldSnapshot,
    rules:  &GameRules,
    target: Point,
    config: &PlannerConfig,
    budget: &TickBudget,
) -> PathResult<LocalPath> {
    let agent = world.agent()?;
    let request = PathRequest {
        start:    agent.position,
        target,
        radius:   agent.radius,
        speed:    rules.wizard_mean_speed(agent.is_hastened()),
        map_size: rules.map_size,
        static_obstacles: world.static_obstacles().collect(),
        moving_obstacles: world
            .moving_obstacles()
            .map(|u| MovingObstacle::new(u.circle(), u.velocity))
            .collect(),
    };
    plan(&request, config, budget)
}

/// Plan a path from `request.start` to `request.target`.
///
/// Never fails for lack of a path: the best partial path comes back with
/// `reached == false`.  Fails only on an invalid config or when `budget`
/// runs out.
pub fn plan(request: &PathRequest, config: &PlannerConfig, budget: &TickBudget) -> PathResult<LocalPath> {
    config.validate()?;
    if request.start == request.target {
        return Ok(LocalPath::stay(request.start));
    }
    let mut search = Search::new(request, config);
    let path = search.run(budget)?;
    debug!(
        points = path.len(),
        length = path.length(),
        iterations = path.iterations,
        reached = path.reached,
        intervals = search.barriers.len(),
        "local path planned"
    );
    Ok(path)
}

// ── Grid ─────────────────────────────────────────────────────────────────────

struct Grid {
    start:       Point,
    target:      Point,
    shift:       Point,
    start_node:  GridPoint,
    target_node: GridPoint,
}

impl Grid {
    fn new(start: Point, target: Point) -> Self {
        let start_node = start.to_grid();
        let shift = start - start_node.to_point();
        let target_node = (target - shift).to_grid();
        Self { start, target, shift, start_node, target_node }
    }

    #[inline]
    fn world(&self, node: GridPoint) -> Point {
        if node == self.start_node {
            self.start
        } else if node == self.target_node {
            self.target
        } else {
            node.to_point() + self.shift
        }
    }
}

// ── Heap entry ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct Entry {
    priority: f64,
    seq:      u64,
    node:     GridPoint,
    tick:     f64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    /// Reversed so `BinaryHeap` pops the lowest priority, then the oldest.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── Search ───────────────────────────────────────────────────────────────────

struct Search<'a> {
    request:   &'a PathRequest,
    config:    &'a PlannerConfig,
    grid:      Grid,
    step:      f64,
    max_range: f64,
    statics:   Vec<Circle>,
    moving:    Vec<MovingObstacle>,
    barriers:  BarrierCache,
    occupancy: OccupancyCache,
}

impl<'a> Search<'a> {
    fn new(request: &'a PathRequest, config: &'a PlannerConfig) -> Self {
        let start = request.start;
        let distance = start.distance(request.target);
        let relevant = 2.0 * distance;
        let near = |c: &Circle| c.position.distance(start) - c.radius <= relevant;
        // A moving obstacle counts if any part of its track up to the tick
        // horizon comes near.
        let swept_near = |o: &MovingObstacle| {
            let track = Line::new(o.circle.position, o.position_at(config.max_ticks));
            segment_nearest(&track, start).distance(start) - o.circle.radius <= relevant
        };
        Self {
            request,
            config,
            grid: Grid::new(start, request.target),
            step: config.step_size as f64,
            max_range: distance + config.step_size as f64,
            statics: request.static_obstacles.iter().copied().filter(|c| near(c)).collect(),
            moving: request.moving_obstacles.iter().copied().filter(|o| swept_near(o)).collect(),
            barriers: BarrierCache::default(),
            occupancy: OccupancyCache::default(),
        }
    }

    fn run(&mut self, budget: &TickBudget) -> PathResult<LocalPath> {
        let start_node = self.grid.start_node;
        let target = self.request.target;

        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        heap.push(Entry { priority: self.request.start.distance(target), seq, node: start_node, tick: 0.0 });

        let mut came: FxHashMap<GridPoint, GridPoint> = FxHashMap::default();
        let mut cost: FxHashMap<GridPoint, f64> = FxHashMap::default();
        let mut opened: FxHashSet<GridPoint> = FxHashSet::default();
        let mut closed: FxHashSet<GridPoint> = FxHashSet::default();
        cost.insert(start_node, 0.0);
        opened.insert(start_node);

        let mut best = (f64::INFINITY, start_node);
        let mut finish: Option<GridPoint> = None;
        let mut reached = false;
        let mut snap = false;
        let mut iterations = 0usize;

        while let Some(entry) = heap.pop() {
            let node = entry.node;
            if closed.contains(&node) {
                continue;
            }
            budget.check("path.iteration")?;
            if entry.priority < best.0 {
                best = (entry.priority, node);
            }

            let occupancy = self.occupancy.get(
                &self.statics,
                &self.moving,
                target,
                self.request.radius,
                self.step,
                entry.tick,
            );
            if self.grid.world(node).distance(target) <= occupancy.max_error {
                trace!(%node, tick = entry.tick, occupied = occupancy.occupier.is_some(), "goal popped");
                finish = Some(node);
                reached = true;
                snap = occupancy.occupier.is_none();
                break;
            }

            iterations += 1;
            if iterations > self.config.max_iterations || entry.tick > self.config.max_ticks {
                finish = Some(best.1);
                break;
            }

            opened.remove(&node);
            closed.insert(node);
            let Some(&node_cost) = cost.get(&node) else {
                continue;
            };

            for i in 0..=COMPASS.len() {
                let shift = if i == 0 {
                    self.grid.target_node - node
                } else {
                    let (dx, dy) = COMPASS[i - 1];
                    GridPoint::new(dx * self.config.step_size, dy * self.config.step_size)
                };
                if shift == GridPoint::default() {
                    continue;
                }
                let next = node + shift;
                if closed.contains(&next) {
                    continue;
                }
                let length = shift.norm();
                let next_tick = entry.tick + length / self.request.speed;
                if self.blocked(node, next, entry.tick, next_tick) {
                    continue;
                }

                let path_cost = node_cost + length;
                if opened.contains(&next) {
                    if cost.get(&next).is_some_and(|&c| path_cost < c) {
                        cost.insert(next, path_cost);
                        came.insert(next, node);
                    }
                    continue;
                }

                budget.check("path.penalty")?;
                let penalty = self.penalty(node, next, entry.tick, next_tick);
                let distance = target.distance(self.grid.world(next));
                seq += 1;
                heap.push(Entry { priority: distance + penalty, seq, node: next, tick: next_tick });
                opened.insert(next);
                cost.insert(next, path_cost);
                came.insert(next, node);
            }
        }

        let finish = finish.unwrap_or(best.1);
        let mut points = vec![self.grid.world(finish)];
        let mut cur = finish;
        while let Some(&prev) = came.get(&cur) {
            points.push(self.grid.world(prev));
            cur = prev;
        }
        points.reverse();

        if snap && points.last() != Some(&target) {
            if points.len() == 1 {
                points.push(target);
            } else if let Some(last) = points.last_mut() {
                *last = target;
            }
        }

        Ok(LocalPath { points, reached, iterations })
    }

    /// Reject a step that leaves the search range, touches the map border,
    /// or sweeps through an obstacle.
    fn blocked(&mut self, from: GridPoint, to: GridPoint, t0: f64, t1: f64) -> bool {
        let begin = self.grid.world(from);
        let end = self.grid.world(to);
        if end.distance(self.request.start) > self.max_range && end.distance(self.request.target) > self.max_range {
            return true;
        }
        if Circle::new(end, self.request.radius).touches_border(self.request.map_size) {
            return true;
        }
        let me = Circle::new(begin, self.request.radius);
        if self.statics.iter().any(|c| c.has_intersection_moving(&me, end)) {
            return true;
        }
        self.barriers
            .get(&self.moving, t0, t1)
            .iter()
            .any(|b| b.blocks(&me, end))
    }

    /// `weight · (margin - clearance)` for the closest obstacle within
    /// `margin` of the step, zero otherwise.
    fn penalty(&mut self, from: GridPoint, to: GridPoint, t0: f64, t1: f64) -> f64 {
        let (margin, weight) = (self.config.proximity_margin, self.config.proximity_weight);
        if weight == 0.0 {
            return 0.0;
        }
        let begin = self.grid.world(from);
        let end = self.grid.world(to);
        let line = Line::new(begin, end);
        let radius = self.request.radius;

        let clearance =
            |center: Point, obstacle_radius: f64| segment_nearest(&line, center).distance(center) - obstacle_radius - radius;

        let mut penalty = 0.0f64;
        for c in &self.statics {
            let cl = clearance(c.position, c.radius);
            if cl < margin {
                penalty = penalty.max(weight * (margin - cl));
            }
        }
        for b in self.barriers.get(&self.moving, t0, t1) {
            let cl = clearance(b.end, b.circle.radius);
            if cl < margin {
                penalty = penalty.max(weight * (margin - cl));
            }
        }
        penalty
    }
}

/// Point of the segment closest to `point`.
fn segment_nearest(line: &Line, point: Point) -> Point {
    let nearest = line.nearest(point);
    if line.has_point(nearest) {
        nearest
    } else if line.begin.distance(point) < line.end.distance(point) {
        line.begin
    } else {
        line.end
    }
}
