//! Moving obstacles and the per-search caches built from them.
//!
//! A step of the search spans a tick interval `[t0, t1]`.  For that interval
//! each moving obstacle becomes a [`Barrier`]: its circle at `t0` plus the
//! centre it will have reached at `t1`.  Many steps share the same interval
//! (every diagonal step from a node has the same length), so barriers are
//! computed once per distinct interval and reused for the rest of the search.

use rustc_hash::FxHashMap;

use tk_core::{Circle, Point};

/// A circle moving with constant velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovingObstacle {
    pub circle:   Circle,
    /// Displacement per tick.
    pub velocity: Point,
}

impl MovingObstacle {
    pub fn new(circle: Circle, velocity: Point) -> Self {
        Self { circle, velocity }
    }

    #[inline]
    pub fn position_at(&self, tick: f64) -> Point {
        self.circle.position + self.velocity * tick
    }

    #[inline]
    pub fn circle_at(&self, tick: f64) -> Circle {
        self.circle.moved_to(self.position_at(tick))
    }
}

/// A moving obstacle swept over one tick interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barrier {
    pub circle: Circle,
    pub end:    Point,
}

impl Barrier {
    /// `true` if an agent circle moving to `agent_end` over the same interval
    /// may touch this barrier.
    #[inline]
    pub fn blocks(&self, agent: &Circle, agent_end: Point) -> bool {
        self.circle.has_intersection_both_moving(self.end, agent, agent_end)
    }
}

// ── Caches ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct BarrierCache {
    entries: FxHashMap<(u64, u64), Vec<Barrier>>,
}

impl BarrierCache {
    pub(crate) fn get(&mut self, obstacles: &[MovingObstacle], t0: f64, t1: f64) -> &[Barrier] {
        self.entries.entry((t0.to_bits(), t1.to_bits())).or_insert_with(|| {
            obstacles
                .iter()
                .map(|o| Barrier { circle: o.circle_at(t0), end: o.position_at(t1) })
                .collect()
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// What sits on the target at a given tick.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Occupancy {
    pub occupier:  Option<Circle>,
    /// Distance from the target at which the goal counts as reached.
    pub max_error: f64,
}

#[derive(Default)]
pub(crate) struct OccupancyCache {
    entries: FxHashMap<u64, Occupancy>,
}

impl OccupancyCache {
    /// The first static obstacle covering `target`, else the first moving one
    /// whose position at `tick` covers it.
    pub(crate) fn get(
        &mut self,
        statics: &[Circle],
        moving: &[MovingObstacle],
        target: Point,
        agent_radius: f64,
        step_size: f64,
        tick: f64,
    ) -> Occupancy {
        *self.entries.entry(tick.to_bits()).or_insert_with(|| {
            let covers = |c: &Circle| c.position.distance(target) <= c.radius + agent_radius;
            let occupier = statics
                .iter()
                .copied()
                .find(|c| covers(c))
                .or_else(|| moving.iter().map(|o| o.circle_at(tick)).find(|c| covers(c)));
            let max_error = match occupier {
                Some(c) => c.radius + agent_radius + step_size,
                None => step_size,
            };
            Occupancy { occupier, max_error }
        })
    }
}
