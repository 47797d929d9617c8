//! Cross-tick memory of observed units.
//!
//! The snapshot only carries instantaneous velocities.  Units that jitter
//! (a minion stopping to attack, a wizard strafing back and forth) are better
//! described by an average, so every sighting pushes the current velocity into
//! a fixed ring of [`SPEED_SAMPLES`] slots.  Ticks on which the unit was not
//! seen count as standing still.

use rustc_hash::FxHashMap;

use tk_core::{Point, Tick, UnitId};

use crate::snapshot::WorldSnapshot;
use crate::unit::Unit;

/// Length of the velocity ring.
pub const SPEED_SAMPLES: usize = 10;

// ── UnitRecord ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct UnitRecord {
    first_seen:     Tick,
    last_seen:      Tick,
    first_position: Point,
    last_activity:  Option<Tick>,
    /// Newest sample first.
    speeds:         [Point; SPEED_SAMPLES],
}

impl UnitRecord {
    fn new(unit: &Unit, tick: Tick) -> Self {
        let mut speeds = [Point::ZERO; SPEED_SAMPLES];
        speeds[0] = unit.velocity;
        Self {
            first_seen:     tick,
            last_seen:      tick,
            first_position: unit.position,
            last_activity:  (unit.remaining_action_cooldown > 0).then_some(tick),
            speeds,
        }
    }

    fn update(&mut self, unit: &Unit, tick: Tick) {
        let shift = (tick.since(self.last_seen) as usize).min(SPEED_SAMPLES);
        if shift > 0 {
            self.speeds.rotate_right(shift);
            self.speeds[1..shift].fill(Point::ZERO);
        }
        self.speeds[0] = unit.velocity;
        self.last_seen = self.last_seen.max(tick);
        if unit.remaining_action_cooldown > 0 || unit.velocity != Point::ZERO {
            self.last_activity = Some(tick);
        }
    }

    pub fn first_seen(&self) -> Tick {
        self.first_seen
    }

    pub fn last_seen(&self) -> Tick {
        self.last_seen
    }

    pub fn first_position(&self) -> Point {
        self.first_position
    }

    /// Last tick the unit moved or was on cooldown.
    pub fn last_activity(&self) -> Option<Tick> {
        self.last_activity
    }

    /// Sum of the ring divided by its full length.
    pub fn mean_velocity(&self) -> Point {
        let sum = self.speeds.iter().fold(Point::ZERO, |acc, &v| acc + v);
        sum / SPEED_SAMPLES as f64
    }
}

// ── UnitHistory ───────────────────────────────────────────────────────────────

/// Per-unit records keyed by [`UnitId`].  Owned by the caller's session and
/// appended once per tick, before the decision for that tick.
#[derive(Clone, Debug, Default)]
pub struct UnitHistory {
    records: FxHashMap<UnitId, UnitRecord>,
}

impl UnitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every unit in `world` at `world.tick`.
    pub fn observe(&mut self, world: &WorldSnapshot) {
        for unit in world.units() {
            self.record(unit, world.tick);
        }
    }

    pub fn record(&mut self, unit: &Unit, tick: Tick) {
        self.records
            .entry(unit.id)
            .and_modify(|r| r.update(unit, tick))
            .or_insert_with(|| UnitRecord::new(unit, tick));
    }

    pub fn get(&self, id: UnitId) -> Option<&UnitRecord> {
        self.records.get(&id)
    }

    /// Mean velocity over the ring; zero for a never-seen unit.
    pub fn mean_velocity(&self, id: UnitId) -> Point {
        self.get(id).map_or(Point::ZERO, UnitRecord::mean_velocity)
    }

    /// Drop units last seen more than `max_age` ticks before `now`.
    /// Returns how many were removed.
    pub fn forget_stale(&mut self, now: Tick, max_age: u64) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| now.since(r.last_seen) <= max_age);
        before - self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
