//! `WorldSnapshot`: read-only view of every visible unit for one tick.

use rustc_hash::FxHashMap;

use tk_core::{Circle, Tick, UnitId};

use crate::error::{WorldError, WorldResult};
use crate::target::Target;
use crate::unit::{Unit, UnitKind};

/// Every unit visible on one tick plus the identity of the controlled agent.
///
/// Built through [`WorldBuilder`](crate::WorldBuilder), which guarantees the
/// agent is present and ids are unique.
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub me:   UnitId,
    pub(crate) units: Vec<Unit>,
    pub(crate) index: FxHashMap<UnitId, usize>,
}

impl WorldSnapshot {
    pub(crate) fn new(tick: Tick, me: UnitId, units: Vec<Unit>, index: FxHashMap<UnitId, usize>) -> Self {
        Self { tick, me, units, index }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.index.get(&id).map(|&i| &self.units[i])
    }

    /// The controlled unit.
    pub fn agent(&self) -> WorldResult<&Unit> {
        self.get(self.me).ok_or(WorldError::MissingAgent(self.me))
    }

    /// Look up `target` and check its kind matches the tag.
    ///
    /// `Ok(None)` for `Target::None`.  A unit that has left the snapshot is an
    /// `UnknownUnit` error; callers that tolerate disappearance check
    /// `contains` first.
    pub fn resolve(&self, target: Target) -> WorldResult<Option<&Unit>> {
        let Some(id) = target.id() else {
            return Ok(None);
        };
        let unit = self.get(id).ok_or(WorldError::UnknownUnit(id))?;
        if !target.matches(unit.kind) {
            return Err(WorldError::KindMismatch {
                id,
                expected: target.as_str(),
                found:    unit.kind.as_str(),
            });
        }
        Ok(Some(unit))
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn of_kind(&self, kind: UnitKind) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.kind == kind)
    }

    pub fn wizards(&self) -> impl Iterator<Item = &Unit> {
        self.of_kind(UnitKind::Wizard)
    }

    pub fn minions(&self) -> impl Iterator<Item = &Unit> {
        self.of_kind(UnitKind::Minion)
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_projectile())
    }

    /// Allied wizards other than the agent.
    pub fn allied_wizards(&self) -> impl Iterator<Item = &Unit> {
        let me = self.get(self.me);
        self.wizards()
            .filter(move |u| u.id != self.me && me.is_some_and(|m| m.is_ally_of(u)))
    }

    /// Footprints of buildings and trees.
    pub fn static_obstacles(&self) -> impl Iterator<Item = Circle> + '_ {
        self.units.iter().filter(|u| u.kind.is_static_obstacle()).map(Unit::circle)
    }

    /// Wizards other than the agent, minions, and projectiles not cast by the
    /// agent.
    pub fn moving_obstacles(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| {
            u.id != self.me
                && match u.kind {
                    UnitKind::Wizard | UnitKind::Minion => true,
                    UnitKind::Projectile(_) => u.owner != Some(self.me),
                    _ => false,
                }
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
