//! Fluent builder for a validated [`WorldSnapshot`].
//!
//! # Usage
//!
//! ```rust
//! use tk_core::{Point, Tick, UnitId};
//! use tk_world::{Faction, Unit, UnitKind, WorldBuilder};
//!
//! let me = UnitId(1);
//! let world = WorldBuilder::new(me)
//!     .tick(Tick(120))
//!     .unit(Unit::new(me, UnitKind::Wizard, Faction::Allied, Point::new(1000.0, 1000.0), 35.0))
//!     .unit(Unit::new(UnitId(9), UnitKind::Tree, Faction::Neutral, Point::new(1050.0, 1050.0), 5.0))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(world.len(), 2);
//! assert_eq!(world.agent().unwrap().id, me);
//! ```

use rustc_hash::FxHashMap;

use tk_core::{Tick, UnitId};

use crate::error::{WorldError, WorldResult};
use crate::snapshot::WorldSnapshot;
use crate::unit::{Unit, UnitKind};

pub struct WorldBuilder {
    tick:  Tick,
    me:    UnitId,
    units: Vec<Unit>,
}

impl WorldBuilder {
    /// Start a snapshot controlled by `me`.
    pub fn new(me: UnitId) -> Self {
        Self { tick: Tick::ZERO, me, units: Vec::new() }
    }

    pub fn tick(mut self, tick: Tick) -> Self {
        self.tick = tick;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.units.extend(units);
        self
    }

    /// Index the units and validate.
    ///
    /// # Errors
    ///
    /// - [`WorldError::DuplicateUnit`] if two units share an id.
    /// - [`WorldError::MissingAgent`] if `me` is absent.
    /// - [`WorldError::KindMismatch`] if `me` is not a wizard.
    pub fn build(self) -> WorldResult<WorldSnapshot> {
        let mut index = FxHashMap::default();
        index.reserve(self.units.len());
        for (i, unit) in self.units.iter().enumerate() {
            if index.insert(unit.id, i).is_some() {
                return Err(WorldError::DuplicateUnit(unit.id));
            }
        }

        let agent = index
            .get(&self.me)
            .map(|&i| &self.units[i])
            .ok_or(WorldError::MissingAgent(self.me))?;
        if agent.kind != UnitKind::Wizard {
            return Err(WorldError::KindMismatch {
                id:       self.me,
                expected: UnitKind::Wizard.as_str(),
                found:    agent.kind.as_str(),
            });
        }

        Ok(WorldSnapshot::new(self.tick, self.me, self.units, index))
    }
}
