//! Minimal kinematic stand-in for the game server.
//!
//! Moves the wizard by the commanded movement, everything else along its
//! velocity, flies projectiles and applies their damage.  Collisions between
//! bodies are not resolved; the controller is expected to avoid them.

use anyhow::Result;

use tk_core::{Circle, GameRules, Point, ProjectileKind, Tick, UnitId, normalize_angle};
use tk_motion::{MovementState, shift};
use tk_tactics::{CastOrder, ControlCommand};
use tk_world::{Faction, Unit, UnitKind, WorldBuilder, WorldSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const CAST_COOLDOWN:     u64 = 60;
const PROJECTILE_DAMAGE: i32 = 12;
const FIRST_PROJECTILE:  u64 = 10_000;

/// A projectile in flight and where it stops.
struct Flight {
    unit:         Unit,
    origin:       Point,
    min_distance: f64,
    max_distance: f64,
}

pub struct Arena {
    rules:   GameRules,
    tick:    u64,
    me:      Unit,
    units:   Vec<Unit>,
    flights: Vec<Flight>,
    next_id: u64,
    pub casts: u64,
    pub hits:  u64,
    pub kills: u64,
}

impl Arena {
    pub fn new(rules: GameRules, me: Unit, units: Vec<Unit>) -> Self {
        Self {
            rules,
            tick: 0,
            me,
            units,
            flights: Vec::new(),
            next_id: FIRST_PROJECTILE,
            casts: 0,
            hits: 0,
            kills: 0,
        }
    }

    pub fn me(&self) -> &Unit {
        &self.me
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Hostile minions and wizards still standing.
    pub fn hostiles(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| is_hostile(u))
    }

    pub fn snapshot(&self) -> Result<WorldSnapshot> {
        let world = WorldBuilder::new(self.me.id)
            .tick(Tick(self.tick))
            .unit(self.me.clone())
            .units(self.units.iter().cloned())
            .units(self.flights.iter().map(|f| f.unit.clone()))
            .build()?;
        Ok(world)
    }

    /// Apply `command` and advance one tick.
    pub fn step(&mut self, command: &ControlCommand) {
        let state = MovementState::new(0, self.me.position, self.me.angle);
        let delta = shift(&state, &command.movement());
        let limit = self.rules.map_size - self.me.radius;
        self.me.position = Point::new(
            (self.me.position.x + delta.x).clamp(self.me.radius, limit),
            (self.me.position.y + delta.y).clamp(self.me.radius, limit),
        );
        self.me.angle = normalize_angle(self.me.angle + command.turn);
        self.me.remaining_action_cooldown = self.me.remaining_action_cooldown.saturating_sub(1);
        if let Some(order) = command.cast {
            self.launch(&order);
        }

        for unit in &mut self.units {
            unit.position = unit.position + unit.velocity;
        }
        self.fly();
        self.tick += 1;
    }

    fn launch(&mut self, order: &CastOrder) {
        if self.me.remaining_action_cooldown > 0 {
            return;
        }
        let spec = *self.rules.projectile(order.kind);
        let angle = normalize_angle(self.me.angle + order.angle);
        let unit = Unit::new(
            UnitId(self.next_id),
            UnitKind::Projectile(order.kind),
            self.me.faction,
            self.me.position,
            spec.radius,
        )
        .with_velocity(Point::from_angle(angle) * spec.speed)
        .with_angle(angle)
        .with_owner(self.me.id);

        self.next_id += 1;
        self.casts += 1;
        self.me.remaining_action_cooldown = CAST_COOLDOWN;
        self.flights.push(Flight {
            unit,
            origin:       self.me.position,
            min_distance: order.min_distance,
            max_distance: order.max_distance.min(self.rules.wizard_cast_range),
        });
    }

    fn fly(&mut self) {
        let flights = std::mem::take(&mut self.flights);
        for mut flight in flights {
            flight.unit.position = flight.unit.position + flight.unit.velocity;
            let travelled = flight.origin.distance(flight.unit.position);
            let body = flight.unit.circle();

            let struck = travelled >= flight.min_distance
                && self.units.iter().any(|u| is_hostile(u) && u.circle().has_intersection(&body));
            if struck || travelled >= flight.max_distance {
                let blast = match flight.unit.kind {
                    UnitKind::Projectile(ProjectileKind::Fireball) => self
                        .rules
                        .fireball
                        .explosion_radius
                        .map_or(body, |r| Circle::new(flight.unit.position, r)),
                    _ => body,
                };
                if struck || blast != body {
                    self.damage(&blast);
                }
                continue;
            }
            self.flights.push(flight);
        }
    }

    fn damage(&mut self, area: &Circle) {
        let before = self.units.len();
        for unit in self.units.iter_mut().filter(|u| is_hostile(u) && u.circle().has_intersection(area)) {
            unit.life -= PROJECTILE_DAMAGE;
            self.hits += 1;
        }
        self.units.retain(|u| !is_hostile(u) || u.life > 0);
        self.kills += (before - self.units.len()) as u64;
    }
}

fn is_hostile(unit: &Unit) -> bool {
    unit.faction == Faction::Hostile && matches!(unit.kind, UnitKind::Minion | UnitKind::Wizard)
}
