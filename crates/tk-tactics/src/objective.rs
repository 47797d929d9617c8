use tk_core::{Point, ProjectileKind};
use tk_world::Target;

/// What the agent is trying to do this tick.
///
/// Movement always heads for `destination`.  The agent faces `look_at` when
/// set, otherwise the target; with a `projectile` it also shoots the target
/// whenever a clean shot exists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    pub destination: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub look_at:     Option<Point>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target:      Target,
    #[cfg_attr(feature = "serde", serde(default))]
    pub projectile:  Option<ProjectileKind>,
}

impl Objective {
    pub fn move_to(destination: Point) -> Self {
        Self { destination, look_at: None, target: Target::None, projectile: None }
    }

    pub fn looking_at(mut self, point: Point) -> Self {
        self.look_at = Some(point);
        self
    }

    pub fn attack(mut self, target: Target, projectile: ProjectileKind) -> Self {
        self.target = target;
        self.projectile = Some(projectile);
        self
    }
}
