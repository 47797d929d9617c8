//! Tagged reference to the unit an objective is about.

use tk_core::UnitId;

use crate::unit::UnitKind;

/// Which unit, and of what kind, an objective targets.
///
/// Resolved against the current snapshot with
/// [`WorldSnapshot::resolve`](crate::WorldSnapshot::resolve).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Target {
    #[default]
    None,
    Bonus(UnitId),
    Building(UnitId),
    Minion(UnitId),
    Wizard(UnitId),
    Tree(UnitId),
}

impl Target {
    pub fn id(self) -> Option<UnitId> {
        match self {
            Target::None => None,
            Target::Bonus(id)
            | Target::Building(id)
            | Target::Minion(id)
            | Target::Wizard(id)
            | Target::Tree(id) => Some(id),
        }
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !matches!(self, Target::None)
    }

    /// `true` if a unit of `kind` may be behind this tag.
    pub fn matches(self, kind: UnitKind) -> bool {
        matches!(
            (self, kind),
            (Target::Bonus(_), UnitKind::Bonus)
                | (Target::Building(_), UnitKind::Building)
                | (Target::Minion(_), UnitKind::Minion)
                | (Target::Wizard(_), UnitKind::Wizard)
                | (Target::Tree(_), UnitKind::Tree)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Target::None        => "none",
            Target::Bonus(_)    => "bonus",
            Target::Building(_) => "building",
            Target::Minion(_)   => "minion",
            Target::Wizard(_)   => "wizard",
            Target::Tree(_)     => "tree",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{}#{}", self.as_str(), id.0),
            None => f.write_str("none"),
        }
    }
}
