//! Per-agent memory carried between decisions.

use tk_core::Point;
use tk_motion::MovementCursor;
use tk_path::LocalPath;
use tk_world::UnitHistory;

use crate::allowance::TimeAllowance;

/// Macro route being followed toward one destination.
#[derive(Clone, Debug)]
pub(crate) struct RouteState {
    pub(crate) destination: Point,
    /// Waypoint positions from the node nearest the agent to the node nearest
    /// the destination.
    pub(crate) nodes:       Vec<Point>,
    /// Index of the waypoint currently steered for.
    pub(crate) next:        usize,
}

/// State the controller needs from one tick to the next.
///
/// Created by [`TacticalController::new_session`](crate::TacticalController::new_session)
/// and owned by the caller; one per agent.
#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) history:   UnitHistory,
    pub(crate) route:     Option<RouteState>,
    pub(crate) path:      Option<LocalPath>,
    pub(crate) cursor:    Option<MovementCursor>,
    pub(crate) waypoint:  Option<Point>,
    pub(crate) look_at:   Option<Point>,
    pub(crate) allowance: TimeAllowance,
    pub(crate) decisions: u64,
    pub(crate) replans:   u64,
    pub(crate) timeouts:  u64,
}

impl Session {
    pub(crate) fn new(allowance: TimeAllowance) -> Self {
        Self {
            history:   UnitHistory::new(),
            route:     None,
            path:      None,
            cursor:    None,
            waypoint:  None,
            look_at:   None,
            allowance,
            decisions: 0,
            replans:   0,
            timeouts:  0,
        }
    }

    pub fn history(&self) -> &UnitHistory {
        &self.history
    }

    /// Last planned local path.
    pub fn path(&self) -> Option<&LocalPath> {
        self.path.as_ref()
    }

    pub fn cursor(&self) -> Option<&MovementCursor> {
        self.cursor.as_ref()
    }

    /// Local target of the last plan: the destination itself or a macro
    /// waypoint on the way there.
    pub fn waypoint(&self) -> Option<Point> {
        self.waypoint
    }

    /// Remaining macro waypoints, the current one first.
    pub fn route_ahead(&self) -> &[Point] {
        match &self.route {
            Some(r) => &r.nodes[r.next.min(r.nodes.len())..],
            None => &[],
        }
    }

    pub fn allowance(&self) -> &TimeAllowance {
        &self.allowance
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    pub fn replans(&self) -> u64 {
        self.replans
    }

    pub fn timeouts(&self) -> u64 {
        self.timeouts
    }

    /// Forget the current plan so the next decision replans from scratch.
    pub fn invalidate(&mut self) {
        self.path = None;
        self.cursor = None;
        self.waypoint = None;
    }
}
