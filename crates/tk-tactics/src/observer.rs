//! Decision observer trait for tracing and data collection.

use std::time::Duration;

use tk_cast::CastSolution;
use tk_core::{Point, Tick};
use tk_motion::Trajectory;
use tk_path::LocalPath;

use crate::command::ControlCommand;
use crate::error::TacticsError;

/// Summary of one completed decision.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub tick:        Tick,
    pub position:    Point,
    pub heading:     f64,
    pub command:     ControlCommand,
    /// Length of the local path being followed; zero after a timeout.
    pub path_length: f64,
    pub replanned:   bool,
    pub timed_out:   bool,
    pub elapsed:     Duration,
    pub limit:       Duration,
}

/// Callbacks invoked by [`TacticalController::decide`][crate::TacticalController::decide].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: replan counter
///
/// ```rust,ignore
/// struct Replans(usize);
///
/// impl DecisionObserver for Replans {
///     fn on_replan(&mut self, _tick: Tick, _path: &LocalPath, _trajectory: &Trajectory) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait DecisionObserver {
    /// A fresh local path was planned and realized.
    fn on_replan(&mut self, _tick: Tick, _path: &LocalPath, _trajectory: &Trajectory) {}

    /// The cast solver ran.  Called for rejected solutions too.
    fn on_cast(&mut self, _tick: Tick, _solution: &CastSolution) {}

    /// The decision ran out of time and fell back to idling.
    fn on_timeout(&mut self, _tick: Tick, _error: &TacticsError) {}

    /// Called once per successful `decide`, timeouts included.
    fn on_decision(&mut self, _decision: &Decision) {}
}

/// A [`DecisionObserver`] that does nothing.
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}
