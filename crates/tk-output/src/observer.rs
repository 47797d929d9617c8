//! `TraceObserver<W>` bridges `DecisionObserver` to a `TraceWriter`.

use tk_cast::CastSolution;
use tk_core::Tick;
use tk_tactics::{Decision, DecisionObserver};

use crate::row::{CastRow, DecisionRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`DecisionObserver`] that writes every decision and cast to a
/// [`TraceWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  Check with [`take_error`][Self::take_error] or let
/// [`finish`][Self::finish] report it.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    decisions:  u64,
    casts:      u64,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, decisions: 0, casts: 0, last_error: None }
    }

    /// Rows handed to the writer so far: `(decisions, casts)`.
    pub fn counts(&self) -> (u64, u64) {
        (self.decisions, self.casts)
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, returning the first error of the whole trace.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        self.store_err(result);
        self.take_error().map_or(Ok(()), Err)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> DecisionObserver for TraceObserver<W> {
    fn on_cast(&mut self, tick: Tick, solution: &CastSolution) {
        let result = self.writer.write_cast(&CastRow::new(tick, solution));
        self.casts += 1;
        self.store_err(result);
    }

    fn on_decision(&mut self, decision: &Decision) {
        let result = self.writer.write_decision(&DecisionRow::from(decision));
        self.decisions += 1;
        self.store_err(result);
    }
}
