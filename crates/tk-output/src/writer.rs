//! The `TraceWriter` trait implemented by trace backends.

use crate::{CastRow, DecisionRow, OutputResult};

/// Sink for decision and cast rows.
///
/// The observer cannot return errors, so it stores the first one; fetch it
/// with [`TraceObserver::take_error`](crate::TraceObserver::take_error).
pub trait TraceWriter {
    fn write_decision(&mut self, row: &DecisionRow) -> OutputResult<()>;

    fn write_cast(&mut self, row: &CastRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
