//! CSV trace backend.
//!
//! Creates two files in the configured output directory:
//! - `decisions.csv`
//! - `casts.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{CastRow, DecisionRow, OutputResult};

pub const DECISION_HEADER: [&str; 14] = [
    "tick", "x", "y", "heading", "speed", "strafe", "turn", "cast", "cast_angle", "path_length", "replanned",
    "timed_out", "elapsed_us", "limit_us",
];

pub const CAST_HEADER: [&str; 8] =
    ["tick", "accepted", "angle", "min_distance", "max_distance", "flight_ticks", "ally_shadow", "rejection"];

/// Writes a decision trace to two CSV files.
pub struct CsvTraceWriter {
    decisions: Writer<File>,
    casts:     Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut decisions = Writer::from_path(dir.join("decisions.csv"))?;
        decisions.write_record(DECISION_HEADER)?;

        let mut casts = Writer::from_path(dir.join("casts.csv"))?;
        casts.write_record(CAST_HEADER)?;

        Ok(Self { decisions, casts, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_decision(&mut self, row: &DecisionRow) -> OutputResult<()> {
        self.decisions.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.x),
            format!("{:.3}", row.y),
            format!("{:.5}", row.heading),
            format!("{:.3}", row.speed),
            format!("{:.3}", row.strafe),
            format!("{:.5}", row.turn),
            row.cast.clone(),
            format!("{:.5}", row.cast_angle),
            format!("{:.3}", row.path_length),
            (row.replanned as u8).to_string(),
            (row.timed_out as u8).to_string(),
            row.elapsed_us.to_string(),
            row.limit_us.to_string(),
        ])?;
        Ok(())
    }

    fn write_cast(&mut self, row: &CastRow) -> OutputResult<()> {
        self.casts.write_record(&[
            row.tick.to_string(),
            (row.accepted as u8).to_string(),
            format!("{:.5}", row.angle),
            format!("{:.3}", row.min_distance),
            format!("{:.3}", row.max_distance),
            format!("{:.3}", row.flight_ticks),
            format!("{:.3}", row.ally_shadow),
            row.rejection.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.decisions.flush()?;
        self.casts.flush()?;
        Ok(())
    }
}
