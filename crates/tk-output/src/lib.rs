//! `tk-output` — decision traces for the tactical controller.
//!
//! | Writer            | Files created                      |
//! |-------------------|------------------------------------|
//! | `CsvTraceWriter`  | `decisions.csv`, `casts.csv`       |
//!
//! Writers implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `tk_tactics::DecisionObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tk_output::{CsvTraceWriter, TraceObserver};
//!
//! let mut obs = TraceObserver::new(CsvTraceWriter::new(Path::new("./trace"))?);
//! for world in ticks {
//!     controller.decide(&world, &objective, &mut session, &mut obs)?;
//! }
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{CastRow, DecisionRow};
pub use writer::TraceWriter;
