//! `vrad-output` — writers for a run's job table.
//!
//! | Backend | Files created                                                 |
//! |---------|---------------------------------------------------------------|
//! | CSV     | `job_table.csv`, `unfinished_jobs.csv`, `class_summary.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`JobTableObserver`], which implements `vrad_sim::SimObserver`.  Rows are
//! written as jobs complete, so the job table lands in completion order.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vrad_output::{CsvWriter, JobTableObserver};
//!
//! let writer = CsvWriter::new(Path::new("./out"))?;
//! let mut obs = JobTableObserver::new(writer);
//! engine.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::JobTableObserver;
pub use row::{CLASS_SUMMARY_COLUMNS, class_record, job_record};
pub use writer::OutputWriter;
