//! The `OutputWriter` trait implemented by backend writers.

use vrad_sim::{ClassSummary, JobRow};

use crate::OutputResult;

/// A sink for the three tables a run produces.
///
/// The observer never sees these errors directly; they are stored and
/// retrieved with [`JobTableObserver::take_error`][crate::JobTableObserver::take_error].
pub trait OutputWriter {
    /// Append completed-job rows to the job table.
    fn write_jobs(&mut self, rows: &[JobRow]) -> OutputResult<()>;

    /// Append rows for jobs still waiting or in service at cutoff.
    fn write_unfinished(&mut self, rows: &[JobRow]) -> OutputResult<()>;

    /// Write one summary row per urgency class.
    fn write_class_summaries(&mut self, classes: &[ClassSummary]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
