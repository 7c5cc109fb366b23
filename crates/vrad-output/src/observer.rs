//! `JobTableObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use vrad_core::Job;
use vrad_sim::{JobRow, RunSummary, SimObserver};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams completed jobs to an [`OutputWriter`] and
/// writes the unfinished jobs and class summaries when the run ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `engine.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct JobTableObserver<W: OutputWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> JobTableObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Completed-job rows handed to the writer so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
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

impl<W: OutputWriter> SimObserver for JobTableObserver<W> {
    fn on_job_completed(&mut self, job: &Job) {
        let result = self.writer.write_jobs(&[JobRow::from(job)]);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, summary: &RunSummary, unfinished: &[Job]) {
        let rows: Vec<JobRow> = unfinished.iter().map(JobRow::from).collect();
        let result = self.writer.write_unfinished(&rows);
        self.store_err(result);

        let result = self.writer.write_class_summaries(&summary.classes);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
