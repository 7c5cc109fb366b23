//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `job_table.csv`
//! - `unfinished_jobs.csv`
//! - `class_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use vrad_sim::{ClassSummary, JOB_TABLE_COLUMNS, JobRow};

use crate::row::{CLASS_SUMMARY_COLUMNS, class_record, job_record};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes a run's tables to three CSV files.
pub struct CsvWriter {
    jobs:       Writer<File>,
    unfinished: Writer<File>,
    classes:    Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create (or truncate) the three CSV files in `dir` and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut jobs = Writer::from_path(dir.join("job_table.csv"))?;
        jobs.write_record(JOB_TABLE_COLUMNS)?;

        let mut unfinished = Writer::from_path(dir.join("unfinished_jobs.csv"))?;
        unfinished.write_record(JOB_TABLE_COLUMNS)?;

        let mut classes = Writer::from_path(dir.join("class_summary.csv"))?;
        classes.write_record(CLASS_SUMMARY_COLUMNS)?;

        Ok(Self {
            jobs,
            unfinished,
            classes,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_jobs(&mut self, rows: &[JobRow]) -> OutputResult<()> {
        for row in rows {
            self.jobs.write_record(&job_record(row))?;
        }
        Ok(())
    }

    fn write_unfinished(&mut self, rows: &[JobRow]) -> OutputResult<()> {
        for row in rows {
            self.unfinished.write_record(&job_record(row))?;
        }
        Ok(())
    }

    fn write_class_summaries(&mut self, classes: &[ClassSummary]) -> OutputResult<()> {
        for class in classes {
            self.classes.write_record(&class_record(class))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.jobs.flush()?;
        self.unfinished.flush()?;
        self.classes.flush()?;
        Ok(())
    }
}
