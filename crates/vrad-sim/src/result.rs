//! What a run hands back: the job log, unfinished jobs, and a summary.

use vrad_core::{Job, SimTime, Urgency};

/// Column names of the job table, in order.
pub const JOB_TABLE_COLUMNS: [&str; 9] = [
    "img_id",
    "urgency",
    "rad_id",
    "time_created",
    "time_rad_job_starts",
    "time_job_finished",
    "wait_time",
    "time_w_rad",
    "total_time",
];

/// Why the event loop stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Every job that arrived was read.
    QueueExhausted,
    /// The next event fell at or after `sim_duration × cutoff_multiplier`.
    CutoffReached,
}

/// One row of the job table.  Absent values (unfinished jobs) are `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobRow {
    pub img_id:              u32,
    pub urgency:             u8,
    pub rad_id:              Option<u32>,
    pub time_created:        f64,
    pub time_rad_job_starts: Option<f64>,
    pub time_job_finished:   Option<f64>,
    pub wait_time:           Option<f64>,
    pub time_w_rad:          Option<f64>,
    pub total_time:          Option<f64>,
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            img_id:              job.id.0,
            urgency:             job.urgency.level(),
            rad_id:              job.radiologist.map(|r| r.0),
            time_created:        job.time_created.minutes(),
            time_rad_job_starts: job.time_service_started.map(SimTime::minutes),
            time_job_finished:   job.time_completed.map(SimTime::minutes),
            wait_time:           job.wait_time(),
            time_w_rad:          job.service_duration(),
            total_time:          job.total_time(),
        }
    }
}

/// Per-urgency-class outcome of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassSummary {
    pub urgency:         Urgency,
    pub created:         usize,
    pub completed:       usize,
    pub unfinished:      usize,
    /// The class's SLA on `total_time`.
    pub target_time:     f64,
    /// Completed jobs whose `total_time` exceeded `target_time`.
    pub sla_breaches:    usize,
    pub mean_wait_time:  Option<f64>,
    pub max_wait_time:   Option<f64>,
    pub mean_total_time: Option<f64>,
    /// Longest wait list observed for this class.
    pub max_queue_len:   usize,
}

/// Run-level metadata.  Overload shows up here (breaches, queue lengths),
/// never as an error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Name of the dispatch policy that produced the run.
    pub policy:           String,
    pub jobs_created:     usize,
    pub jobs_completed:   usize,
    pub jobs_unfinished:  usize,
    pub events_processed: u64,
    /// Clock value when the loop stopped.
    pub final_time:       SimTime,
    /// Longest combined wait list observed.
    pub max_queue_len:    usize,
    /// Busy share of roster time over `[0, final_time]`.
    pub utilisation:      f64,
    pub termination:      TerminationReason,
    /// Indexed by [`Urgency::index`].
    pub classes:          [ClassSummary; 3],
}

impl RunSummary {
    pub fn class(&self, urgency: Urgency) -> &ClassSummary {
        &self.classes[urgency.index()]
    }

    pub fn total_sla_breaches(&self) -> usize {
        self.classes.iter().map(|c| c.sla_breaches).sum()
    }
}

/// Everything a run produces.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Completed jobs, ordered by completion time.
    pub completed:  Vec<Job>,
    /// Jobs still waiting or in service when the run stopped, ordered by id.
    pub unfinished: Vec<Job>,
    pub summary:    RunSummary,
}

impl SimulationResult {
    /// The job table: one row per completed job, in completion order.
    pub fn job_table(&self) -> Vec<JobRow> {
        self.completed.iter().map(JobRow::from).collect()
    }

    /// Rows for jobs that never finished, with absent cells as `None`.
    pub fn unfinished_table(&self) -> Vec<JobRow> {
        self.unfinished.iter().map(JobRow::from).collect()
    }

    /// The last `n` rows of the job table (what the dashboard displays).
    pub fn job_table_tail(&self, n: usize) -> Vec<JobRow> {
        let start = self.completed.len().saturating_sub(n);
        self.completed[start..].iter().map(JobRow::from).collect()
    }

    /// Completed jobs of one class, in completion order.
    pub fn completed_for(&self, urgency: Urgency) -> impl Iterator<Item = &Job> {
        self.completed.iter().filter(move |j| j.urgency == urgency)
    }
}
