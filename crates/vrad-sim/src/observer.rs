//! Simulation observer trait for progress reporting and data collection.

use log::info;
use vrad_core::{Job, SimTime};
use vrad_queue::ScheduledEvent;

use crate::{Phase, RunSummary};

/// Callbacks invoked by [`SimulationEngine::run`][crate::SimulationEngine::run]
/// at key points in the event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl SimObserver for Counter {
///     fn on_job_completed(&mut self, _job: &Job) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called when the engine changes phase.
    fn on_phase(&mut self, _phase: Phase, _now: SimTime) {}

    /// Called for every event after the clock has advanced to it and before
    /// it is handled.
    fn on_event(&mut self, _event: &ScheduledEvent) {}

    /// Called when a radiologist picks up a job.
    fn on_job_started(&mut self, _job: &Job) {}

    /// Called when a read finishes, in completion order.
    fn on_job_completed(&mut self, _job: &Job) {}

    /// Called once after the loop stops.
    fn on_run_end(&mut self, _summary: &RunSummary, _unfinished: &[Job]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs every event and job transition at `info` level when enabled.
///
/// This is what the `verbose` parameter switches on.  When disabled it stays
/// silent apart from the end-of-run line at `debug`.
pub struct LogObserver {
    enabled: bool,
}

impl LogObserver {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl SimObserver for LogObserver {
    fn on_phase(&mut self, phase: Phase, now: SimTime) {
        if self.enabled {
            info!("{now} phase -> {phase:?}");
        }
    }

    fn on_event(&mut self, event: &ScheduledEvent) {
        if self.enabled {
            info!("{event}");
        }
    }

    fn on_job_started(&mut self, job: &Job) {
        if !self.enabled {
            return;
        }
        if let (Some(rad), Some(start), Some(wait)) =
            (job.radiologist, job.time_service_started, job.wait_time())
        {
            info!("{start} {} ({}) assigned to {rad} after waiting {wait:.2} min", job.id, job.urgency);
        }
    }

    fn on_job_completed(&mut self, job: &Job) {
        if !self.enabled {
            return;
        }
        if let Some(total) = job.total_time() {
            info!("{} ({}) finished, total time {:.2} min", job.id, job.urgency, total);
        }
    }

    fn on_run_end(&mut self, summary: &RunSummary, unfinished: &[Job]) {
        let line = format!(
            "run finished at {} ({:?}): {} completed, {} unfinished, {} SLA breaches",
            summary.final_time,
            summary.termination,
            summary.jobs_completed,
            unfinished.len(),
            summary.total_sla_breaches(),
        );
        if self.enabled {
            info!("{line}");
        } else {
            log::debug!("{line}");
        }
    }
}

/// Drive two observers from one run, left first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_phase(&mut self, phase: Phase, now: SimTime) {
        self.0.on_phase(phase, now);
        self.1.on_phase(phase, now);
    }

    fn on_event(&mut self, event: &ScheduledEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_job_started(&mut self, job: &Job) {
        self.0.on_job_started(job);
        self.1.on_job_started(job);
    }

    fn on_job_completed(&mut self, job: &Job) {
        self.0.on_job_completed(job);
        self.1.on_job_completed(job);
    }

    fn on_run_end(&mut self, summary: &RunSummary, unfinished: &[Job]) {
        self.0.on_run_end(summary, unfinished);
        self.1.on_run_end(summary, unfinished);
    }
}
