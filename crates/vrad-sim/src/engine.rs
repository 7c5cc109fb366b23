//! The `SimulationEngine` struct and its event loop.

use log::{debug, warn};
use vrad_core::{Job, JobId, RadiologistId, SimClock, SimTime, SimulationParameters, Urgency, VariateSource};
use vrad_dispatch::{DispatchPolicy, WaitLists};
use vrad_pool::RadiologistPool;
use vrad_queue::{Event, EventQueue, ScheduledEvent};

use crate::{
    ClassSummary, RunSummary, SimError, SimObserver, SimResult, SimulationResult, TerminationReason,
};

/// Lifecycle of one engine.  Moves strictly forward.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Built, nothing scheduled yet.
    Initialized,
    /// Clock is before `sim_duration`; arrivals are still being generated.
    Running,
    /// Past `sim_duration`; working off the backlog until the cutoff.
    Draining,
    /// Loop finished; the result has been produced.
    Terminated,
}

// ── SimulationEngine ──────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `SimulationEngine<P, V>` owns all state of one run (clock, event queue,
/// roster, wait lists, job log) and mutates it one event at a time on a
/// single thread.  `P` decides matching; `V` supplies durations.
///
/// An engine runs once.  Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct SimulationEngine<P: DispatchPolicy, V: VariateSource> {
    /// Run parameters, fixed for the life of the engine.
    pub params: SimulationParameters,

    pub clock: SimClock,

    pub phase: Phase,

    /// Future event list.
    pub queue: EventQueue,

    /// Fixed radiologist roster.
    pub pool: RadiologistPool,

    /// Jobs waiting for a radiologist, one FIFO per class.
    pub waiting: WaitLists,

    /// Append-only job log indexed by `JobId`.  Jobs are never removed.
    pub jobs: Vec<Job>,

    /// Ids of completed jobs, in completion order.
    pub completed: Vec<JobId>,

    pub events_processed: u64,

    pub(crate) policy: P,

    pub(crate) variates: V,
}

impl<P: DispatchPolicy, V: VariateSource> SimulationEngine<P, V> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation to termination and return its result.
    ///
    /// Calls observer hooks throughout.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// Fails with [`SimError::AlreadyRun`] if called twice.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimulationResult> {
        if self.phase != Phase::Initialized {
            return Err(SimError::AlreadyRun);
        }

        self.seed_arrivals()?;
        self.enter(Phase::Running, observer);

        let cutoff = self.params.cutoff_horizon();
        let termination = loop {
            match self.queue.peek_time() {
                None => break TerminationReason::QueueExhausted,
                Some(t) if t >= cutoff => break TerminationReason::CutoffReached,
                Some(_) => {}
            }
            let Some(scheduled) = self.queue.pop_next() else {
                break TerminationReason::QueueExhausted;
            };
            self.step(scheduled, observer)?;
        };

        self.enter(Phase::Terminated, observer);
        let result = self.collect(termination);
        if !result.unfinished.is_empty() {
            warn!(
                "cutoff at {} left {} jobs unfinished ({} still waiting)",
                cutoff,
                result.unfinished.len(),
                self.waiting.len(),
            );
        }
        observer.on_run_end(&result.summary, &result.unfinished);
        Ok(result)
    }

    /// Name of the dispatch policy in use.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    // ── Event handling ────────────────────────────────────────────────────

    /// Schedule the first arrival of each class, if it falls before the
    /// horizon.
    fn seed_arrivals(&mut self) -> SimResult<()> {
        let horizon = self.params.horizon();
        for urgency in Urgency::ALL {
            let first = SimTime::ZERO + self.variates.draw_interarrival(urgency);
            if first < horizon {
                self.queue.schedule(first, Event::Arrival(urgency))?;
            }
        }
        Ok(())
    }

    fn step<O: SimObserver>(&mut self, scheduled: ScheduledEvent, observer: &mut O) -> SimResult<()> {
        self.clock.advance_to(scheduled.time);
        self.events_processed += 1;
        if self.phase == Phase::Running && scheduled.time >= self.params.horizon() {
            self.enter(Phase::Draining, observer);
        }

        observer.on_event(&scheduled);
        match scheduled.event {
            Event::Arrival(urgency) => self.handle_arrival(urgency, observer),
            Event::ServiceComplete { job, radiologist } => {
                self.handle_completion(job, radiologist, observer)
            }
        }
    }

    /// A new image arrives: schedule the next one of its class, then place it.
    fn handle_arrival<O: SimObserver>(&mut self, urgency: Urgency, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now();

        let next = now + self.variates.draw_interarrival(urgency);
        if next < self.params.horizon() {
            self.queue.schedule(next, Event::Arrival(urgency))?;
        }

        let id = JobId::try_from(self.jobs.len()).map_err(|_| SimError::TooManyJobs(self.jobs.len()))?;
        self.jobs.push(Job::new(id, urgency, now));

        match self.policy.select_server(&self.jobs[id.index()], &self.pool) {
            Some(radiologist) => self.start_service(id, radiologist, observer),
            None => {
                self.waiting.push(urgency, id);
                Ok(())
            }
        }
    }

    /// A read finishes: log the job, free the radiologist, pull the next job.
    fn handle_completion<O: SimObserver>(
        &mut self,
        job: JobId,
        radiologist: RadiologistId,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock.now();

        let released = self.pool.release(radiologist, now)?;
        if released != job {
            return Err(SimError::JobMismatch { radiologist, expected: job, found: released });
        }
        let done = self.jobs.get_mut(job.index()).ok_or(SimError::UnknownJob(job))?;
        done.complete(now);
        self.completed.push(job);
        observer.on_job_completed(done);

        let server = self.pool.get(radiologist)?;
        let Some(urgency) = self.policy.select_next_job(server, &self.waiting) else {
            return Ok(());
        };
        match self.waiting.pop_front(urgency) {
            Some(next) => self.start_service(next, radiologist, observer),
            None => Ok(()),
        }
    }

    /// Hand `job` to `radiologist` now and schedule the completion.
    fn start_service<O: SimObserver>(
        &mut self,
        job: JobId,
        radiologist: RadiologistId,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock.now();
        self.pool.assign(radiologist, job, now)?;

        let entry = self.jobs.get_mut(job.index()).ok_or(SimError::UnknownJob(job))?;
        entry.start_service(radiologist, now);
        let finish = now + self.variates.draw_service(entry.urgency);
        self.queue.schedule(finish, Event::ServiceComplete { job, radiologist })?;
        observer.on_job_started(entry);
        Ok(())
    }

    fn enter<O: SimObserver>(&mut self, phase: Phase, observer: &mut O) {
        debug!("{} {:?} -> {:?}", self.clock, self.phase, phase);
        self.phase = phase;
        observer.on_phase(phase, self.clock.now());
    }

    // ── Result assembly ───────────────────────────────────────────────────

    fn collect(&self, termination: TerminationReason) -> SimulationResult {
        let completed: Vec<Job> = self.completed.iter().map(|id| self.jobs[id.index()].clone()).collect();
        let unfinished: Vec<Job> = self.jobs.iter().filter(|j| !j.is_complete()).cloned().collect();
        let now = self.clock.now();

        let classes = Urgency::ALL.map(|urgency| {
            let target = self.params.target_for(urgency);
            let done: Vec<&Job> = completed.iter().filter(|j| j.urgency == urgency).collect();
            let waits: Vec<f64> = done.iter().filter_map(|j| j.wait_time()).collect();
            let totals: Vec<f64> = done.iter().filter_map(|j| j.total_time()).collect();
            ClassSummary {
                urgency,
                created:         self.jobs.iter().filter(|j| j.urgency == urgency).count(),
                completed:       done.len(),
                unfinished:      unfinished.iter().filter(|j| j.urgency == urgency).count(),
                target_time:     target,
                sla_breaches:    done.iter().filter(|j| j.breached(target)).count(),
                mean_wait_time:  mean(&waits),
                max_wait_time:   waits.iter().copied().reduce(f64::max),
                mean_total_time: mean(&totals),
                max_queue_len:   self.waiting.max_len_for(urgency),
            }
        });

        let summary = RunSummary {
            policy:           self.policy.name().to_string(),
            jobs_created:     self.jobs.len(),
            jobs_completed:   completed.len(),
            jobs_unfinished:  unfinished.len(),
            events_processed: self.events_processed,
            final_time:       now,
            max_queue_len:    self.waiting.max_len(),
            utilisation:      self.pool.utilisation(now),
            termination,
            classes,
        };

        SimulationResult { completed, unfinished, summary }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
