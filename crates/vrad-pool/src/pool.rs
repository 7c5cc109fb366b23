//! `RadiologistPool` — fixed roster with availability tracking.

use vrad_core::{JobId, RadiologistId, SimTime, SimulationParameters, Urgency};

use crate::{Capability, PoolError, PoolResult, Radiologist};

/// The fixed set of radiologists for one run, indexed by `RadiologistId`.
pub struct RadiologistPool {
    radiologists: Vec<Radiologist>,
    busy:         usize,
}

impl RadiologistPool {
    /// Create `count` radiologists; ids `0..specialists` are specialists.
    ///
    /// `specialists` is clamped to `count`.
    pub fn new(count: u32, specialists: u32) -> Self {
        let specialists = specialists.min(count);
        let radiologists = (0..count)
            .map(|i| {
                let capability = if i < specialists {
                    Capability::Specialist
                } else {
                    Capability::Generalist
                };
                Radiologist::new(RadiologistId(i), capability)
            })
            .collect();
        Self { radiologists, busy: 0 }
    }

    /// Staff the pool from run parameters.
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self::new(params.num_radiologists, params.specialist_count())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.radiologists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radiologists.is_empty()
    }

    pub fn get(&self, id: RadiologistId) -> PoolResult<&Radiologist> {
        self.radiologists.get(id.index()).ok_or(PoolError::UnknownRadiologist(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Radiologist> {
        self.radiologists.iter()
    }

    pub fn busy_count(&self) -> usize {
        self.busy
    }

    pub fn idle_count(&self) -> usize {
        self.radiologists.len() - self.busy
    }

    pub fn specialist_count(&self) -> usize {
        self.radiologists.iter().filter(|r| r.is_specialist()).count()
    }

    /// Pick an idle radiologist for a job of `urgency`.
    ///
    /// Only radiologists for which `can_serve(capability, urgency)` holds are
    /// considered.  Among those, an idle generalist is preferred over an idle
    /// specialist so specialist capacity stays free for later arrivals; ties
    /// go to the lowest id.
    pub fn find_available<F>(&self, urgency: Urgency, can_serve: F) -> Option<RadiologistId>
    where
        F: Fn(Capability, Urgency) -> bool,
    {
        let first_of = |cap: Capability| {
            if !can_serve(cap, urgency) {
                return None;
            }
            self.radiologists
                .iter()
                .find(|r| r.is_idle() && r.capability == cap)
                .map(|r| r.id)
        };
        first_of(Capability::Generalist).or_else(|| first_of(Capability::Specialist))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Give `job` to idle radiologist `id` at `now`.
    pub fn assign(&mut self, id: RadiologistId, job: JobId, now: SimTime) -> PoolResult<()> {
        let rad = self
            .radiologists
            .get_mut(id.index())
            .ok_or(PoolError::UnknownRadiologist(id))?;
        if let Some(current) = rad.current_job {
            return Err(PoolError::AlreadyBusy { radiologist: id, current });
        }
        rad.current_job = Some(job);
        rad.busy_since = Some(now);
        self.busy += 1;
        Ok(())
    }

    /// Free radiologist `id` at `now`, returning the job it was reading.
    pub fn release(&mut self, id: RadiologistId, now: SimTime) -> PoolResult<JobId> {
        let rad = self
            .radiologists
            .get_mut(id.index())
            .ok_or(PoolError::UnknownRadiologist(id))?;
        let job = rad.current_job.take().ok_or(PoolError::NotBusy(id))?;
        if let Some(since) = rad.busy_since.take() {
            rad.busy_time += now - since;
        }
        rad.jobs_completed += 1;
        self.busy -= 1;
        Ok(job)
    }

    /// Fraction of roster time spent reading over `[0, now]`.
    pub fn utilisation(&self, now: SimTime) -> f64 {
        let capacity = self.radiologists.len() as f64 * now.minutes();
        if capacity <= 0.0 {
            return 0.0;
        }
        let busy: f64 = self.radiologists.iter().map(|r| r.busy_time_at(now)).sum();
        busy / capacity
    }
}
