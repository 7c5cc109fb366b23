//! A single server in the pool.

use vrad_core::{JobId, RadiologistId, SimTime};

/// Capability tier of a radiologist.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    Specialist,
    Generalist,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Specialist => "specialist",
            Capability::Generalist => "generalist",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RadiologistState {
    Idle,
    Busy,
}

/// One radiologist.  Busy exactly while `current_job` is `Some`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Radiologist {
    pub id:             RadiologistId,
    pub capability:     Capability,
    pub current_job:    Option<JobId>,
    /// When the current job started; `None` while idle.
    pub busy_since:     Option<SimTime>,
    /// Reads finished so far.
    pub jobs_completed: u32,
    /// Minutes spent on finished reads.
    pub busy_time:      f64,
}

impl Radiologist {
    pub fn new(id: RadiologistId, capability: Capability) -> Self {
        Self {
            id,
            capability,
            current_job:    None,
            busy_since:     None,
            jobs_completed: 0,
            busy_time:      0.0,
        }
    }

    #[inline]
    pub fn state(&self) -> RadiologistState {
        if self.current_job.is_some() {
            RadiologistState::Busy
        } else {
            RadiologistState::Idle
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current_job.is_none()
    }

    #[inline]
    pub fn is_specialist(&self) -> bool {
        self.capability == Capability::Specialist
    }

    /// Busy minutes up to `now`, counting an in-progress read.
    pub fn busy_time_at(&self, now: SimTime) -> f64 {
        self.busy_time + self.busy_since.map_or(0.0, |s| (now - s).max(0.0))
    }
}
