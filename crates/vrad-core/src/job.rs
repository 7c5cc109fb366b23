//! `Job` — one image moving through the triage system.

use crate::{JobId, RadiologistId, SimTime, Urgency};

/// A single image from arrival to completion.
///
/// Fields are filled in as the job progresses: `radiologist` and
/// `time_service_started` when a radiologist picks it up, `time_completed`
/// when the read finishes.  After completion the job is never mutated again.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub id:                   JobId,
    pub urgency:              Urgency,
    pub time_created:         SimTime,
    pub radiologist:          Option<RadiologistId>,
    pub time_service_started: Option<SimTime>,
    pub time_completed:       Option<SimTime>,
}

impl Job {
    /// A freshly arrived, waiting job.
    pub fn new(id: JobId, urgency: Urgency, now: SimTime) -> Self {
        Self {
            id,
            urgency,
            time_created:         now,
            radiologist:          None,
            time_service_started: None,
            time_completed:       None,
        }
    }

    /// Hand the job to `radiologist` at `now`.
    pub fn start_service(&mut self, radiologist: RadiologistId, now: SimTime) {
        debug_assert!(self.is_waiting(), "job {} started twice", self.id);
        debug_assert!(now >= self.time_created);
        self.radiologist = Some(radiologist);
        self.time_service_started = Some(now);
    }

    /// Mark the read finished at `now`.
    pub fn complete(&mut self, now: SimTime) {
        debug_assert!(self.is_in_service(), "job {} completed while not in service", self.id);
        debug_assert!(self.time_service_started.is_some_and(|s| now >= s));
        self.time_completed = Some(now);
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.time_service_started.is_none()
    }

    #[inline]
    pub fn is_in_service(&self) -> bool {
        self.time_service_started.is_some() && self.time_completed.is_none()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.time_completed.is_some()
    }

    /// Queueing delay: `time_service_started − time_created`.
    pub fn wait_time(&self) -> Option<f64> {
        self.time_service_started.map(|s| s - self.time_created)
    }

    /// Time with the radiologist: `time_completed − time_service_started`.
    pub fn service_duration(&self) -> Option<f64> {
        Some(self.time_completed? - self.time_service_started?)
    }

    /// End-to-end sojourn: `time_completed − time_created`.
    pub fn total_time(&self) -> Option<f64> {
        self.time_completed.map(|c| c - self.time_created)
    }

    /// `true` if the job completed later than `target` minutes after arrival.
    pub fn breached(&self, target: f64) -> bool {
        self.total_time().is_some_and(|t| t > target)
    }
}
