//! Event payloads.

use vrad_core::{JobId, RadiologistId, SimTime, Urgency};

/// Something that happens at an instant of simulated time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A new image of this class arrives.
    Arrival(Urgency),

    /// `radiologist` finishes reading `job`.
    ServiceComplete {
        job:         JobId,
        radiologist: RadiologistId,
    },
}

/// An event as it leaves the queue: payload plus when it fires.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledEvent {
    pub time:  SimTime,
    /// Insertion sequence number; breaks ties between equal times.
    pub seq:   u64,
    pub event: Event,
}

impl std::fmt::Display for ScheduledEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.event {
            Event::Arrival(u) => write!(f, "{} #{} arrival {}", self.time, self.seq, u),
            Event::ServiceComplete { job, radiologist } => {
                write!(f, "{} #{} complete {} by {}", self.time, self.seq, job, radiologist)
            }
        }
    }
}
