use thiserror::Error;
use vrad_core::SimTime;

#[derive(Debug, Error)]
pub enum QueueError {
    /// An event was scheduled before the last popped event.  This is an
    /// engine bug, never a user error; the run is aborted.
    #[error("causality violation: event scheduled at {scheduled} but the clock is already at {now}")]
    CausalityViolation { scheduled: SimTime, now: SimTime },

    #[error("event scheduled at non-finite time {0:?}")]
    NonFiniteTime(SimTime),
}

pub type QueueResult<T> = Result<T, QueueError>;
