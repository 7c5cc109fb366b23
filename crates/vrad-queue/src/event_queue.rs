//! `EventQueue` — the future event list.
//!
//! `BTreeMap` gives O(log E) insert and O(log E) pop where E is the number of
//! pending events.  In this model E is small and bounded: at most one pending
//! arrival per urgency class plus one completion per busy radiologist.

use std::collections::BTreeMap;

use vrad_core::SimTime;

use crate::{Event, QueueError, QueueResult, ScheduledEvent};

/// Priority queue of events ordered by `(scheduled_time, insertion order)`.
#[derive(Default)]
pub struct EventQueue {
    inner:       BTreeMap<(SimTime, u64), Event>,
    next_seq:    u64,
    /// Time of the most recently popped event; nothing may be scheduled
    /// earlier than this.
    last_popped: SimTime,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `time`.  Returns its sequence number.
    ///
    /// Fails with [`QueueError::CausalityViolation`] if `time` is earlier
    /// than the last popped event, and with [`QueueError::NonFiniteTime`]
    /// for NaN or infinite times.
    pub fn schedule(&mut self, time: SimTime, event: Event) -> QueueResult<u64> {
        if !time.is_finite() {
            return Err(QueueError::NonFiniteTime(time));
        }
        if time < self.last_popped {
            return Err(QueueError::CausalityViolation {
                scheduled: time,
                now:       self.last_popped,
            });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner.insert((time, seq), event);
        Ok(seq)
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop_next(&mut self) -> Option<ScheduledEvent> {
        let ((time, seq), event) = self.inner.pop_first()?;
        self.last_popped = time;
        Some(ScheduledEvent { time, seq, event })
    }

    /// When the next event fires, without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(time, _)| time)
    }

    /// Time of the last popped event (`SimTime::ZERO` before the first pop).
    pub fn last_popped(&self) -> SimTime {
        self.last_popped
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
