//! `vrad-queue` — the discrete events and the queue that orders them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`event`]       | `Event`, `ScheduledEvent`                             |
//! | [`event_queue`] | `EventQueue` (`BTreeMap<(SimTime, seq), Event>`)      |
//! | [`error`]       | `QueueError`, `QueueResult<T>`                        |
//!
//! # Ordering model
//!
//! Events are keyed by `(scheduled_time, sequence)`.  The sequence number is
//! assigned at `schedule` time and only ever increases, so two events at the
//! same instant pop in the order they were scheduled.  Replays with the same
//! seed therefore process events in exactly the same order.

pub mod error;
pub mod event;
pub mod event_queue;


pub use error::{QueueError, QueueResult};
pub use event::{Event, ScheduledEvent};
pub use event_queue::EventQueue;
