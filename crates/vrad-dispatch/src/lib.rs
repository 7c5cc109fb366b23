//! `vrad-dispatch` — who reads which image, and in what order.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`policy`]     | `DispatchPolicy` trait                                     |
//! | [`wait_lists`] | `WaitLists` — one FIFO per urgency class                   |
//! | [`policies`]   | `GeneralistFirst` (default), `SpecialistsForUrgent`        |
//!
//! # Design notes
//!
//! The engine owns all mutable state.  A policy only *reads* the pool and
//! the wait lists and answers two questions:
//!
//! 1. **Arrival**: which idle radiologist, if any, takes this new job now?
//! 2. **Completion**: which waiting class should the freed radiologist pull
//!    from next?
//!
//! The engine applies the answer.  Keeping policies read-only means they can
//! be swapped or property-tested without running the event loop.
//!
//! Priority is strict by urgency class with no preemption: a read in
//! progress is never interrupted by a more urgent arrival.

pub mod policies;
pub mod policy;
pub mod wait_lists;


pub use policies::{GeneralistFirst, SpecialistsForUrgent};
pub use policy::DispatchPolicy;
pub use wait_lists::WaitLists;
