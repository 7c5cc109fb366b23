//! `vrad-pool` — the radiologist roster.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`radiologist`] | `Radiologist`, `Capability`, `RadiologistState`          |
//! | [`pool`]        | `RadiologistPool` (fixed roster, assignment, release)    |
//! | [`error`]       | `PoolError`, `PoolResult<T>`                             |
//!
//! The roster is created once per run and never grows or shrinks.  The first
//! `round(specialist_fraction × num_radiologists)` ids are specialists; the
//! rest are generalists.

pub mod error;
pub mod pool;
pub mod radiologist;


pub use error::{PoolError, PoolResult};
pub use pool::RadiologistPool;
pub use radiologist::{Capability, Radiologist, RadiologistState};
