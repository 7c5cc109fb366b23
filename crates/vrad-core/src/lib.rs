//! `vrad-core` — foundational types for the `vrad` teleradiology triage
//! simulator.
//!
//! This crate is a dependency of every other `vrad-*` crate.  It has no
//! `vrad-*` dependencies and minimal external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `JobId`, `RadiologistId`                                |
//! | [`time`]      | `SimTime` (minutes), `SimClock`                         |
//! | [`urgency`]   | `Urgency` class enum (1 = most urgent)                  |
//! | [`params`]    | `SimulationParameters` and validation                   |
//! | [`job`]       | `Job` — one image moving through the system             |
//! | [`rng`]       | `SimRng` and child-stream derivation                    |
//! | [`variates`]  | `VariateSource` trait, `VariateGenerator` (exponential) |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public data types (JSON)  |

pub mod error;
pub mod ids;
pub mod job;
pub mod params;
pub mod rng;
pub mod time;
pub mod urgency;
pub mod variates;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{JobId, RadiologistId};
pub use job::Job;
pub use params::{CUTOFF_MULTIPLIERS, SimulationParameters};
pub use rng::SimRng;
pub use time::{SimClock, SimTime};
pub use urgency::Urgency;
pub use variates::{VariateGenerator, VariateSource};
