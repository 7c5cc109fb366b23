//! `vrad-sim` — event loop orchestrator for the vrad triage simulator.
//!
//! # Event loop
//!
//! ```text
//! Initialized:  schedule the first Arrival of each urgency class
//! Running:      while clock < sim_duration
//!   pop earliest event, advance clock
//!   Arrival(u)            → schedule next Arrival(u) if still before the horizon
//!                           create Job; policy.select_server → start read or wait
//!   ServiceComplete(j, r) → complete j, release r
//!                           policy.select_next_job(r) → start next read or idle
//! Draining:     no new arrivals; keep going until the queue empties or the
//!               next event is at/after sim_duration × cutoff_multiplier
//! Terminated:   completed jobs in completion order + unfinished jobs
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vrad_core::SimulationParameters;
//!
//! let result = vrad_sim::run(SimulationParameters::default())?;
//! for row in result.job_table() {
//!     println!("{row:?}");
//! }
//! ```
//!
//! For a non-default dispatch policy or custom observers, go through
//! [`EngineBuilder`] and [`SimulationEngine::run`].

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod result;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::{Phase, SimulationEngine};
pub use error::{SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, SimObserver};
pub use result::{ClassSummary, JOB_TABLE_COLUMNS, JobRow, RunSummary, SimulationResult, TerminationReason};

use vrad_core::SimulationParameters;

/// Run one simulation with the default dispatch policy.
///
/// This is the single entry point the dashboard calls per "Run Simulation"
/// action.  Parameters are validated first; an invalid set returns
/// [`SimError::InvalidParameter`] and nothing runs.  With
/// `params.verbose` set, every event is logged at `info` level.
pub fn run(params: SimulationParameters) -> SimResult<SimulationResult> {
    let verbose = params.verbose;
    let mut engine = EngineBuilder::new(params).build()?;
    engine.run(&mut LogObserver::new(verbose))
}
