//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one root `SimRng` seeded from
//! `SimulationParameters::seed`.  Every independent random stream (one per
//! urgency class for arrivals, one per class for service times) is a child
//! derived from the root in a fixed order:
//!
//!   child_seed = root.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.  This
//! means:
//!
//! - Streams never share state, so the number of service draws never shifts
//!   the arrival sequence (common random numbers across staffing levels).
//! - Two runs never share RNG state; parallel runs need no synchronisation.
//! - Nothing in the simulator touches a thread-local or OS RNG.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG handle threaded explicitly through the simulator.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.  Calling this
    /// in the same order from the same root always yields the same children.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distributions.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
