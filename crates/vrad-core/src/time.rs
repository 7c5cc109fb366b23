//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous and measured in **minutes** from the start of the run.
//! `SimTime` wraps an `f64` and is totally ordered (via `f64::total_cmp`) so
//! it can key a `BTreeMap` directly.  Only finite values are ever produced by
//! the engine; the event queue rejects anything else at the door.
//!
//! The clock only moves when an event is processed, never by a fixed step.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation instant, in minutes since the run started.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Minutes elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// Scale a horizon, e.g. `sim_duration × cutoff_multiplier`.
    #[inline]
    pub fn scaled(self, factor: f64) -> SimTime {
        SimTime(self.0 * factor)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The engine's clock.  Advanced to each event's scheduled time as the event
/// is popped; never moves backwards.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.
    ///
    /// # Panics
    /// Panics in debug mode if `t` is earlier than the current time.  The
    /// event queue guarantees this cannot happen for popped events.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        debug_assert!(t >= self.now, "clock moved backwards: {} -> {}", self.now, t);
        self.now = t;
    }

    /// Break elapsed time into (hours, minutes) for human-readable logging.
    pub fn elapsed_hm(&self) -> (u64, u32) {
        let total = self.now.0.max(0.0) as u64;
        (total / 60, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.elapsed_hm();
        write!(f, "{} ({:02}h{:02})", self.now, h, m)
    }
}
