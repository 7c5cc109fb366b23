//! Run parameters.
//!
//! `SimulationParameters` is a plain value: built once per run (from
//! defaults, a JSON file, or CLI flags), validated, then handed to the engine
//! by value.  Nothing in the simulator reads configuration from anywhere else.

use crate::{CoreError, CoreResult, SimTime, Urgency};

/// Accepted values for [`SimulationParameters::cutoff_multiplier`].
pub const CUTOFF_MULTIPLIERS: [u32; 4] = [1, 2, 4, 8];

/// Everything one simulation run needs.  All durations are in minutes and
/// all per-class arrays are indexed by [`Urgency::index`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    /// Nominal horizon.  No arrivals are generated at or after this time.
    pub sim_duration: f64,

    /// Size of the radiologist roster (fixed for the whole run).
    pub num_radiologists: u32,

    /// Mean time between image arrivals, per class.
    pub arrival_mean: [f64; 3],

    /// Mean time a radiologist spends reading one image, per class.
    pub service_mean: [f64; 3],

    /// SLA on `total_time`, per class.  Breaches are counted, not enforced.
    pub target_time: [f64; 3],

    /// Share of the roster that are specialists, in `[0, 1]`.
    pub specialist_fraction: f64,

    /// Draining continues until `sim_duration × cutoff_multiplier`.
    pub cutoff_multiplier: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Log every event at `info` level.
    pub verbose: bool,

    /// Reserved.  Accepted for compatibility with the dashboard call
    /// signature; has no effect on the run.
    pub constant_rads: bool,
}

impl Default for SimulationParameters {
    /// The dashboard's initial form values: a 5-hour shift, six
    /// radiologists, one image every 2 minutes per class.
    fn default() -> Self {
        Self {
            sim_duration:        5.0 * 60.0,
            num_radiologists:    6,
            arrival_mean:        [2.0, 2.0, 2.0],
            service_mean:        [2.0, 2.0, 2.0],
            target_time:         [30.0, 60.0, 24.0 * 60.0],
            specialist_fraction: 0.4,
            cutoff_multiplier:   2,
            seed:                42,
            verbose:             false,
            constant_rads:       false,
        }
    }
}

impl SimulationParameters {
    /// Check every constraint the engine relies on.
    ///
    /// Called by the engine builder before any state is created, so an
    /// invalid parameter set never starts a run.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.sim_duration.is_finite() && self.sim_duration > 0.0) {
            return Err(CoreError::invalid(
                "sim_duration",
                format!("must be a positive number of minutes, got {}", self.sim_duration),
            ));
        }
        if self.num_radiologists < 1 {
            return Err(CoreError::invalid("num_radiologists", "at least one radiologist is required"));
        }
        check_means("arrival_mean", &self.arrival_mean)?;
        check_means("service_mean", &self.service_mean)?;
        for (urgency, &target) in Urgency::ALL.iter().zip(&self.target_time) {
            if !(target.is_finite() && target >= 0.0) {
                return Err(CoreError::invalid(
                    "target_time",
                    format!("{urgency}: must be >= 0, got {target}"),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.specialist_fraction) {
            return Err(CoreError::invalid(
                "specialist_fraction",
                format!("must lie in [0, 1], got {}", self.specialist_fraction),
            ));
        }
        if !CUTOFF_MULTIPLIERS.contains(&self.cutoff_multiplier) {
            return Err(CoreError::invalid(
                "cutoff_multiplier",
                format!("must be one of {CUTOFF_MULTIPLIERS:?}, got {}", self.cutoff_multiplier),
            ));
        }
        Ok(())
    }

    /// End of the arrival window.
    #[inline]
    pub fn horizon(&self) -> SimTime {
        SimTime(self.sim_duration)
    }

    /// End of the draining window; no event at or after this time is processed.
    #[inline]
    pub fn cutoff_horizon(&self) -> SimTime {
        self.horizon().scaled(self.cutoff_multiplier as f64)
    }

    #[inline]
    pub fn arrival_mean_for(&self, urgency: Urgency) -> f64 {
        self.arrival_mean[urgency.index()]
    }

    #[inline]
    pub fn service_mean_for(&self, urgency: Urgency) -> f64 {
        self.service_mean[urgency.index()]
    }

    #[inline]
    pub fn target_for(&self, urgency: Urgency) -> f64 {
        self.target_time[urgency.index()]
    }

    /// `round(specialist_fraction × num_radiologists)`, halves rounded away
    /// from zero.  Never exceeds the roster size.
    pub fn specialist_count(&self) -> u32 {
        let raw = (self.specialist_fraction.clamp(0.0, 1.0) * self.num_radiologists as f64).round();
        (raw as u32).min(self.num_radiologists)
    }
}

fn check_means(name: &'static str, means: &[f64; 3]) -> CoreResult<()> {
    for (urgency, &mean) in Urgency::ALL.iter().zip(means) {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(CoreError::invalid(name, format!("{urgency}: mean must be > 0, got {mean}")));
        }
    }
    Ok(())
}
