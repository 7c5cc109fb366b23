//! Random interarrival and service durations.
//!
//! The engine only ever asks a [`VariateSource`] for durations, so tests can
//! substitute a scripted source and pin exact timings.  The production source
//! is [`VariateGenerator`]: exponential draws with a per-class mean.

use rand_distr::{Distribution, Exp};

use crate::{CoreError, CoreResult, SimRng, SimulationParameters, Urgency};

/// Supplies strictly positive durations, in minutes.
pub trait VariateSource {
    /// Time until the next arrival of `urgency`.
    fn draw_interarrival(&mut self, urgency: Urgency) -> f64;

    /// Reading time for one image of `urgency`.
    fn draw_service(&mut self, urgency: Urgency) -> f64;
}

/// One exponential stream with its own RNG.
struct ExpStream {
    rng:  SimRng,
    dist: Exp<f64>,
}

impl ExpStream {
    fn new(rng: SimRng, name: &'static str, mean: f64) -> CoreResult<Self> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(CoreError::invalid(name, format!("mean must be > 0, got {mean}")));
        }
        let dist = Exp::new(1.0 / mean)
            .map_err(|e| CoreError::invalid(name, format!("mean {mean}: {e}")))?;
        Ok(Self { rng, dist })
    }

    #[inline]
    fn draw(&mut self) -> f64 {
        // An exact 0.0 is possible in principle; keep durations strictly positive.
        self.dist.sample(self.rng.inner()).max(f64::MIN_POSITIVE)
    }
}

/// Seeded exponential variates, one independent stream per (class, kind).
pub struct VariateGenerator {
    arrivals: [ExpStream; 3],
    services: [ExpStream; 3],
}

impl VariateGenerator {
    /// Build the six streams from a master `seed`.
    ///
    /// Fails with [`CoreError::InvalidParameter`] if any mean is not a
    /// positive finite number.
    pub fn new(seed: u64, arrival_mean: [f64; 3], service_mean: [f64; 3]) -> CoreResult<Self> {
        let mut root = SimRng::new(seed);
        // Child order is part of the reproducibility contract: arrivals 0..3,
        // then services 3..6.
        let arrival_rngs = [root.child(0), root.child(1), root.child(2)];
        let service_rngs = [root.child(3), root.child(4), root.child(5)];

        let [a0, a1, a2] = arrival_rngs;
        let [s0, s1, s2] = service_rngs;
        Ok(Self {
            arrivals: [
                ExpStream::new(a0, "arrival_mean", arrival_mean[0])?,
                ExpStream::new(a1, "arrival_mean", arrival_mean[1])?,
                ExpStream::new(a2, "arrival_mean", arrival_mean[2])?,
            ],
            services: [
                ExpStream::new(s0, "service_mean", service_mean[0])?,
                ExpStream::new(s1, "service_mean", service_mean[1])?,
                ExpStream::new(s2, "service_mean", service_mean[2])?,
            ],
        })
    }

    pub fn from_params(params: &SimulationParameters) -> CoreResult<Self> {
        Self::new(params.seed, params.arrival_mean, params.service_mean)
    }
}

impl VariateSource for VariateGenerator {
    #[inline]
    fn draw_interarrival(&mut self, urgency: Urgency) -> f64 {
        self.arrivals[urgency.index()].draw()
    }

    #[inline]
    fn draw_service(&mut self, urgency: Urgency) -> f64 {
        self.services[urgency.index()].draw()
    }
}
