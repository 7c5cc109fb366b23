//! Fluent builder for constructing a [`SimulationEngine`].

use log::{debug, warn};
use vrad_core::{SimClock, SimulationParameters, Urgency, VariateGenerator, VariateSource};
use vrad_dispatch::{DispatchPolicy, GeneralistFirst, WaitLists};
use vrad_pool::RadiologistPool;
use vrad_queue::EventQueue;

use crate::{Phase, SimResult, SimulationEngine};

/// Fluent builder for [`SimulationEngine<P, V>`].
///
/// # Required inputs
///
/// - [`SimulationParameters`] — validated in [`build`](Self::build).
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                                  |
/// |-------------------------------|------------------------------------------|
/// | `.policy(p)`                  | [`GeneralistFirst`]                      |
/// | `.build_with_variates(v)`     | [`VariateGenerator`] seeded from params  |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(params)
///     .policy(SpecialistsForUrgent)
///     .build()?;
/// let result = engine.run(&mut NoopObserver)?;
/// ```
pub struct EngineBuilder<P: DispatchPolicy> {
    params: SimulationParameters,
    policy: P,
}

impl EngineBuilder<GeneralistFirst> {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params, policy: GeneralistFirst }
    }
}

impl<P: DispatchPolicy> EngineBuilder<P> {
    /// Swap in a different dispatch policy.
    pub fn policy<Q: DispatchPolicy>(self, policy: Q) -> EngineBuilder<Q> {
        EngineBuilder { params: self.params, policy }
    }

    /// Validate parameters and build an engine with seeded exponential
    /// variates.
    pub fn build(self) -> SimResult<SimulationEngine<P, VariateGenerator>> {
        self.params.validate()?;
        let variates = VariateGenerator::from_params(&self.params)?;
        self.build_with_variates(variates)
    }

    /// Validate parameters and build an engine that draws durations from
    /// `variates` instead of the seeded generator.
    pub fn build_with_variates<V: VariateSource>(
        self,
        variates: V,
    ) -> SimResult<SimulationEngine<P, V>> {
        self.params.validate()?;

        let pool = RadiologistPool::from_params(&self.params);
        for urgency in Urgency::ALL {
            if !pool.iter().any(|r| self.policy.can_serve(r.capability, urgency)) {
                warn!(
                    "policy {} leaves no radiologist able to read {urgency} images; they will never be served",
                    self.policy.name()
                );
            }
        }
        debug!(
            "engine built: {} radiologists ({} specialists), policy {}, horizon {} min, cutoff x{}",
            pool.len(),
            pool.specialist_count(),
            self.policy.name(),
            self.params.sim_duration,
            self.params.cutoff_multiplier,
        );

        Ok(SimulationEngine {
            clock:            SimClock::new(),
            phase:            Phase::Initialized,
            queue:            EventQueue::new(),
            waiting:          WaitLists::new(),
            jobs:             Vec::new(),
            completed:        Vec::new(),
            events_processed: 0,
            pool,
            params:           self.params,
            policy:           self.policy,
            variates,
        })
    }
}
