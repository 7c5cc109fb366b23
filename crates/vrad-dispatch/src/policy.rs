//! The `DispatchPolicy` trait — the extension point for matching rules.

use vrad_core::{Job, RadiologistId, Urgency};
use vrad_pool::{Capability, Radiologist, RadiologistPool};

use crate::WaitLists;

/// Pluggable job/radiologist matching.
///
/// Only [`can_serve`][Self::can_serve] and [`name`][Self::name] are
/// required.  The two selection hooks have defaults that implement strict
/// urgency priority with FIFO order inside a class, generalists preferred,
/// lowest id on ties.
///
/// # Example
///
/// ```rust,ignore
/// struct SpecialistsOnly;
///
/// impl DispatchPolicy for SpecialistsOnly {
///     fn name(&self) -> &'static str { "specialists-only" }
///     fn can_serve(&self, cap: Capability, _u: Urgency) -> bool {
///         cap == Capability::Specialist
///     }
/// }
/// ```
pub trait DispatchPolicy {
    /// Short label for logs and run summaries.
    fn name(&self) -> &'static str;

    /// Whether a radiologist of `capability` may read an image of `urgency`.
    fn can_serve(&self, capability: Capability, urgency: Urgency) -> bool;

    /// Choose an idle radiologist for a newly arrived `job`.
    ///
    /// `None` sends the job to its class's wait list.
    fn select_server(&self, job: &Job, pool: &RadiologistPool) -> Option<RadiologistId> {
        pool.find_available(job.urgency, |cap, urgency| self.can_serve(cap, urgency))
    }

    /// Choose the class whose oldest waiting job `server` reads next.
    ///
    /// Classes are scanned most urgent first; `None` leaves the radiologist
    /// idle.
    fn select_next_job(&self, server: &Radiologist, waiting: &WaitLists) -> Option<Urgency> {
        Urgency::ALL
            .into_iter()
            .find(|&u| !waiting.is_empty_for(u) && self.can_serve(server.capability, u))
    }
}
