//! Built-in dispatch policies.

use vrad_core::Urgency;
use vrad_pool::Capability;

use crate::DispatchPolicy;

/// Default policy: every radiologist may read every class.
///
/// Because [`RadiologistPool::find_available`][vrad_pool::RadiologistPool::find_available]
/// prefers idle generalists, specialists are only pulled onto a new arrival
/// when no generalist is free.
#[derive(Copy, Clone, Debug, Default)]
pub struct GeneralistFirst;

impl DispatchPolicy for GeneralistFirst {
    fn name(&self) -> &'static str {
        "generalist-first"
    }

    fn can_serve(&self, _capability: Capability, _urgency: Urgency) -> bool {
        true
    }
}

/// Stricter variant: stat images may only be read by specialists.
///
/// Generalists still read urgent and routine work.  With no specialists on
/// the roster, stat images are never served and end the run unfinished.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpecialistsForUrgent;

impl DispatchPolicy for SpecialistsForUrgent {
    fn name(&self) -> &'static str {
        "specialists-for-urgent"
    }

    fn can_serve(&self, capability: Capability, urgency: Urgency) -> bool {
        urgency != Urgency::Stat || capability == Capability::Specialist
    }
}
