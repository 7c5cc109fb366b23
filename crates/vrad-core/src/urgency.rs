//! Urgency classes shared across all crates.
//!
//! Ordering follows clinical priority: `Stat < Urgent < Routine`, so an
//! ascending sort or a scan over [`Urgency::ALL`] visits the most urgent
//! class first.

/// Priority tier of an image.  Level 1 is the most urgent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Urgency {
    /// Level 1.
    Stat,
    /// Level 2.
    Urgent,
    /// Level 3.
    Routine,
}

impl Urgency {
    /// All classes in dispatch order (most urgent first).
    pub const ALL: [Urgency; 3] = [Urgency::Stat, Urgency::Urgent, Urgency::Routine];

    /// Zero-based position, for indexing per-class `[T; 3]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Urgency::Stat    => 0,
            Urgency::Urgent  => 1,
            Urgency::Routine => 2,
        }
    }

    /// The 1-based level reported in the job table.
    #[inline]
    pub fn level(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_level(level: u8) -> Option<Urgency> {
        match level {
            1 => Some(Urgency::Stat),
            2 => Some(Urgency::Urgent),
            3 => Some(Urgency::Routine),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Stat    => "stat",
            Urgency::Urgent  => "urgent",
            Urgency::Routine => "routine",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.as_str(), self.level())
    }
}
