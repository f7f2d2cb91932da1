use serde::{Deserialize, Serialize};

/// Days between placing a reorder and receiving stock.
///
/// Owned and persisted by the caller; this engine only clamps it to the
/// supported range at the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadTime(u32);

impl LeadTime {
    pub const MIN_DAYS: u32 = 1;
    pub const MAX_DAYS: u32 = 30;
    pub const DEFAULT_DAYS: u32 = 7;

    /// Clamp an operator-supplied value into the supported 1..=30 range.
    ///
    /// Out-of-range input is a caller configuration problem, not an engine
    /// failure; surfacing it to the operator is the caller's job.
    pub fn clamped(days: u32) -> Self {
        Self(days.clamp(Self::MIN_DAYS, Self::MAX_DAYS))
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl Default for LeadTime {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl core::fmt::Display for LeadTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}d", self.0)
    }
}
