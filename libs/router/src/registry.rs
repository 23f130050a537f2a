//! Venue registry with flag-based eligibility
//!
//! Venues keep their registration order; distribution vectors index into
//! that canonical ordering, so a venue's position is stable no matter which
//! flags a query sets.

use splitswap_types::{VenueFlags, VenueState};

/// Ordered set of registered venues for one market snapshot.
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    venues: Vec<VenueState>,
}

impl VenueRegistry {
    pub fn new(venues: Vec<VenueState>) -> Self {
        Self { venues }
    }

    /// Number of registered venues; the length of every distribution vector.
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn venues(&self) -> &[VenueState] {
        &self.venues
    }

    /// Venues not excluded by `flags`, with their canonical positions.
    ///
    /// The flag word is decoded once per venue against its fixed disable
    /// mask. An empty result is a valid outcome, not an error; downstream
    /// components answer it with a zero quote.
    pub fn eligible(&self, flags: VenueFlags) -> Vec<(usize, &VenueState)> {
        self.venues
            .iter()
            .enumerate()
            .filter(|(_, v)| !flags.disables(v.disable_mask()))
            .collect()
    }
}
