//! Venue-disable flag bitmask
//!
//! These constants are part of the public query interface and MUST remain
//! stable across releases: callers encode flag words against this exact
//! numbering, and a silently renumbered bit would flip which venues a stored
//! request disables.
//!
//! A venue is eligible for a query iff none of the bits in its disable mask
//! are set in the request flags. Each venue's mask is the union of the
//! all-sources bit and its family bit, so setting every constant below
//! disables every registered venue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Disables every split-routing source at once.
pub const FLAG_DISABLE_ALL_SPLIT_SOURCES: u64 = 0x2000_0000;

/// Disables every wrap-style source (native-currency wrappers). No wrap
/// sources are registered by the core engine; the bit is reserved so flag
/// words produced for the full system remain meaningful here.
pub const FLAG_DISABLE_ALL_WRAP_SOURCES: u64 = 0x4000_0000;

/// Disables the whole stable-swap (curve-style) venue family.
pub const FLAG_DISABLE_CURVE_ALL: u64 = 0x2000_0000_0000;

/// Disables the whole constant-product (pancake-style) venue family.
pub const FLAG_DISABLE_PANCAKESWAP_V2_ALL: u64 = 0x4000_0000_0000;

/// An integer bitmask selecting which venues are eligible for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueFlags(pub u64);

impl VenueFlags {
    /// No bits set: every registered venue is eligible.
    pub const NONE: VenueFlags = VenueFlags(0);

    /// Every documented disable bit set; must yield a zero quote.
    pub fn disable_everything() -> Self {
        VenueFlags(
            FLAG_DISABLE_ALL_SPLIT_SOURCES
                | FLAG_DISABLE_ALL_WRAP_SOURCES
                | FLAG_DISABLE_CURVE_ALL
                | FLAG_DISABLE_PANCAKESWAP_V2_ALL,
        )
    }

    /// True when any bit in `mask` is set in this flag word.
    pub fn disables(&self, mask: u64) -> bool {
        self.0 & mask != 0
    }
}

impl From<u64> for VenueFlags {
    fn from(bits: u64) -> Self {
        VenueFlags(bits)
    }
}

impl BitOr for VenueFlags {
    type Output = VenueFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        VenueFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for VenueFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
