//! Quote result types
//!
//! Pure value types produced by the optimizer. A quote is a function of the
//! request and the venue-state snapshot only; once produced it is never
//! mutated.

use serde::{Deserialize, Serialize};

/// Result of a single-hop split optimization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Expected output in raw units of the destination token
    pub return_amount: u128,
    /// Parts allocated per registered venue, positionally stable across
    /// queries with different flags; sums to the requested parts count
    /// whenever at least one venue was eligible
    pub distribution: Vec<u64>,
}

impl SwapQuote {
    /// Zero quote over `venues` registered venues.
    pub fn zero(venues: usize) -> Self {
        Self {
            return_amount: 0,
            distribution: vec![0; venues],
        }
    }

    pub fn allocated_parts(&self) -> u64 {
        self.distribution.iter().sum()
    }
}

/// Result of a multi-hop route: one quote per hop, in path order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSwapQuote {
    pub hops: Vec<SwapQuote>,
}

impl MultiSwapQuote {
    /// Per-hop output amounts, in path order.
    pub fn return_amounts(&self) -> Vec<u128> {
        self.hops.iter().map(|h| h.return_amount).collect()
    }

    /// Output of the final hop; the amount the whole route yields.
    pub fn final_return(&self) -> u128 {
        self.hops.last().map_or(0, |h| h.return_amount)
    }
}
