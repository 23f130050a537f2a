//! # Splitswap AMM Library - Exact Venue Pricing
//!
//! Stateless pricing for every supported venue kind, over raw integer token
//! units with U256 intermediates. The single entry point is
//! [`VenueQuote::quote`], a closed dispatch over the venue variant.
//!
//! ## Failure policy
//!
//! Pricing is total: a venue that does not carry the requested pair, has a
//! drained reserve, or whose solver fails to converge contributes a zero
//! quote. Errors never cross this boundary — the aggregate query must keep
//! working when one venue is sick.

pub mod constant_product;
pub mod stable_swap;

use splitswap_types::{Token, VenueState};
use tracing::warn;

pub use stable_swap::SolverError;

/// Unified pricing interface over venue snapshots.
pub trait VenueQuote {
    /// Expected output of swapping `amount_in` of `token_in` for `token_out`
    /// on this venue. Total: returns 0 instead of failing.
    fn quote(&self, token_in: &Token, token_out: &Token, amount_in: u128) -> u128;
}

impl VenueQuote for VenueState {
    fn quote(&self, token_in: &Token, token_out: &Token, amount_in: u128) -> u128 {
        if amount_in == 0 || !self.covers_pair(token_in, token_out) {
            return 0;
        }
        match self {
            VenueState::ConstantProduct {
                tokens,
                reserves,
                fee_bps,
                ..
            } => {
                let i = match tokens.iter().position(|t| t == token_in) {
                    Some(i) => i,
                    None => return 0,
                };
                constant_product::get_amount_out(
                    amount_in,
                    reserves[i],
                    reserves[1 - i],
                    *fee_bps,
                )
            }
            VenueState::StableSwap {
                name,
                tokens,
                balances,
                amplification,
                rates,
                fee_bps,
            } => {
                let (i, j) = match (
                    tokens.iter().position(|t| t == token_in),
                    tokens.iter().position(|t| t == token_out),
                ) {
                    (Some(i), Some(j)) => (i, j),
                    _ => return 0,
                };
                match stable_swap::get_dy(balances, rates, *amplification, i, j, amount_in, *fee_bps)
                {
                    Ok(dy) => dy,
                    Err(err) => {
                        warn!(venue = %name, %err, "stable-swap pricing failed, venue degrades to no liquidity");
                        0
                    }
                }
            }
        }
    }
}
