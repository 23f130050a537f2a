//! Venue state snapshots
//!
//! A venue is one liquidity source with its own pricing formula. Venue kinds
//! form a closed tagged variant: adding a kind means adding a variant and a
//! pricing arm, never runtime registration of arbitrary code. State is an
//! immutable snapshot captured by the caller at query entry; nothing in the
//! engine mutates it.

use crate::flags::{
    FLAG_DISABLE_ALL_SPLIT_SOURCES, FLAG_DISABLE_CURVE_ALL, FLAG_DISABLE_PANCAKESWAP_V2_ALL,
};
use crate::token::Token;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Fee denominator: fees are expressed in basis points (30 = 0.3%).
pub const FEE_DENOMINATOR_BPS: u32 = 10_000;

/// Venue family identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueKind {
    /// x*y=k two-token pool
    ConstantProduct,
    /// Curve-style amplified stable-asset pool
    StableSwap,
}

/// Immutable snapshot of a single venue's market state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VenueState {
    ConstantProduct {
        /// Human-readable venue name for diagnostics
        name: String,
        tokens: [Token; 2],
        reserves: [u128; 2],
        fee_bps: u32,
    },
    StableSwap {
        name: String,
        tokens: Vec<Token>,
        balances: Vec<u128>,
        /// Amplification coefficient A (not pre-multiplied by n^n)
        amplification: u64,
        /// Per-token rate multipliers scaling raw balances into a common
        /// 1e18 unit (10^(18 - decimals) for plain tokens)
        rates: Vec<U256>,
        fee_bps: u32,
    },
}

impl VenueState {
    /// Convenience constructor for a two-token constant-product pool.
    pub fn constant_product(
        name: impl Into<String>,
        tokens: [Token; 2],
        reserves: [u128; 2],
        fee_bps: u32,
    ) -> Self {
        debug_assert!(fee_bps < FEE_DENOMINATOR_BPS);
        VenueState::ConstantProduct {
            name: name.into(),
            tokens,
            reserves,
            fee_bps,
        }
    }

    /// Convenience constructor for a stable-swap pool with rates derived
    /// from token decimals (rate = 10^(18 - decimals)).
    pub fn stable_swap(
        name: impl Into<String>,
        tokens: Vec<Token>,
        balances: Vec<u128>,
        amplification: u64,
        fee_bps: u32,
    ) -> Self {
        debug_assert!(fee_bps < FEE_DENOMINATOR_BPS);
        debug_assert_eq!(tokens.len(), balances.len());
        let rates = tokens
            .iter()
            .map(|t| U256::from(10u128).pow(U256::from(18u32.saturating_sub(t.decimals() as u32))))
            .collect();
        VenueState::StableSwap {
            name: name.into(),
            tokens,
            balances,
            amplification,
            rates,
            fee_bps,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VenueState::ConstantProduct { name, .. } => name,
            VenueState::StableSwap { name, .. } => name,
        }
    }

    pub fn kind(&self) -> VenueKind {
        match self {
            VenueState::ConstantProduct { .. } => VenueKind::ConstantProduct,
            VenueState::StableSwap { .. } => VenueKind::StableSwap,
        }
    }

    pub fn fee_bps(&self) -> u32 {
        match self {
            VenueState::ConstantProduct { fee_bps, .. } => *fee_bps,
            VenueState::StableSwap { fee_bps, .. } => *fee_bps,
        }
    }

    /// Fixed bit-to-venue mapping: the flag bits whose presence in a request
    /// makes this venue ineligible.
    pub fn disable_mask(&self) -> u64 {
        let family = match self.kind() {
            VenueKind::ConstantProduct => FLAG_DISABLE_PANCAKESWAP_V2_ALL,
            VenueKind::StableSwap => FLAG_DISABLE_CURVE_ALL,
        };
        family | FLAG_DISABLE_ALL_SPLIT_SOURCES
    }

    /// Position of `token` in this venue's token list, if traded here.
    pub fn token_index(&self, token: &Token) -> Option<usize> {
        match self {
            VenueState::ConstantProduct { tokens, .. } => {
                tokens.iter().position(|t| t == token)
            }
            VenueState::StableSwap { tokens, .. } => tokens.iter().position(|t| t == token),
        }
    }

    /// Raw reserve of `token`, or `None` when the venue does not carry it.
    pub fn reserve_of(&self, token: &Token) -> Option<u128> {
        let idx = self.token_index(token)?;
        match self {
            VenueState::ConstantProduct { reserves, .. } => Some(reserves[idx]),
            VenueState::StableSwap { balances, .. } => Some(balances[idx]),
        }
    }

    /// True when both tokens are present with non-zero reserves.
    pub fn covers_pair(&self, token_in: &Token, token_out: &Token) -> bool {
        token_in != token_out
            && self.reserve_of(token_in).is_some_and(|r| r > 0)
            && self.reserve_of(token_out).is_some_and(|r| r > 0)
    }
}
