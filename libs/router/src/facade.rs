//! Query facade
//!
//! External entry points of the routing engine. Validates caller input,
//! resolves eligibility and composes the optimizer and the multi-hop
//! router. Every computation reads only the snapshot captured at
//! construction; queries are pure and can be abandoned at any point.

use crate::multihop;
use crate::optimizer;
use crate::registry::VenueRegistry;
use splitswap_amm::VenueQuote;
use splitswap_types::{MultiSwapQuote, RequestError, SwapQuote, Token, VenueFlags};
use tracing::debug;

/// The aggregator over one immutable venue-state snapshot.
#[derive(Debug, Clone)]
pub struct Aggregator {
    registry: VenueRegistry,
}

impl Aggregator {
    pub fn new(venues: Vec<splitswap_types::VenueState>) -> Self {
        Self {
            registry: VenueRegistry::new(venues),
        }
    }

    pub fn registry(&self) -> &VenueRegistry {
        &self.registry
    }

    /// Single-hop split optimization: the best allocation of `amount_in`
    /// into `parts` discrete units across the venues `flags` leaves
    /// eligible.
    pub fn get_expected_return(
        &self,
        token_in: &Token,
        token_out: &Token,
        amount_in: u128,
        parts: u64,
        flags: VenueFlags,
    ) -> Result<SwapQuote, RequestError> {
        if parts == 0 {
            return Err(RequestError::ZeroParts);
        }
        if token_in == token_out {
            return Err(RequestError::SameToken);
        }
        debug!(%token_in, %token_out, amount_in, parts, %flags, "single-hop quote");

        let eligible = self.registry.eligible(flags);
        Ok(optimizer::optimize(
            &eligible,
            token_in,
            token_out,
            amount_in,
            parts,
            self.registry.len(),
            0,
        ))
    }

    /// Multi-hop optimization along `path` with per-hop parts, flags and
    /// gas-adjustment terms.
    ///
    /// `gas_adjustment[h]` is a venue-activation cost in hop-`h` output
    /// token units, subtracted from marginal returns before that hop's
    /// allocation runs — the only place gas cost may influence a
    /// distribution.
    pub fn get_expected_return_with_gas_multi(
        &self,
        path: &[Token],
        amount_in: u128,
        parts_per_hop: &[u64],
        flags_per_hop: &[VenueFlags],
        gas_adjustment: &[u128],
    ) -> Result<MultiSwapQuote, RequestError> {
        if path.len() < 2 {
            return Err(RequestError::EmptyPath(path.len()));
        }
        let hops = path.len() - 1;
        for (what, len) in [
            ("parts_per_hop", parts_per_hop.len()),
            ("flags_per_hop", flags_per_hop.len()),
            ("gas_adjustment", gas_adjustment.len()),
        ] {
            if len != hops {
                return Err(RequestError::LengthMismatch {
                    what,
                    expected: hops,
                    actual: len,
                });
            }
        }
        if parts_per_hop.iter().any(|&p| p == 0) {
            return Err(RequestError::ZeroParts);
        }
        if path.windows(2).any(|w| w[0] == w[1]) {
            return Err(RequestError::SameToken);
        }
        debug!(hops, amount_in, "multi-hop quote");

        Ok(MultiSwapQuote {
            hops: multihop::route(
                &self.registry,
                path,
                amount_in,
                parts_per_hop,
                flags_per_hop,
                gas_adjustment,
            ),
        })
    }

    /// Diagnostic curve: every registered venue's raw return at the full
    /// `amount_in`, positionally aligned with the registry; ineligible or
    /// dry venues report 0. No distribution is computed.
    pub fn calculate_curve(
        &self,
        token_in: &Token,
        token_out: &Token,
        amount_in: u128,
        parts: u64,
        flags: VenueFlags,
    ) -> Result<Vec<u128>, RequestError> {
        if parts == 0 {
            return Err(RequestError::ZeroParts);
        }
        if token_in == token_out {
            return Err(RequestError::SameToken);
        }

        Ok(self
            .registry
            .venues()
            .iter()
            .map(|venue| {
                if flags.disables(venue.disable_mask()) {
                    0
                } else {
                    venue.quote(token_in, token_out, amount_in)
                }
            })
            .collect())
    }
}
