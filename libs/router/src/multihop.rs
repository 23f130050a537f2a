//! Multi-hop routing
//!
//! Chains the distribution optimizer along a token path, feeding each hop's
//! output into the next. Hops are optimized independently with their own
//! parts granularity and flag word; the route is not jointly optimized
//! across hops. Hops are sequentially dependent and must run in order.

use crate::optimizer;
use crate::registry::VenueRegistry;
use splitswap_types::{SwapQuote, Token, VenueFlags};

/// Route `amount_in` along `path`, one optimizer pass per hop.
///
/// A zero-return hop does not short-circuit the route: later hops are still
/// evaluated on a zero input so the caller always receives one well-formed
/// quote per hop. The per-hop slices must each hold `path.len() - 1`
/// entries; [`Aggregator`](crate::Aggregator) rejects mismatched lengths
/// with a typed error before calling in here.
pub fn route(
    registry: &VenueRegistry,
    path: &[Token],
    amount_in: u128,
    parts_per_hop: &[u64],
    flags_per_hop: &[VenueFlags],
    gas_per_hop: &[u128],
) -> Vec<SwapQuote> {
    let hop_count = path.len().saturating_sub(1);
    debug_assert_eq!(parts_per_hop.len(), hop_count);
    debug_assert_eq!(flags_per_hop.len(), hop_count);
    debug_assert_eq!(gas_per_hop.len(), hop_count);

    let mut hops = Vec::with_capacity(hop_count);
    let mut amount = amount_in;

    for (h, pair) in path.windows(2).enumerate() {
        let eligible = registry.eligible(flags_per_hop[h]);
        let quote = optimizer::optimize(
            &eligible,
            &pair[0],
            &pair[1],
            amount,
            parts_per_hop[h],
            registry.len(),
            gas_per_hop[h],
        );
        amount = quote.return_amount;
        hops.push(quote);
    }

    hops
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitswap_types::VenueState;

    fn tok(byte: u8) -> Token {
        Token::new([byte; 20], 18)
    }

    fn registry() -> VenueRegistry {
        let (a, b, c) = (tok(1), tok(2), tok(3));
        VenueRegistry::new(vec![
            VenueState::constant_product("a-b", [a, b], [1_000_000, 1_000_000], 30),
            VenueState::constant_product("b-c", [b, c], [1_000_000, 2_000_000], 30),
        ])
    }

    #[test]
    fn each_hop_consumes_the_previous_return() {
        let reg = registry();
        let path = [tok(1), tok(2), tok(3)];
        let hops = route(
            &reg,
            &path,
            10_000,
            &[10, 10],
            &[VenueFlags::NONE, VenueFlags::NONE],
            &[0, 0],
        );
        assert_eq!(hops.len(), 2);
        assert!(hops[0].return_amount > 0);
        // Second hop prices exactly the first hop's output
        let eligible = reg.eligible(VenueFlags::NONE);
        let expected = crate::optimizer::optimize(
            &eligible,
            &tok(2),
            &tok(3),
            hops[0].return_amount,
            10,
            reg.len(),
            0,
        );
        assert_eq!(hops[1], expected);
    }

    #[test]
    fn zero_hop_propagates_without_short_circuit() {
        let reg = registry();
        let path = [tok(1), tok(2), tok(3)];
        let hops = route(
            &reg,
            &path,
            10_000,
            &[10, 10],
            &[VenueFlags::disable_everything(), VenueFlags::NONE],
            &[0, 0],
        );
        assert_eq!(hops.len(), 2);
        assert_eq!(hops[0], SwapQuote::zero(2));
        assert_eq!(hops[1].return_amount, 0);
        assert_eq!(hops[1].distribution, vec![0, 0]);
    }

    #[test]
    #[should_panic]
    fn short_per_hop_slices_are_rejected_in_debug_builds() {
        let reg = registry();
        let path = [tok(1), tok(2), tok(3)];
        route(&reg, &path, 10_000, &[10], &[VenueFlags::NONE], &[0]);
    }
}
