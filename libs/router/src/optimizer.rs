//! Distribution optimizer
//!
//! Splits an input amount into `parts` discrete units and allocates them
//! across venues to maximize total output. Because every venue's return is
//! concave in its input, the marginal-return table of each venue is
//! non-increasing, and an exact dynamic program over venues × parts finds
//! the optimal allocation in O(N·parts²).

use primitive_types::U256;
use splitswap_amm::VenueQuote;
use splitswap_types::{SwapQuote, Token, VenueState};
use tracing::trace;

/// The `k`-parts input amount: `amount * k / parts`, mul-first so the
/// division remainder is spread across the table instead of dropped, and
/// `k == parts` always prices the exact full amount.
fn part_amount(amount: u128, k: u64, parts: u64) -> u128 {
    (U256::from(amount) * U256::from(k) / U256::from(parts))
        .try_into()
        .unwrap_or(0)
}

/// Optimal split of `amount_in` across the eligible venues.
///
/// `eligible` carries `(canonical position, venue)` pairs from the registry;
/// the returned distribution always has `registered_len` entries with zeros
/// at ineligible positions. `gas_cost` is a per-venue activation cost in
/// output-token units, subtracted from every non-empty marginal entry before
/// the allocation runs (saturating — a venue that cannot cover it prices as
/// empty).
pub fn optimize(
    eligible: &[(usize, &VenueState)],
    token_in: &Token,
    token_out: &Token,
    amount_in: u128,
    parts: u64,
    registered_len: usize,
    gas_cost: u128,
) -> SwapQuote {
    if eligible.is_empty() || amount_in == 0 || parts == 0 {
        return SwapQuote::zero(registered_len);
    }

    // Marginal tables, pruning venues that cannot price the pair at all.
    // Each venue's table is independent of every other's.
    let mut positions = Vec::new();
    let mut tables: Vec<Vec<u128>> = Vec::new();
    for (position, venue) in eligible {
        if venue.quote(token_in, token_out, amount_in) == 0 {
            continue;
        }
        let mut table = Vec::with_capacity(parts as usize + 1);
        table.push(0);
        for k in 1..=parts {
            let raw = venue.quote(token_in, token_out, part_amount(amount_in, k, parts));
            table.push(raw.saturating_sub(gas_cost));
        }
        positions.push(*position);
        tables.push(table);
    }

    if tables.is_empty() {
        return SwapQuote::zero(registered_len);
    }

    let n = tables.len();
    let p = parts as usize;

    // dp[j] = best return with the venues considered so far and exactly j
    // parts spent; None marks an infeasible cell. choices[i][j] remembers
    // the winning k so the allocation can be recovered.
    let mut dp: Vec<Option<u128>> = vec![None; p + 1];
    dp[0] = Some(0);
    let mut choices = vec![vec![0u64; p + 1]; n];

    for (i, table) in tables.iter().enumerate() {
        let mut next: Vec<Option<u128>> = vec![None; p + 1];
        for j in 0..=p {
            // Scanning k ascending with a strict comparison keeps the
            // smallest k on ties, which leaves parts with lower-indexed
            // venues: the deterministic tie-break.
            for k in 0..=j {
                if let Some(prev) = dp[j - k] {
                    let candidate = prev.saturating_add(table[k]);
                    if next[j].map_or(true, |best| candidate > best) {
                        next[j] = Some(candidate);
                        choices[i][j] = k as u64;
                    }
                }
            }
        }
        dp = next;
    }

    let return_amount = dp[p].unwrap_or(0);

    // Backtrack the winning k per venue.
    let mut distribution = vec![0u64; registered_len];
    let mut remaining = p;
    for i in (0..n).rev() {
        let k = choices[i][remaining];
        distribution[positions[i]] = k;
        remaining -= k as usize;
    }
    debug_assert_eq!(remaining, 0);

    trace!(
        venues = n,
        parts,
        return_amount,
        "distribution optimization complete"
    );

    SwapQuote {
        return_amount,
        distribution,
    }
}
