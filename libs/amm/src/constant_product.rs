//! Constant-product (x*y=k) pricing with exact integer arithmetic
//!
//! All amounts are raw token units. Intermediates run in U256 so the
//! mul-then-div never overflows for realistic reserves, and the result is
//! truncated toward zero. Output is monotonically increasing and strictly
//! concave in the input amount, which the distribution optimizer relies on.

use primitive_types::U256;
use splitswap_types::venue::FEE_DENOMINATOR_BPS;

/// Exact output of a constant-product swap.
///
/// `amount_in * (1 - fee) * reserve_out / (reserve_in + amount_in * (1 - fee))`
/// with the fee applied in basis points. Returns 0 for empty input, empty
/// reserves or a malformed fee; a venue with no usable state simply prices
/// as having no liquidity.
pub fn get_amount_out(amount_in: u128, reserve_in: u128, reserve_out: u128, fee_bps: u32) -> u128 {
    if amount_in == 0 || reserve_in == 0 || reserve_out == 0 || fee_bps >= FEE_DENOMINATOR_BPS {
        return 0;
    }

    let fee_den = U256::from(FEE_DENOMINATOR_BPS);
    let amount_with_fee = U256::from(amount_in) * U256::from(FEE_DENOMINATOR_BPS - fee_bps);
    let numerator = amount_with_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * fee_den + amount_with_fee;

    // denominator >= fee_den > 0 here
    let out = numerator / denominator;

    // Output can never exceed the opposing reserve, so this conversion is
    // total for valid u128 reserves.
    out.try_into().unwrap_or(0)
}
