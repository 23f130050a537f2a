//! Stable-swap invariant solver and exchange math
//!
//! Implements the amplified stable-asset invariant
//! `A·n^n·Σx_i + D = A·n^n·D + D^(n+1)/(n^n·Πx_i)` solved by Newton
//! iteration, and the exchange function derived from it. Everything runs in
//! U256 over balances pre-scaled into a common 1e18 unit; the product term
//! D_P is rebuilt iteratively each round so no intermediate needs more than
//! one multiplication before a division.
//!
//! Non-convergence is an explicit, locally-handled signal: the iteration cap
//! matches the gas-bounded loop of on-chain implementations, and exhausting
//! it means the caller should treat the venue as having no liquidity rather
//! than trust a half-converged root.

use primitive_types::U256;
use splitswap_types::venue::FEE_DENOMINATOR_BPS;
use thiserror::Error;

/// Newton iteration cap, matching on-chain stable-swap implementations.
pub const MAX_ITERATIONS: u32 = 255;

/// A venue-local numerical failure. Never surfaced to query callers; the
/// owning adapter degrades the venue to a zero quote.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("newton iteration exhausted {MAX_ITERATIONS} rounds without converging")]
    NonConvergence,
    #[error("arithmetic overflow in invariant computation")]
    Overflow,
}

fn ann(amp: u64, n: usize) -> Result<U256, SolverError> {
    // Ann = amp·n^n feeds an `Ann − 1` term and a `D / Ann` term downstream,
    // so an unamplified snapshot is numerically unusable, not merely flat.
    if amp == 0 {
        return Err(SolverError::Overflow);
    }
    let n_pow_n = U256::from(n).checked_pow(U256::from(n)).ok_or(SolverError::Overflow)?;
    U256::from(amp).checked_mul(n_pow_n).ok_or(SolverError::Overflow)
}

/// Solve for the invariant D of a pool with scaled balances `xp` and
/// amplification coefficient `amp`.
///
/// Starts from `D0 = Σxp` and iterates
/// `D = (Ann·S + n·D_P)·D / ((Ann−1)·D + (n+1)·D_P)` where
/// `D_P = D^(n+1)/(n^n·Πxp)` is recomputed incrementally each round.
/// Converges when consecutive iterates differ by at most one unit.
/// An empty or partially-drained pool has `D = 0` by convention.
pub fn compute_d(xp: &[U256], amp: u64) -> Result<U256, SolverError> {
    let n = xp.len();
    if n == 0 || xp.iter().any(|x| x.is_zero()) {
        return Ok(U256::zero());
    }

    let mut sum = U256::zero();
    for x in xp {
        sum = sum.checked_add(*x).ok_or(SolverError::Overflow)?;
    }
    if sum.is_zero() {
        return Ok(U256::zero());
    }

    let n_u = U256::from(n);
    let ann = ann(amp, n)?;
    let mut d = sum;

    for _ in 0..MAX_ITERATIONS {
        // D_P = D, then D_P = D_P * D / (x * n) per balance
        let mut d_p = d;
        for x in xp {
            let div = x.checked_mul(n_u).ok_or(SolverError::Overflow)?;
            d_p = d_p
                .checked_mul(d)
                .ok_or(SolverError::Overflow)?
                / div;
        }

        let prev = d;
        let numerator = ann
            .checked_mul(sum)
            .ok_or(SolverError::Overflow)?
            .checked_add(d_p.checked_mul(n_u).ok_or(SolverError::Overflow)?)
            .ok_or(SolverError::Overflow)?
            .checked_mul(d)
            .ok_or(SolverError::Overflow)?;
        let denominator = (ann - U256::one())
            .checked_mul(d)
            .ok_or(SolverError::Overflow)?
            .checked_add(
                (n_u + U256::one())
                    .checked_mul(d_p)
                    .ok_or(SolverError::Overflow)?,
            )
            .ok_or(SolverError::Overflow)?;
        if denominator.is_zero() {
            return Err(SolverError::Overflow);
        }
        d = numerator / denominator;

        let diff = if d > prev { d - prev } else { prev - d };
        if diff <= U256::one() {
            return Ok(d);
        }
    }

    Err(SolverError::NonConvergence)
}

/// Solve for the one unknown balance at `index_out` given the others fixed
/// and the invariant `d` fixed.
///
/// `xp` holds the post-deposit scaled balances; the entry at `index_out` is
/// ignored (it is the unknown). Same iteration cap and unit tolerance as
/// [`compute_d`].
pub fn compute_y(xp: &[U256], amp: u64, d: U256, index_out: usize) -> Result<U256, SolverError> {
    let n = xp.len();
    if n < 2 || index_out >= n || d.is_zero() {
        return Ok(U256::zero());
    }

    let n_u = U256::from(n);
    let ann = ann(amp, n)?;

    // c = D^(n+1) / (n^n · Π_{k≠j} x_k · Ann · n), built one factor at a time
    let mut c = d;
    let mut sum = U256::zero();
    for (k, x) in xp.iter().enumerate() {
        if k == index_out {
            continue;
        }
        if x.is_zero() {
            return Ok(U256::zero());
        }
        sum = sum.checked_add(*x).ok_or(SolverError::Overflow)?;
        let div = x.checked_mul(n_u).ok_or(SolverError::Overflow)?;
        c = c.checked_mul(d).ok_or(SolverError::Overflow)? / div;
    }
    let div = ann.checked_mul(n_u).ok_or(SolverError::Overflow)?;
    c = c.checked_mul(d).ok_or(SolverError::Overflow)? / div;

    let b = sum
        .checked_add(d / ann)
        .ok_or(SolverError::Overflow)?;

    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let prev = y;
        let numerator = y
            .checked_mul(y)
            .ok_or(SolverError::Overflow)?
            .checked_add(c)
            .ok_or(SolverError::Overflow)?;
        let denominator = y
            .checked_mul(U256::from(2u8))
            .ok_or(SolverError::Overflow)?
            .checked_add(b)
            .ok_or(SolverError::Overflow)?
            .checked_sub(d)
            .ok_or(SolverError::Overflow)?;
        if denominator.is_zero() {
            return Err(SolverError::Overflow);
        }
        y = numerator / denominator;

        let diff = if y > prev { y - prev } else { prev - y };
        if diff <= U256::one() {
            return Ok(y);
        }
    }

    Err(SolverError::NonConvergence)
}

/// Exchange: output of swapping `dx` raw units of token `i` for token `j`,
/// fee deducted, holding the invariant constant.
///
/// Balances are scaled by their per-token `rates` into a common unit before
/// solving and the result is scaled back. One guard unit is shaved off the
/// scaled output so round-down error can never over-credit the taker.
pub fn get_dy(
    balances: &[u128],
    rates: &[U256],
    amp: u64,
    i: usize,
    j: usize,
    dx: u128,
    fee_bps: u32,
) -> Result<u128, SolverError> {
    let n = balances.len();
    if i == j || i >= n || j >= n || rates.len() != n || dx == 0 {
        return Ok(0);
    }
    // Same contract as the constant-product adapter: a fee that would consume
    // the whole output is a malformed snapshot and prices as no liquidity.
    if fee_bps >= FEE_DENOMINATOR_BPS {
        return Ok(0);
    }

    let mut xp = Vec::with_capacity(n);
    for (bal, rate) in balances.iter().zip(rates) {
        xp.push(
            U256::from(*bal)
                .checked_mul(*rate)
                .ok_or(SolverError::Overflow)?,
        );
    }

    let d = compute_d(&xp, amp)?;
    if d.is_zero() {
        return Ok(0);
    }

    let dx_scaled = U256::from(dx)
        .checked_mul(rates[i])
        .ok_or(SolverError::Overflow)?;
    let old_y = xp[j];
    xp[i] = xp[i].checked_add(dx_scaled).ok_or(SolverError::Overflow)?;

    let new_y = compute_y(&xp, amp, d, j)?;
    if old_y <= new_y {
        return Ok(0);
    }

    // Guard unit against round-down over-crediting
    let dy_scaled = (old_y - new_y).saturating_sub(U256::one());
    let dy = dy_scaled / rates[j];
    let fee = dy * U256::from(fee_bps) / U256::from(FEE_DENOMINATOR_BPS);
    (dy - fee).try_into().map_err(|_| SolverError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(balances: &[u128]) -> Vec<U256> {
        balances.iter().map(|b| U256::from(*b)).collect()
    }

    #[test]
    fn balanced_pool_invariant_is_total_balance() {
        // For a perfectly balanced pool the invariant equals Σx exactly.
        let bal = 1_000_000u128 * 10u128.pow(18);
        let xp = scaled(&[bal, bal, bal]);
        let d = compute_d(&xp, 100).unwrap();
        assert_eq!(d, U256::from(bal) * U256::from(3u8));
    }

    #[test]
    fn invariant_reconstruction_within_unit_tolerance() {
        // Imbalanced pool: verify A·n^n·S + D ≈ A·n^n·D + D^(n+1)/(n^n·Πx)
        let xp = scaled(&[
            1_000_000u128 * 10u128.pow(18),
            1_500_000u128 * 10u128.pow(18),
        ]);
        let amp = 100u64;
        let d = compute_d(&xp, amp).unwrap();

        let n = U256::from(2u8);
        let ann = U256::from(amp) * U256::from(4u8);
        let s: U256 = xp[0] + xp[1];
        // D_P = D^3 / (n^2 · x0 · x1), built stepwise like the solver
        let mut d_p = d;
        for x in &xp {
            d_p = d_p * d / (*x * n);
        }
        let lhs = ann * s + d;
        let rhs = ann * d + d_p;
        let diff = if lhs > rhs { lhs - rhs } else { rhs - lhs };
        // A unit step in D moves the residual by about |F'(D)| ≈ Ann, so a
        // converged root satisfies the equation to within a few Ann units.
        assert!(diff <= ann * U256::from(10u8), "invariant residual too large: {diff}");
    }

    #[test]
    fn drained_pool_has_zero_invariant() {
        let xp = scaled(&[0, 1_000_000]);
        assert_eq!(compute_d(&xp, 100).unwrap(), U256::zero());
        assert_eq!(compute_d(&[], 100).unwrap(), U256::zero());
    }

    #[test]
    fn solved_y_preserves_invariant() {
        let bal = 10_000_000u128 * 10u128.pow(18);
        let xp = scaled(&[bal, bal]);
        let amp = 200u64;
        let d = compute_d(&xp, amp).unwrap();

        // Deposit 1% into x0, solve for x1
        let mut xp_after = xp.clone();
        xp_after[0] += U256::from(bal / 100);
        let y = compute_y(&xp_after, amp, d, 1).unwrap();
        assert!(y < xp[1], "output balance must drop after a deposit");

        xp_after[1] = y;
        let d_after = compute_d(&xp_after, amp).unwrap();
        let diff = if d_after > d { d_after - d } else { d - d_after };
        // y is rounded, so D drifts by at most a few units of the last place
        assert!(diff <= U256::from(10u8), "invariant drift {diff}");
    }

    #[test]
    fn amplified_pool_beats_constant_product_near_balance() {
        let bal = 1_000_000u128 * 10u128.pow(18);
        let rates = vec![U256::one(), U256::one()];
        let dx = 10_000u128 * 10u128.pow(18); // 1% of the pool
        let dy = get_dy(&[bal, bal], &rates, 100, 0, 1, dx, 0).unwrap();
        let cp = crate::constant_product::get_amount_out(dx, bal, bal, 0);
        assert!(dy > cp, "stable pool should out-price x*y=k near balance");
        assert!(dy <= dx, "cannot out-pay the deposit at parity");
    }

    #[test]
    fn get_dy_respects_fee_and_determinism() {
        let bal = 1_000_000u128 * 10u128.pow(18);
        let rates = vec![U256::one(), U256::one()];
        let dx = 50_000u128 * 10u128.pow(18);
        let gross = get_dy(&[bal, bal], &rates, 85, 0, 1, dx, 0).unwrap();
        let net = get_dy(&[bal, bal], &rates, 85, 0, 1, dx, 4).unwrap();
        assert!(net < gross);
        // 4 bps fee
        assert_eq!(net, gross - gross * 4 / 10_000);
        // Pure function of its inputs
        assert_eq!(net, get_dy(&[bal, bal], &rates, 85, 0, 1, dx, 4).unwrap());
    }

    #[test]
    fn get_dy_scales_mixed_precision_tokens() {
        // 6-decimal token vs 18-decimal token, balanced in value
        let usdc_bal = 2_000_000u128 * 10u128.pow(6);
        let dai_bal = 2_000_000u128 * 10u128.pow(18);
        let rates = vec![U256::from(10u128.pow(12)), U256::one()];
        let dx = 1_000u128 * 10u128.pow(6); // 1,000 USDC
        let dy = get_dy(&[usdc_bal, dai_bal], &rates, 100, 0, 1, dx, 4).unwrap();
        // Expect roughly 1,000 DAI out, in 18-decimal units
        assert!(dy > 990u128 * 10u128.pow(18));
        assert!(dy < 1_000u128 * 10u128.pow(18));
    }

    #[test]
    fn zero_amplification_is_a_solver_error_not_a_panic() {
        let bal = 1_000_000u128 * 10u128.pow(18);
        let xp = scaled(&[bal, bal]);
        assert_eq!(compute_d(&xp, 0), Err(SolverError::Overflow));
        let d = compute_d(&xp, 100).unwrap();
        assert_eq!(compute_y(&xp, 0, d, 1), Err(SolverError::Overflow));
        // The exchange path wraps both solvers and must surface the same error
        let rates = vec![U256::one(), U256::one()];
        assert_eq!(
            get_dy(&[bal, bal], &rates, 0, 0, 1, 1_000, 4),
            Err(SolverError::Overflow)
        );
    }

    #[test]
    fn fee_consuming_the_output_prices_as_zero() {
        // Matches the constant-product adapter's handling of fee_bps >= 100%.
        let bal = 1_000_000u128 * 10u128.pow(18);
        let rates = vec![U256::one(), U256::one()];
        let dx = 1_000u128 * 10u128.pow(18);
        assert_eq!(get_dy(&[bal, bal], &rates, 100, 0, 1, dx, 10_000).unwrap(), 0);
        assert_eq!(get_dy(&[bal, bal], &rates, 100, 0, 1, dx, 60_000).unwrap(), 0);
    }

    #[test]
    fn degenerate_requests_price_as_zero() {
        let rates = vec![U256::one(), U256::one()];
        assert_eq!(get_dy(&[1_000, 1_000], &rates, 100, 0, 0, 10, 4).unwrap(), 0);
        assert_eq!(get_dy(&[1_000, 1_000], &rates, 100, 0, 1, 0, 4).unwrap(), 0);
        assert_eq!(get_dy(&[0, 1_000], &rates, 100, 0, 1, 10, 4).unwrap(), 0);
        assert_eq!(get_dy(&[1_000, 1_000], &rates, 100, 2, 1, 10, 4).unwrap(), 0);
    }
}
