//! Integer interest and penalty arithmetic.
//!
//! Every function truncates toward zero and never returns a negative amount
//! for non-negative input. `principal * bps` is never formed directly: the
//! principal is split into `q * 10_000 + r` so the only product that can
//! overflow is one whose true result is itself outside `i128`.

/// 10_000 basis points = 100 %.
pub const BASIS_POINTS_DIVISOR: i128 = 10_000;

/// `floor(amount * bps / 10_000)`, or `None` if the result does not fit.
pub fn apply_basis_points(amount: i128, bps: u32) -> Option<i128> {
    if amount <= 0 || bps == 0 {
        return Some(0);
    }
    let bps = bps as i128;
    let whole = amount / BASIS_POINTS_DIVISOR;
    let rest = amount % BASIS_POINTS_DIVISOR;

    // rest < 10_000 and bps < 2^32, so this product cannot overflow.
    let fractional = rest * bps / BASIS_POINTS_DIVISOR;
    whole.checked_mul(bps)?.checked_add(fractional)
}

/// Interest earned over a full term at a flat APY.
pub fn interest(principal: i128, apy_basis_points: u32) -> Option<i128> {
    apply_basis_points(principal, apy_basis_points)
}

/// Penalty withheld when a position is closed before it unlocks.
pub fn early_penalty(principal: i128, penalty_basis_points: u32) -> Option<i128> {
    apply_basis_points(principal, penalty_basis_points)
}
