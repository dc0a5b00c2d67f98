use anchor_lang::prelude::*;

use crate::constants::{
    BASE_RATE_BPS, BPS_DENOMINATOR, OPTIMAL_UTILIZATION_BPS, RESERVE_FACTOR_BPS, SLOPE1_BPS,
    SLOPE2_BPS,
};
use crate::error::CircleLendError;

/// Pool utilization in basis points, clamped to [0, 10000].
/// Returns 0 for an empty pool.
pub fn utilization_bps(total_borrowed: u64, total_deposits: u64) -> Result<u64> {
    if total_deposits == 0 {
        return Ok(0);
    }
    let util = (total_borrowed as u128)
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(total_deposits as u128)
        .ok_or(CircleLendError::DivisionByZero)? as u64;
    Ok(util.min(BPS_DENOMINATOR))
}

/// Borrow rate from the dual-slope curve.
/// - Below the kink: base + (utilization / optimal) * slope1
/// - Above the kink: base + slope1 + ((utilization - optimal) / (1 - optimal)) * slope2
pub fn borrow_rate_bps(utilization_bps: u64) -> Result<u64> {
    let u = utilization_bps.min(BPS_DENOMINATOR);
    if u <= OPTIMAL_UTILIZATION_BPS {
        let variable = (u as u128)
            .checked_mul(SLOPE1_BPS as u128)
            .ok_or(CircleLendError::MathOverflow)?
            .checked_div(OPTIMAL_UTILIZATION_BPS as u128)
            .ok_or(CircleLendError::DivisionByZero)? as u64;
        Ok(BASE_RATE_BPS + variable)
    } else {
        let excess = u - OPTIMAL_UTILIZATION_BPS;
        let remaining = BPS_DENOMINATOR - OPTIMAL_UTILIZATION_BPS;
        let variable = (excess as u128)
            .checked_mul(SLOPE2_BPS as u128)
            .ok_or(CircleLendError::MathOverflow)?
            .checked_div(remaining as u128)
            .ok_or(CircleLendError::DivisionByZero)? as u64;
        Ok(BASE_RATE_BPS + SLOPE1_BPS + variable)
    }
}

/// Lender rate: borrow rate scaled by utilization, minus the reserve cut.
pub fn lender_rate_bps(utilization_bps: u64) -> Result<u64> {
    let gross = (borrow_rate_bps(utilization_bps)? as u128)
        .checked_mul(utilization_bps.min(BPS_DENOMINATOR) as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::DivisionByZero)?;
    let net = gross
        .checked_mul((BPS_DENOMINATOR - RESERVE_FACTOR_BPS) as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::DivisionByZero)?;
    Ok(net as u64)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn utilization_of_empty_pool_is_zero() {
        assert_eq!(utilization_bps(0, 0).unwrap(), 0);
        assert_eq!(utilization_bps(500, 0).unwrap(), 0);
    }

    #[test]
    fn utilization_is_clamped() {
        // Accrued interest can push borrows marginally past deposits
        assert_eq!(utilization_bps(1_100, 1_000).unwrap(), 10_000);
    }

    #[test]
    fn borrow_rate_curve_anchors() {
        assert_eq!(borrow_rate_bps(0).unwrap(), 500); // 5%
        assert_eq!(borrow_rate_bps(4_000).unwrap(), 1_000); // 10%
        assert_eq!(borrow_rate_bps(8_000).unwrap(), 1_500); // 15% at the kink
        assert_eq!(borrow_rate_bps(10_000).unwrap(), 5_500); // 55% at full utilization
    }

    #[test]
    fn borrow_rate_steepens_past_kink() {
        assert_eq!(borrow_rate_bps(9_000).unwrap(), 3_500); // halfway up slope2
        assert!(borrow_rate_bps(8_100).unwrap() > borrow_rate_bps(8_000).unwrap());
    }

    #[test]
    fn lender_rate_below_borrow_rate() {
        for u in [0u64, 2_500, 5_000, 8_000, 10_000] {
            assert!(lender_rate_bps(u).unwrap() <= borrow_rate_bps(u).unwrap());
        }
        // At full utilization: 55% * 100% * 90% = 49.5%
        assert_eq!(lender_rate_bps(10_000).unwrap(), 4_950);
    }

    #[test]
    fn lender_rate_zero_when_idle() {
        assert_eq!(lender_rate_bps(0).unwrap(), 0);
    }
}
