use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, WAD};
use crate::error::CircleLendError;

/// Multiply two WAD values: (a * b) / WAD
pub fn wad_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(WAD)
        .ok_or(CircleLendError::DivisionByZero.into())
}

/// Divide two WAD values: (a * WAD) / b
pub fn wad_div(a: u128, b: u128) -> Result<u128> {
    if b == 0 {
        return Err(CircleLendError::DivisionByZero.into());
    }
    a.checked_mul(WAD)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(b)
        .ok_or(CircleLendError::DivisionByZero.into())
}

/// Raise a WAD value to an integer power by repeated squaring.
pub fn wad_pow(base: u128, mut exp: u64) -> Result<u128> {
    let mut result = WAD;
    let mut base = base;
    while exp > 0 {
        if exp % 2 == 1 {
            result = wad_mul(result, base)?;
        }
        base = wad_mul(base, base)?;
        exp /= 2;
    }
    Ok(result)
}

/// Multiply an amount by basis points: (value * bps) / 10_000
pub fn bps_mul(value: u64, bps: u64) -> Result<u64> {
    (value as u128)
        .checked_mul(bps as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::DivisionByZero)?
        .try_into()
        .map_err(|_| CircleLendError::MathOverflow.into())
}

/// Convert an annual rate in basis points to a per-period WAD rate.
pub fn period_rate_wad(annual_rate_bps: u16, periods_per_year: u64) -> Result<u128> {
    (annual_rate_bps as u128)
        .checked_mul(WAD)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(
            (periods_per_year as u128)
                .checked_mul(BPS_DENOMINATOR as u128)
                .ok_or(CircleLendError::MathOverflow)?,
        )
        .ok_or(CircleLendError::DivisionByZero.into())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wad_mul_identity() {
        assert_eq!(wad_mul(WAD, WAD).unwrap(), WAD);
        assert_eq!(wad_mul(3 * WAD, 2 * WAD).unwrap(), 6 * WAD);
    }

    #[test]
    fn wad_div_rejects_zero() {
        assert!(wad_div(WAD, 0).is_err());
        assert_eq!(wad_div(WAD, 2 * WAD).unwrap(), WAD / 2);
    }

    #[test]
    fn wad_pow_squares() {
        // (1.1)^2 = 1.21
        let base = WAD + WAD / 10;
        assert_eq!(wad_pow(base, 2).unwrap(), WAD + WAD / 5 + WAD / 100);
        assert_eq!(wad_pow(base, 0).unwrap(), WAD);
    }

    #[test]
    fn bps_mul_percentages() {
        assert_eq!(bps_mul(10_000, 500).unwrap(), 500);
        assert_eq!(bps_mul(1_000_000, 200).unwrap(), 20_000);
    }

    #[test]
    fn period_rate_weekly() {
        // 12% annual at weekly periods: 0.0012/0.52 of WAD
        let r = period_rate_wad(1_200, 52).unwrap();
        assert_eq!(r, (1_200u128 * WAD) / (52 * 10_000));
    }
}
