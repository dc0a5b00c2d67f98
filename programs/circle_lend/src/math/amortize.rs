use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, DAYS_PER_YEAR, EARLY_PAYOFF_INTEREST_BPS, LATE_FEE_BPS, SECONDS_PER_DAY, WAD,
};
use crate::error::CircleLendError;
use crate::math::fixed_point::{period_rate_wad, wad_div, wad_mul, wad_pow};
use crate::state::{Frequency, ScheduleEntry};

/// Equal installment for a fully amortizing loan:
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, with `r` the per-period rate in WAD.
/// A zero rate degenerates to straight-line `P / n`.
pub fn installment_amount(principal: u64, rate_wad: u128, installments: u16) -> Result<u64> {
    let n = installments as u64;
    if n == 0 {
        return Err(CircleLendError::InvalidDuration.into());
    }
    if rate_wad == 0 {
        return principal
            .checked_div(n)
            .ok_or(CircleLendError::DivisionByZero.into());
    }
    let growth = wad_pow(WAD + rate_wad, n)?; // (1+r)^n
    let numerator = wad_mul(rate_wad, growth)?;
    let denominator = growth
        .checked_sub(WAD)
        .ok_or(CircleLendError::MathOverflow)?;
    let factor = wad_div(numerator, denominator)?;
    let amount = (principal as u128)
        .checked_mul(factor)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(WAD)
        .ok_or(CircleLendError::DivisionByZero)?;
    u64::try_from(amount).map_err(|_| CircleLendError::MathOverflow.into())
}

/// Build the full repayment schedule at disbursement. Produced exactly once;
/// the final installment absorbs integer rounding so the principal portions
/// sum to the principal exactly.
pub fn build_schedule(
    principal: u64,
    annual_rate_bps: u16,
    frequency: Frequency,
    installments: u16,
    disbursed_at: i64,
) -> Result<Vec<ScheduleEntry>> {
    let rate_wad = period_rate_wad(annual_rate_bps, frequency.periods_per_year())?;
    let installment = installment_amount(principal, rate_wad, installments)?;
    let interval_secs = frequency.interval_days() as i64 * SECONDS_PER_DAY;

    let mut entries = Vec::with_capacity(installments as usize);
    let mut remaining = principal;
    for number in 1..=installments {
        let interest = wad_mul(remaining as u128, rate_wad)? as u64;
        let principal_portion = if number == installments {
            remaining
        } else {
            installment.saturating_sub(interest).min(remaining)
        };
        remaining -= principal_portion;
        entries.push(ScheduleEntry {
            installment_number: number,
            due_ts: disbursed_at + number as i64 * interval_secs,
            principal_portion,
            interest_portion: interest,
            total_amount: principal_portion
                .checked_add(interest)
                .ok_or(CircleLendError::MathOverflow)?,
            remaining_balance_after: remaining,
        });
    }
    Ok(entries)
}

/// Interest share of a payment on the outstanding balance:
/// `balance * annual_rate * interval_days / 365`, in basis points.
pub fn interest_portion(
    remaining_balance: u64,
    annual_rate_bps: u16,
    interval_days: u32,
) -> Result<u64> {
    let interest = (remaining_balance as u128)
        .checked_mul(annual_rate_bps as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_mul(interval_days as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(DAYS_PER_YEAR as u128 * BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::DivisionByZero)?;
    u64::try_from(interest).map_err(|_| CircleLendError::MathOverflow.into())
}

/// Late penalty: 2% of the installment per full week overdue.
/// Nothing accrues inside the first seven days.
pub fn late_fee(installment_amount: u64, days_late: u32) -> Result<u64> {
    let full_weeks = (days_late / 7) as u64;
    if full_weeks == 0 {
        return Ok(0);
    }
    (installment_amount as u128)
        .checked_mul(LATE_FEE_BPS as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_mul(full_weeks as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::DivisionByZero)?
        .try_into()
        .map_err(|_| CircleLendError::MathOverflow.into())
}

/// Early payoff: outstanding principal plus half the scheduled remaining interest.
pub fn payoff_amount(remaining_principal: u64, remaining_interest: u64) -> Result<u64> {
    let discounted = (remaining_interest as u128)
        .checked_mul(EARLY_PAYOFF_INTEREST_BPS as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::DivisionByZero)? as u64;
    remaining_principal
        .checked_add(discounted)
        .ok_or(CircleLendError::MathOverflow.into())
}

/// Whole days between two timestamps.
pub fn days_between(start: i64, end: i64) -> u32 {
    if end <= start {
        return 0;
    }
    ((end - start) / SECONDS_PER_DAY) as u32
}

#[cfg(test)]
mod test {
    use super::*;

    const UNIT: u64 = 1_000_000; // 6-decimal base units

    #[test]
    fn schedule_principal_sums_exactly() {
        // 1000 tokens, 12% annual, 360 days weekly -> 51 installments
        let principal = 1_000 * UNIT;
        let n = 360 / 7;
        assert_eq!(n, 51);
        let schedule = build_schedule(principal, 1_200, Frequency::Weekly, n as u16, 0).unwrap();
        assert_eq!(schedule.len(), 51);
        let total_principal: u64 = schedule.iter().map(|e| e.principal_portion).sum();
        assert_eq!(total_principal, principal);
        assert_eq!(schedule.last().unwrap().remaining_balance_after, 0);
    }

    #[test]
    fn schedule_balance_decreases_monotonically() {
        let schedule = build_schedule(500 * UNIT, 1_500, Frequency::Monthly, 6, 0).unwrap();
        let mut prev = 500 * UNIT;
        for entry in &schedule {
            assert!(entry.remaining_balance_after < prev);
            assert_eq!(
                entry.total_amount,
                entry.principal_portion + entry.interest_portion
            );
            prev = entry.remaining_balance_after;
        }
    }

    #[test]
    fn schedule_due_dates_follow_frequency() {
        let schedule = build_schedule(100 * UNIT, 1_000, Frequency::Biweekly, 4, 1_000).unwrap();
        assert_eq!(schedule[0].due_ts, 1_000 + 14 * SECONDS_PER_DAY);
        assert_eq!(schedule[3].due_ts, 1_000 + 56 * SECONDS_PER_DAY);
    }

    #[test]
    fn zero_rate_falls_back_to_straight_line() {
        let amount = installment_amount(1_200 * UNIT, 0, 12).unwrap();
        assert_eq!(amount, 100 * UNIT);
    }

    #[test]
    fn installment_covers_declining_interest() {
        // Installment must exceed first-period interest or the loan never amortizes
        let rate = period_rate_wad(1_200, 52).unwrap();
        let installment = installment_amount(1_000 * UNIT, rate, 51).unwrap();
        let first_interest = wad_mul(1_000 * UNIT as u128, rate).unwrap() as u64;
        assert!(installment > first_interest);
    }

    #[test]
    fn late_fee_waived_inside_first_week() {
        assert_eq!(late_fee(100 * UNIT, 0).unwrap(), 0);
        assert_eq!(late_fee(100 * UNIT, 6).unwrap(), 0);
    }

    #[test]
    fn late_fee_accrues_per_full_week() {
        assert_eq!(late_fee(100 * UNIT, 10).unwrap(), 2 * UNIT);
        assert_eq!(late_fee(100 * UNIT, 20).unwrap(), 4 * UNIT);
        assert_eq!(late_fee(100 * UNIT, 28).unwrap(), 8 * UNIT);
    }

    #[test]
    fn interest_portion_prorates_by_interval() {
        // 1000 tokens at 12% for 7 days: 1000 * 0.12 * 7/365
        let interest = interest_portion(1_000 * UNIT, 1_200, 7).unwrap();
        assert_eq!(interest, 2_301_369);
    }

    #[test]
    fn payoff_discounts_half_the_interest() {
        assert_eq!(payoff_amount(800 * UNIT, 60 * UNIT).unwrap(), 830 * UNIT);
    }

    #[test]
    fn days_between_floors() {
        assert_eq!(days_between(0, SECONDS_PER_DAY - 1), 0);
        assert_eq!(days_between(0, 10 * SECONDS_PER_DAY), 10);
        assert_eq!(days_between(100, 50), 0);
    }
}
