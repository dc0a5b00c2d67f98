use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_AFTER_DAYS, MAX_INSTALLMENTS};
use crate::error::CircleLendError;
use crate::math::amortize::days_between;

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoanStatus {
    Requested,
    Approved,
    Active,
    Completed,
    Defaulted,
    Liquidated,
    Rejected,
}

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Frequency::Weekly),
            1 => Ok(Frequency::Biweekly),
            2 => Ok(Frequency::Monthly),
            _ => Err(CircleLendError::InvalidFrequency.into()),
        }
    }

    pub fn interval_days(&self) -> u32 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Biweekly => 14,
            Frequency::Monthly => 30,
        }
    }

    pub fn periods_per_year(&self) -> u64 {
        match self {
            Frequency::Weekly => 52,
            Frequency::Biweekly => 26,
            Frequency::Monthly => 12,
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Loan {
    pub borrower: Pubkey,
    pub pool: Pubkey,
    /// Circle whose vote gates approval; None for direct loans.
    pub circle: Option<Pubkey>,
    pub principal: u64,
    pub annual_rate_bps: u16,
    pub frequency: Frequency,
    pub duration_days: u32,
    pub total_installments: u16,
    pub installment_amount: u64,
    pub paid_installments: u16,
    pub remaining_balance: u64,
    pub status: LoanStatus,
    pub has_collateral: bool,
    pub created_at: i64,
    pub disbursed_at: i64,
    pub next_due_ts: i64,
    pub bump: u8,
}

impl Loan {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            LoanStatus::Completed | LoanStatus::Liquidated | LoanStatus::Rejected
        )
    }

    /// Days past the next unpaid due date; zero when current.
    pub fn days_overdue(&self, now: i64) -> u32 {
        if self.status != LoanStatus::Active || self.next_due_ts == 0 {
            return 0;
        }
        days_between(self.next_due_ts, now)
    }

    /// Overdue past the default window moves the loan to terminal pricing.
    pub fn is_defaultable(&self, now: i64) -> bool {
        self.status == LoanStatus::Active && self.days_overdue(now) > DEFAULT_AFTER_DAYS
    }
}

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct ScheduleEntry {
    pub installment_number: u16,
    pub due_ts: i64,
    pub principal_portion: u64,
    pub interest_portion: u64,
    pub total_amount: u64,
    pub remaining_balance_after: u64,
}

/// Finite, ordered, immutable once written at disbursement. Only a full
/// early payoff retires it ahead of time.
#[account]
#[derive(InitSpace)]
pub struct RepaymentSchedule {
    pub loan: Pubkey,
    #[max_len(MAX_INSTALLMENTS)]
    pub entries: Vec<ScheduleEntry>,
    pub bump: u8,
}

impl RepaymentSchedule {
    pub fn next_unpaid(&self, paid_installments: u16) -> Option<&ScheduleEntry> {
        self.entries.get(paid_installments as usize)
    }

    /// Interest still scheduled after `paid_installments` payments.
    pub fn remaining_interest(&self, paid_installments: u16) -> u64 {
        self.entries
            .iter()
            .skip(paid_installments as usize)
            .map(|e| e.interest_portion)
            .sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;

    fn loan(status: LoanStatus, next_due_ts: i64) -> Loan {
        Loan {
            borrower: Pubkey::default(),
            pool: Pubkey::default(),
            circle: None,
            principal: 1_000_000,
            annual_rate_bps: 1_200,
            frequency: Frequency::Weekly,
            duration_days: 90,
            total_installments: 12,
            installment_amount: 90_000,
            paid_installments: 0,
            remaining_balance: 1_000_000,
            status,
            has_collateral: false,
            created_at: 0,
            disbursed_at: 0,
            next_due_ts,
            bump: 0,
        }
    }

    #[test]
    fn frequency_intervals() {
        assert_eq!(Frequency::Weekly.interval_days(), 7);
        assert_eq!(Frequency::Biweekly.interval_days(), 14);
        assert_eq!(Frequency::Monthly.interval_days(), 30);
        assert_eq!(Frequency::Weekly.periods_per_year(), 52);
        assert!(Frequency::from_u8(3).is_err());
    }

    #[test]
    fn overdue_only_counts_active_loans() {
        let due = 10 * SECONDS_PER_DAY;
        let now = 20 * SECONDS_PER_DAY;
        assert_eq!(loan(LoanStatus::Active, due).days_overdue(now), 10);
        assert_eq!(loan(LoanStatus::Requested, due).days_overdue(now), 0);
        assert_eq!(loan(LoanStatus::Defaulted, due).days_overdue(now), 0);
    }

    #[test]
    fn default_window_is_strict() {
        let due = 0;
        let l = loan(LoanStatus::Active, due);
        assert!(!l.is_defaultable(30 * SECONDS_PER_DAY));
        assert!(l.is_defaultable(31 * SECONDS_PER_DAY));
    }

    #[test]
    fn terminal_states() {
        assert!(loan(LoanStatus::Completed, 0).is_terminal());
        assert!(loan(LoanStatus::Liquidated, 0).is_terminal());
        assert!(loan(LoanStatus::Rejected, 0).is_terminal());
        assert!(!loan(LoanStatus::Defaulted, 0).is_terminal());
        assert!(!loan(LoanStatus::Active, 0).is_terminal());
    }

    #[test]
    fn schedule_lookup_and_remaining_interest() {
        let entry = |n: u16, interest: u64| ScheduleEntry {
            installment_number: n,
            due_ts: n as i64 * 7 * SECONDS_PER_DAY,
            principal_portion: 100,
            interest_portion: interest,
            total_amount: 100 + interest,
            remaining_balance_after: 0,
        };
        let schedule = RepaymentSchedule {
            loan: Pubkey::default(),
            entries: vec![entry(1, 30), entry(2, 20), entry(3, 10)],
            bump: 0,
        };
        assert_eq!(schedule.next_unpaid(0).unwrap().installment_number, 1);
        assert_eq!(schedule.next_unpaid(2).unwrap().installment_number, 3);
        assert!(schedule.next_unpaid(3).is_none());
        assert_eq!(schedule.remaining_interest(0), 60);
        assert_eq!(schedule.remaining_interest(2), 10);
    }
}
