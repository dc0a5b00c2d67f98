use crate::constants::*;
use crate::error::*;
use crate::events::LoanDefaulted;
use crate::state::*;
use anchor_lang::prelude::*;

/// Permissionless crank: any caller may flag a loan that has been overdue
/// past the default window. Terminal pricing - no further penalties accrue.
pub fn mark_defaulted(ctx: Context<MarkDefaulted>) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    let pool = &mut ctx.accounts.pool;
    let loan = &mut ctx.accounts.loan;
    let user_profile = &mut ctx.accounts.user_profile;
    let current = Clock::get()?.unix_timestamp;

    require!(
        loan.status == LoanStatus::Active,
        CircleLendError::InvalidLoanState
    );
    require!(loan.is_defaultable(current), CircleLendError::LoanNotOverdue);

    let days_overdue = loan.days_overdue(current);

    pool.accrue(current)?;
    pool.write_off(loan.remaining_balance);

    loan.status = LoanStatus::Defaulted;

    user_profile.active_loans = user_profile.active_loans.saturating_sub(1);
    user_profile.defaulted_loans = user_profile
        .defaulted_loans
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;
    user_profile.last_updated = current;

    platform.total_defaults = platform
        .total_defaults
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;

    emit!(LoanDefaulted {
        loan: loan.key(),
        borrower: loan.borrower,
        days_overdue,
        timestamp: current,
    });
    msg!(
        "Loan for borrower {} defaulted, {} days overdue",
        loan.borrower,
        days_overdue
    );
    Ok(())
}

#[derive(Accounts)]
pub struct MarkDefaulted<'info> {
    pub cranker: Signer<'info>,

    #[account(
        mut,
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        constraint = loan.pool == pool.key() @ CircleLendError::InvalidLoanState
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_POOL, pool.mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [SEEDS_USER, loan.borrower.as_ref()],
        bump = user_profile.bump
    )]
    pub user_profile: Account<'info, UserProfile>,
}
