use crate::constants::*;
use crate::error::*;
use crate::events::{LoanCompleted, PaymentMade};
use crate::math::amortize::{days_between, late_fee, payoff_amount};
use crate::math::fixed_point::bps_mul;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Settle the whole loan at once: outstanding principal, half the scheduled
/// remaining interest, and any penalty already due.
pub fn payoff_loan(ctx: Context<PayoffLoan>) -> Result<()> {
    let platform = &ctx.accounts.platform;
    let pool = &mut ctx.accounts.pool;
    let loan = &mut ctx.accounts.loan;
    let schedule = &ctx.accounts.schedule;
    let user_profile = &mut ctx.accounts.user_profile;
    let current = Clock::get()?.unix_timestamp;

    require!(
        loan.status == LoanStatus::Active,
        CircleLendError::InvalidLoanState
    );

    pool.accrue(current)?;
    pool.lock()?;

    let remaining_interest = schedule.remaining_interest(loan.paid_installments);
    let discounted_total = payoff_amount(loan.remaining_balance, remaining_interest)?;
    let interest_paid = discounted_total - loan.remaining_balance;

    let days_late = days_between(loan.next_due_ts, current);
    let penalty = late_fee(loan.installment_amount, days_late)?;

    let total_due = discounted_total
        .checked_add(penalty)
        .ok_or(CircleLendError::MathOverflow)?;

    let platform_fee = bps_mul(interest_paid, platform.platform_fee as u64)?;
    let to_vault = total_due - platform_fee;

    let transfer_to_pool = TransferChecked {
        from: ctx.accounts.borrower_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.borrower.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_to_pool,
    );
    transfer_checked(cpi_ctx, to_vault, ctx.accounts.mint.decimals)?;

    if platform_fee > 0 {
        let transfer_to_treasury = TransferChecked {
            from: ctx.accounts.borrower_token_account.to_account_info(),
            to: ctx.accounts.treasury_token_account.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            authority: ctx.accounts.borrower.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            transfer_to_treasury,
        );
        transfer_checked(cpi_ctx, platform_fee, ctx.accounts.mint.decimals)?;
    }

    let principal_paid = loan.remaining_balance;
    pool.receive_repayment(principal_paid, interest_paid - platform_fee, penalty)?;

    loan.remaining_balance = 0;
    loan.paid_installments = loan.total_installments;
    loan.next_due_ts = 0;
    loan.status = LoanStatus::Completed;

    user_profile.active_loans = user_profile.active_loans.saturating_sub(1);
    user_profile.successful_loans = user_profile
        .successful_loans
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;
    user_profile.total_repaid = user_profile
        .total_repaid
        .checked_add(total_due)
        .ok_or(CircleLendError::MathOverflow)?;
    user_profile.last_updated = current;

    pool.unlock();

    emit!(PaymentMade {
        loan: loan.key(),
        amount: total_due,
        interest_paid,
        principal_paid,
        late_fee_paid: penalty,
        remaining_balance: 0,
        timestamp: current,
    });
    emit!(LoanCompleted {
        loan: loan.key(),
        borrower: loan.borrower,
        timestamp: current,
    });
    msg!(
        "Early payoff of {} tokens by borrower: {}",
        total_due,
        loan.borrower
    );
    Ok(())
}

#[derive(Accounts)]
pub struct PayoffLoan<'info> {
    #[account(
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = loan.borrower == borrower.key() @ CircleLendError::Unauthorized,
        constraint = loan.pool == pool.key() @ CircleLendError::InvalidLoanState
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        seeds = [SEEDS_SCHEDULE, loan.key().as_ref()],
        bump = schedule.bump
    )]
    pub schedule: Account<'info, RepaymentSchedule>,

    #[account(
        mut,
        seeds = [SEEDS_POOL, mint.key().as_ref()],
        bump = pool.bump,
        constraint = pool.is_active @ CircleLendError::PoolInactive
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [SEEDS_USER, borrower.key().as_ref()],
        bump = user_profile.bump
    )]
    pub user_profile: Account<'info, UserProfile>,

    #[account(
        mut,
        constraint = vault.key() == pool.vault,
        seeds = [SEEDS_POOL_VAULT, pool.key().as_ref()],
        bump = pool.vault_bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_token_account: InterfaceAccount<'info, TokenAccount>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    #[account(
        mut,
        constraint = treasury_token_account.owner == platform.treasury @ CircleLendError::Unauthorized
    )]
    pub treasury_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
