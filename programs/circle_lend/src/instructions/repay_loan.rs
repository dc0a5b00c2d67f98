use crate::constants::*;
use crate::error::*;
use crate::events::{LoanCompleted, PaymentMade};
use crate::math::amortize::{days_between, interest_portion, late_fee};
use crate::math::fixed_point::bps_mul;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn repay_loan(ctx: Context<RepayLoan>, payment_amount: u64) -> Result<()> {
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
    require!(payment_amount > 0, CircleLendError::ZeroAmount);

    pool.accrue(current)?;
    pool.lock()?;

    let entry = schedule
        .next_unpaid(loan.paid_installments)
        .ok_or(CircleLendError::InvalidLoanState)?;

    // Interest on the outstanding balance for this interval, plus the
    // penalty for every full week past the due date
    let interest_due = interest_portion(
        loan.remaining_balance,
        loan.annual_rate_bps,
        loan.frequency.interval_days(),
    )?;
    let days_late = days_between(entry.due_ts, current);
    let penalty = late_fee(loan.installment_amount, days_late)?;

    let carrying_cost = interest_due
        .checked_add(penalty)
        .ok_or(CircleLendError::MathOverflow)?;
    require!(
        payment_amount > carrying_cost,
        CircleLendError::InvalidPaymentAmount
    );
    let principal_paid = payment_amount - carrying_cost;
    require!(
        principal_paid <= loan.remaining_balance,
        CircleLendError::InvalidPaymentAmount
    );

    // Platform takes its fee from the interest leg only
    let platform_fee = bps_mul(interest_due, platform.platform_fee as u64)?;
    let to_vault = payment_amount - platform_fee;

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

    loan.remaining_balance -= principal_paid;
    loan.paid_installments = loan
        .paid_installments
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;
    loan.next_due_ts = schedule
        .next_unpaid(loan.paid_installments)
        .map(|e| e.due_ts)
        .unwrap_or(0);

    pool.receive_repayment(principal_paid, interest_due - platform_fee, penalty)?;

    user_profile.total_repaid = user_profile
        .total_repaid
        .checked_add(payment_amount)
        .ok_or(CircleLendError::MathOverflow)?;
    user_profile.last_updated = current;

    if loan.remaining_balance == 0 {
        loan.status = LoanStatus::Completed;
        user_profile.active_loans = user_profile.active_loans.saturating_sub(1);
        user_profile.successful_loans = user_profile
            .successful_loans
            .checked_add(1)
            .ok_or(CircleLendError::MathOverflow)?;
        emit!(LoanCompleted {
            loan: loan.key(),
            borrower: loan.borrower,
            timestamp: current,
        });
        msg!("Loan fully repaid by borrower: {}", loan.borrower);
    }

    pool.unlock();

    emit!(PaymentMade {
        loan: loan.key(),
        amount: payment_amount,
        interest_paid: interest_due,
        principal_paid,
        late_fee_paid: penalty,
        remaining_balance: loan.remaining_balance,
        timestamp: current,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RepayLoan<'info> {
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
