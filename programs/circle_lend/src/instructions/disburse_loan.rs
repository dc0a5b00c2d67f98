use crate::constants::*;
use crate::error::*;
use crate::events::LoanCreated;
use crate::math::amortize::{build_schedule, installment_amount};
use crate::math::fixed_point::period_rate_wad;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn disburse_loan(ctx: Context<DisburseLoan>) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    let pool = &mut ctx.accounts.pool;
    let loan = &mut ctx.accounts.loan;
    let schedule = &mut ctx.accounts.schedule;
    let user_profile = &mut ctx.accounts.user_profile;
    let current = Clock::get()?.unix_timestamp;

    require!(
        loan.status == LoanStatus::Approved,
        CircleLendError::InvalidLoanState
    );

    // Secured loans must have their collateral locked before funds move
    if loan.has_collateral {
        let collateral = ctx
            .accounts
            .collateral
            .as_ref()
            .ok_or(CircleLendError::NoCollateral)?;
        require!(
            collateral.loan == loan.key() && !collateral.liquidated,
            CircleLendError::NoCollateral
        );
    }

    pool.accrue(current)?;
    pool.lock()?;
    pool.disburse(loan.principal)?;

    // The schedule is produced exactly once, here
    let rate_wad = period_rate_wad(loan.annual_rate_bps, loan.frequency.periods_per_year())?;
    loan.installment_amount =
        installment_amount(loan.principal, rate_wad, loan.total_installments)?;
    let entries = build_schedule(
        loan.principal,
        loan.annual_rate_bps,
        loan.frequency,
        loan.total_installments,
        current,
    )?;
    loan.next_due_ts = entries[0].due_ts;
    schedule.loan = loan.key();
    schedule.entries = entries;
    schedule.bump = ctx.bumps.schedule;

    // Transfer principal from the vault to the borrower
    let pool_key = pool.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_POOL_VAULT,
        pool_key.as_ref(),
        &[pool.vault_bump],
    ]];
    let transfer_cpi_accounts = TransferChecked {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.borrower_token_account.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_cpi_accounts,
        signer_seeds,
    );
    transfer_checked(cpi_ctx, loan.principal, ctx.accounts.mint.decimals)?;

    loan.status = LoanStatus::Active;
    loan.disbursed_at = current;
    loan.remaining_balance = loan.principal;

    user_profile.active_loans = user_profile
        .active_loans
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;
    user_profile.total_borrowed = user_profile
        .total_borrowed
        .checked_add(loan.principal)
        .ok_or(CircleLendError::MathOverflow)?;
    user_profile.last_updated = current;

    platform.total_loans_issued += 1;
    platform.total_volume = platform
        .total_volume
        .checked_add(loan.principal)
        .ok_or(CircleLendError::MathOverflow)?;

    pool.unlock();

    emit!(LoanCreated {
        loan: loan.key(),
        borrower: loan.borrower,
        pool: pool.key(),
        principal: loan.principal,
        rate_bps: loan.annual_rate_bps,
        installments: loan.total_installments,
        timestamp: current,
    });
    msg!(
        "Loan disbursed: {} tokens to {} over {} installments",
        loan.principal,
        loan.borrower,
        loan.total_installments
    );
    Ok(())
}

#[derive(Accounts)]
pub struct DisburseLoan<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

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
        init,
        payer = authority,
        space = 8 + RepaymentSchedule::INIT_SPACE,
        seeds = [SEEDS_SCHEDULE, loan.key().as_ref()],
        bump
    )]
    pub schedule: Account<'info, RepaymentSchedule>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [SEEDS_POOL, mint.key().as_ref()],
        bump = pool.bump,
        has_one = authority @ CircleLendError::Unauthorized,
        constraint = pool.is_active @ CircleLendError::PoolInactive
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [SEEDS_USER, loan.borrower.as_ref()],
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

    /// CHECK: must match loan.borrower; receives the principal
    #[account(
        constraint = borrower.key() == loan.borrower @ CircleLendError::Unauthorized
    )]
    pub borrower: AccountInfo<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_token_account: InterfaceAccount<'info, TokenAccount>,

    pub collateral: Option<Account<'info, Collateral>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
