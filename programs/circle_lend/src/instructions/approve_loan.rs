use crate::constants::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

/// Direct approval by the pool authority. Circle loans are approved only
/// through an executed governance proposal.
pub fn approve_loan(ctx: Context<ApproveLoan>) -> Result<()> {
    let loan = &mut ctx.accounts.loan;
    let pool = &ctx.accounts.pool;

    require!(
        loan.status == LoanStatus::Requested,
        CircleLendError::InvalidLoanState
    );
    require!(loan.circle.is_none(), CircleLendError::Unauthorized);
    require!(
        loan.principal <= pool.available_liquidity(),
        CircleLendError::InsufficientLiquidity
    );

    loan.status = LoanStatus::Approved;

    msg!("Loan approved for borrower: {}", loan.borrower);
    Ok(())
}

pub fn reject_loan(ctx: Context<ApproveLoan>) -> Result<()> {
    let loan = &mut ctx.accounts.loan;

    require!(
        loan.status == LoanStatus::Requested,
        CircleLendError::InvalidLoanState
    );

    loan.status = LoanStatus::Rejected;

    msg!("Loan rejected for borrower: {}", loan.borrower);
    Ok(())
}

#[derive(Accounts)]
pub struct ApproveLoan<'info> {
    #[account(
        mut,
        constraint = loan.pool == pool.key() @ CircleLendError::InvalidLoanState
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        seeds = [SEEDS_POOL, pool.mint.as_ref()],
        bump = pool.bump,
        has_one = authority @ CircleLendError::Unauthorized,
        constraint = pool.is_active @ CircleLendError::PoolInactive
    )]
    pub pool: Account<'info, Pool>,

    pub authority: Signer<'info>,
}
