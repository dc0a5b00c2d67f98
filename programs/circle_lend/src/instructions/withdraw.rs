use crate::constants::*;
use crate::error::*;
use crate::events::Withdrawn;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;
    let current = Clock::get()?.unix_timestamp;

    require!(shares > 0, CircleLendError::ZeroAmount);
    require!(
        shares <= position.shares,
        CircleLendError::InsufficientShares
    );

    pool.accrue(current)?;
    pool.lock()?;

    let amount = pool.amount_for_shares(shares)?;
    require!(
        amount <= pool.available_liquidity(),
        CircleLendError::InsufficientLiquidity
    );

    // Pay the lender out of the vault
    let pool_key = pool.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_POOL_VAULT,
        pool_key.as_ref(),
        &[pool.vault_bump],
    ]];
    let transfer_cpi_accounts = TransferChecked {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.lender_token_account.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_cpi_accounts,
        signer_seeds,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    position.shares = position
        .shares
        .checked_sub(shares)
        .ok_or(CircleLendError::MathOverflow)?;
    position.principal_deposited = position.principal_deposited.saturating_sub(amount);
    if position.shares == 0 {
        // Position fully exited
        position.principal_deposited = 0;
    }

    pool.total_shares = pool
        .total_shares
        .checked_sub(shares)
        .ok_or(CircleLendError::MathOverflow)?;
    pool.total_deposits = pool
        .total_deposits
        .checked_sub(amount)
        .ok_or(CircleLendError::MathOverflow)?;

    pool.unlock();

    emit!(Withdrawn {
        pool: pool.key(),
        user: ctx.accounts.lender.key(),
        amount,
        shares,
        timestamp: current,
    });
    msg!("Withdrew {} tokens for {} shares", amount, shares);
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [SEEDS_POOL, mint.key().as_ref()],
        bump = pool.bump,
        constraint = pool.is_active @ CircleLendError::PoolInactive
    )]
    pub pool: Account<'info, Pool>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [SEEDS_POSITION, lender.key().as_ref(), pool.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == lender.key() @ CircleLendError::Unauthorized
    )]
    pub position: Account<'info, UserPosition>,

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
        associated_token::authority = lender,
        associated_token::token_program = token_program,
    )]
    pub lender_token_account: InterfaceAccount<'info, TokenAccount>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    #[account(mut)]
    pub lender: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
