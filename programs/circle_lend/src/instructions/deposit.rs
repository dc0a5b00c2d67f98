use crate::constants::*;
use crate::error::*;
use crate::events::Deposited;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;
    let current = Clock::get()?.unix_timestamp;

    require!(amount > 0, CircleLendError::ZeroAmount);
    require!(pool.is_whitelisted, CircleLendError::InvalidAsset);
    require!(pool.is_active, CircleLendError::PoolInactive);

    pool.accrue(current)?;
    pool.lock()?;

    let shares = pool.shares_for_deposit(amount)?;
    require!(shares > 0, CircleLendError::ShareAmountZero);

    // Transfer tokens from lender into the pool vault
    let transfer_cpi_accounts = TransferChecked {
        from: ctx.accounts.lender_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.lender.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_cpi_accounts,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    if position.shares == 0 {
        position.owner = ctx.accounts.lender.key();
        position.pool = pool.key();
        position.bump = ctx.bumps.position;
    }
    position.shares = position
        .shares
        .checked_add(shares)
        .ok_or(CircleLendError::MathOverflow)?;
    position.principal_deposited = position
        .principal_deposited
        .checked_add(amount)
        .ok_or(CircleLendError::MathOverflow)?;
    position.last_deposit_ts = current;

    pool.total_deposits = pool
        .total_deposits
        .checked_add(amount)
        .ok_or(CircleLendError::MathOverflow)?;
    pool.total_shares = pool
        .total_shares
        .checked_add(shares)
        .ok_or(CircleLendError::MathOverflow)?;

    pool.unlock();

    emit!(Deposited {
        pool: pool.key(),
        user: ctx.accounts.lender.key(),
        amount,
        shares,
        timestamp: current,
    });
    msg!("Deposit: {} tokens for {} shares", amount, shares);
    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [SEEDS_POOL, mint.key().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = lender,
        space = 8 + UserPosition::INIT_SPACE,
        seeds = [SEEDS_POSITION, lender.key().as_ref(), pool.key().as_ref()],
        bump
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
