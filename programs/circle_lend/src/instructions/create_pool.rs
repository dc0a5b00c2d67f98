use crate::constants::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
    require!(
        ctx.accounts.platform.is_active,
        CircleLendError::PlatformNotActive
    );

    let pool = &mut ctx.accounts.pool;
    let clock = Clock::get()?;

    pool.mint = ctx.accounts.mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.authority = ctx.accounts.authority.key();
    pool.total_deposits = 0;
    pool.total_borrowed = 0;
    pool.total_reserves = 0;
    pool.total_shares = 0;
    pool.borrow_index = WAD;
    pool.last_accrual_ts = clock.unix_timestamp;
    pool.is_active = true;
    pool.is_whitelisted = true;
    pool.locked = false;
    pool.created_at = clock.unix_timestamp;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.vault;

    msg!("Pool created for mint: {}", pool.mint);
    Ok(())
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump,
        has_one = authority @ CircleLendError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init,
        payer = authority,
        space = 8 + Pool::INIT_SPACE,
        seeds = [SEEDS_POOL, mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = authority,
        token::mint = mint,
        token::authority = vault,
        seeds = [SEEDS_POOL_VAULT, pool.key().as_ref()],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
