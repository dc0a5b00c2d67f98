use crate::constants::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn set_pool_status(
    ctx: Context<SetPoolStatus>,
    is_active: bool,
    is_whitelisted: bool,
) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.is_active = is_active;
    pool.is_whitelisted = is_whitelisted;

    msg!(
        "Pool {} status: active={} whitelisted={}",
        pool.key(),
        is_active,
        is_whitelisted
    );
    Ok(())
}

#[derive(Accounts)]
pub struct SetPoolStatus<'info> {
    #[account(
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump,
        has_one = authority @ CircleLendError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub pool: Account<'info, Pool>,

    pub authority: Signer<'info>,
}
