use crate::constants::*;
use crate::events::InterestAccrued;
use crate::state::*;
use anchor_lang::prelude::*;

/// Permissionless crank. Every mutating instruction accrues lazily anyway;
/// this keeps the index fresh on quiet pools.
pub fn accrue_pool(ctx: Context<AccruePool>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let current = Clock::get()?.unix_timestamp;

    let interest = pool.accrue(current)?;

    emit!(InterestAccrued {
        pool: pool.key(),
        interest,
        borrow_index: pool.borrow_index,
        utilization_bps: pool.utilization_bps()?,
        timestamp: current,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AccruePool<'info> {
    #[account(
        mut,
        seeds = [SEEDS_POOL, pool.mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}
