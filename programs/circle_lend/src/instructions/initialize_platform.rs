use crate::constants::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn initialize_platform(
    ctx: Context<InitializePlatform>,
    score_oracle: Pubkey,
    price_oracle: Pubkey,
    platform_fee: u16,
    min_loan_amount: u64,
    max_loan_amount: u64,
) -> Result<()> {
    require!(
        platform_fee <= 1_000,
        CircleLendError::InvalidPlatformConfiguration
    ); // Max 10%
    require!(
        max_loan_amount > min_loan_amount,
        CircleLendError::InvalidPlatformConfiguration
    );

    let platform = &mut ctx.accounts.platform;
    let clock = Clock::get()?;

    platform.authority = ctx.accounts.authority.key();
    platform.score_oracle = score_oracle;
    platform.price_oracle = price_oracle;
    platform.treasury = ctx.accounts.treasury.key();
    platform.platform_fee = platform_fee;
    platform.min_loan_amount = min_loan_amount;
    platform.max_loan_amount = max_loan_amount;
    platform.total_loans_issued = 0;
    platform.total_volume = 0;
    platform.total_defaults = 0;
    platform.is_active = true;
    platform.created_at = clock.unix_timestamp;
    platform.bump = ctx.bumps.platform;

    msg!(
        "Platform initialized with authority: {}",
        platform.authority
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Platform::INIT_SPACE,
        seeds = [SEEDS_PLATFORM],
        bump
    )]
    pub platform: Account<'info, Platform>,

    /// CHECK: treasury wallet chosen by the deployer; only stored
    pub treasury: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
