use crate::constants::*;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn initialize_user(ctx: Context<InitializeUser>) -> Result<()> {
    let user_profile = &mut ctx.accounts.user_profile;
    let clock = Clock::get()?;

    user_profile.owner = ctx.accounts.owner.key();
    user_profile.active_loans = 0;
    user_profile.successful_loans = 0;
    user_profile.defaulted_loans = 0;
    user_profile.total_borrowed = 0;
    user_profile.total_repaid = 0;
    user_profile.created_at = clock.unix_timestamp;
    user_profile.last_updated = clock.unix_timestamp;
    user_profile.bump = ctx.bumps.user_profile;

    msg!("User profile created for: {}", user_profile.owner);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeUser<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + UserProfile::INIT_SPACE,
        seeds = [SEEDS_USER, owner.key().as_ref()],
        bump
    )]
    pub user_profile: Account<'info, UserProfile>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}
