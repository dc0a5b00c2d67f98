use crate::constants::*;
use crate::error::*;
use crate::events::CircleCreated;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn create_circle(
    ctx: Context<CreateCircle>,
    name: String,
    min_credit_score: u16,
    max_members: u8,
) -> Result<()> {
    require!(
        name.len() <= MAX_CIRCLE_NAME_LEN,
        CircleLendError::CircleNameTooLong
    );
    require!(
        min_credit_score <= MAX_CREDIT_SCORE,
        CircleLendError::ScoreOutOfRange
    );
    require!(
        max_members >= 2 && max_members as usize <= MAX_CIRCLE_MEMBERS,
        CircleLendError::InvalidPlatformConfiguration
    );

    let circle = &mut ctx.accounts.circle;
    let clock = Clock::get()?;

    circle.name = name;
    circle.creator = ctx.accounts.creator.key();
    circle.members = vec![ctx.accounts.creator.key()];
    circle.min_credit_score = min_credit_score;
    circle.max_members = max_members;
    circle.total_proposals = 0;
    circle.created_at = clock.unix_timestamp;
    circle.bump = ctx.bumps.circle;

    emit!(CircleCreated {
        circle: circle.key(),
        creator: circle.creator,
        min_credit_score,
        timestamp: clock.unix_timestamp,
    });
    msg!("Circle created: {}", circle.name);
    Ok(())
}

#[derive(Accounts)]
#[instruction(name: String)]
pub struct CreateCircle<'info> {
    #[account(
        init,
        payer = creator,
        space = 8 + Circle::INIT_SPACE,
        seeds = [SEEDS_CIRCLE, creator.key().as_ref(), name.as_bytes()],
        bump
    )]
    pub circle: Account<'info, Circle>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}
