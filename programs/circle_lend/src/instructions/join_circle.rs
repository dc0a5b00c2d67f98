use crate::constants::*;
use crate::error::*;
use crate::events::MemberJoined;
use crate::state::*;
use anchor_lang::prelude::*;

/// Admission is score-gated: a fresh score at or above the circle minimum
/// admits directly; removal goes through a member vote.
pub fn join_circle(ctx: Context<JoinCircle>) -> Result<()> {
    let circle = &mut ctx.accounts.circle;
    let credit_score = &ctx.accounts.credit_score;
    let current = Clock::get()?.unix_timestamp;

    credit_score.assert_not_expired(current)?;
    require!(
        credit_score.score >= circle.min_credit_score,
        CircleLendError::ScoreBelowCircleMinimum
    );

    circle.add_member(ctx.accounts.member.key())?;

    emit!(MemberJoined {
        circle: circle.key(),
        member: ctx.accounts.member.key(),
        timestamp: current,
    });
    msg!(
        "Member {} joined circle {}",
        ctx.accounts.member.key(),
        circle.name
    );
    Ok(())
}

#[derive(Accounts)]
pub struct JoinCircle<'info> {
    #[account(mut)]
    pub circle: Account<'info, Circle>,

    #[account(
        seeds = [SEEDS_CREDIT, member.key().as_ref()],
        bump = credit_score.bump
    )]
    pub credit_score: Account<'info, CreditScore>,

    pub member: Signer<'info>,
}
