use crate::constants::*;
use crate::error::*;
use crate::events::ScorePosted;
use crate::state::*;
use anchor_lang::prelude::*;

/// Boundary to the external scoring service: only the platform's score
/// oracle may write, and only within the per-address rate limit. The
/// program treats the score as an opaque signed input.
pub fn post_credit_score(ctx: Context<PostCreditScore>, score: u16, ttl_seconds: i64) -> Result<()> {
    let credit = &mut ctx.accounts.credit_score;
    let current = Clock::get()?.unix_timestamp;

    require!(score <= MAX_CREDIT_SCORE, CircleLendError::ScoreOutOfRange);
    require!(
        ttl_seconds > 0,
        CircleLendError::InvalidPlatformConfiguration
    );

    if current - credit.window_start >= SCORE_RATE_WINDOW {
        credit.window_start = current;
        credit.posts_in_window = 0;
    }
    require!(
        credit.posts_in_window < SCORE_REQUESTS_PER_WINDOW,
        CircleLendError::ScoreRateLimited
    );
    credit.posts_in_window += 1;

    credit.owner = ctx.accounts.owner.key();
    credit.score = score;
    credit.posted_at = current;
    credit.expires_at = current + ttl_seconds;
    credit.bump = ctx.bumps.credit_score;

    emit!(ScorePosted {
        owner: credit.owner,
        score,
        expires_at: credit.expires_at,
        timestamp: current,
    });
    msg!("Score {} posted for {}", score, credit.owner);
    Ok(())
}

#[derive(Accounts)]
pub struct PostCreditScore<'info> {
    #[account(
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump,
        constraint = platform.score_oracle == oracle.key() @ CircleLendError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init_if_needed,
        payer = oracle,
        space = 8 + CreditScore::INIT_SPACE,
        seeds = [SEEDS_CREDIT, owner.key().as_ref()],
        bump
    )]
    pub credit_score: Account<'info, CreditScore>,

    /// CHECK: the wallet being scored; key only
    pub owner: UncheckedAccount<'info>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}
