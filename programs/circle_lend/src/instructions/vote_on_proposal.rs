use crate::error::*;
use crate::events::VoteCast;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn vote_on_proposal(ctx: Context<VoteOnProposal>, support: bool) -> Result<()> {
    let circle = &ctx.accounts.circle;
    let proposal = &mut ctx.accounts.proposal;
    let current = Clock::get()?.unix_timestamp;

    require!(
        circle.is_member(&ctx.accounts.voter.key()),
        CircleLendError::NotCircleMember
    );

    proposal.record_vote(ctx.accounts.voter.key(), support, current)?;

    emit!(VoteCast {
        proposal: proposal.key(),
        voter: ctx.accounts.voter.key(),
        support,
        votes_for: proposal.votes_for,
        votes_against: proposal.votes_against,
        timestamp: current,
    });
    msg!(
        "Vote {} recorded: {} for / {} against",
        support,
        proposal.votes_for,
        proposal.votes_against
    );
    Ok(())
}

#[derive(Accounts)]
pub struct VoteOnProposal<'info> {
    pub circle: Account<'info, Circle>,

    #[account(
        mut,
        constraint = proposal.circle == circle.key() @ CircleLendError::ProposalNotExecutable
    )]
    pub proposal: Account<'info, Proposal>,

    pub voter: Signer<'info>,
}
