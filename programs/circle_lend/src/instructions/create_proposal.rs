use crate::constants::*;
use crate::error::*;
use crate::events::ProposalCreated;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn create_proposal(ctx: Context<CreateProposal>, kind: u8, target: Pubkey) -> Result<()> {
    let circle = &mut ctx.accounts.circle;
    let proposal = &mut ctx.accounts.proposal;
    let current = Clock::get()?.unix_timestamp;

    require!(
        circle.is_member(&ctx.accounts.proposer.key()),
        CircleLendError::NotCircleMember
    );

    let kind = match kind {
        0 => {
            // Loan approvals must reference a pending loan routed to this circle
            let loan = ctx
                .accounts
                .loan
                .as_ref()
                .ok_or(CircleLendError::InvalidLoanState)?;
            require!(loan.key() == target, CircleLendError::InvalidLoanState);
            require!(
                loan.circle == Some(circle.key()),
                CircleLendError::InvalidLoanState
            );
            require!(
                loan.status == LoanStatus::Requested,
                CircleLendError::InvalidLoanState
            );
            ProposalKind::LoanApproval
        }
        1 => {
            require!(circle.is_member(&target), CircleLendError::NotCircleMember);
            ProposalKind::MemberRemoval
        }
        _ => return Err(CircleLendError::ProposalNotExecutable.into()),
    };

    proposal.circle = circle.key();
    proposal.proposer = ctx.accounts.proposer.key();
    proposal.kind = kind;
    proposal.target = target;
    proposal.votes_for = 0;
    proposal.votes_against = 0;
    proposal.voters = vec![];
    proposal.created_at = current;
    proposal.voting_ends_at = current + VOTING_WINDOW;
    proposal.status = ProposalStatus::Active;
    proposal.bump = ctx.bumps.proposal;

    circle.total_proposals = circle
        .total_proposals
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;

    emit!(ProposalCreated {
        circle: circle.key(),
        proposal: proposal.key(),
        proposer: proposal.proposer,
        voting_ends_at: proposal.voting_ends_at,
        timestamp: current,
    });
    msg!("Proposal created in circle {}", circle.name);
    Ok(())
}

#[derive(Accounts)]
pub struct CreateProposal<'info> {
    #[account(mut)]
    pub circle: Account<'info, Circle>,

    #[account(
        init,
        payer = proposer,
        space = 8 + Proposal::INIT_SPACE,
        seeds = [
            SEEDS_PROPOSAL,
            circle.key().as_ref(),
            &circle.total_proposals.to_le_bytes()
        ],
        bump
    )]
    pub proposal: Account<'info, Proposal>,

    pub loan: Option<Account<'info, Loan>>,

    #[account(mut)]
    pub proposer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
