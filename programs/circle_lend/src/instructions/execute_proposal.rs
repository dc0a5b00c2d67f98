use crate::error::*;
use crate::events::ProposalExecuted;
use crate::state::*;
use anchor_lang::prelude::*;

/// A proposal becomes executable the moment 60% of the current membership
/// has voted for it; past the window without quorum it only expires.
/// Either way the outcome is terminal.
pub fn execute_proposal(ctx: Context<ExecuteProposal>) -> Result<()> {
    let circle = &mut ctx.accounts.circle;
    let proposal = &mut ctx.accounts.proposal;
    let current = Clock::get()?.unix_timestamp;

    require!(
        proposal.status == ProposalStatus::Active,
        CircleLendError::ProposalNotExecutable
    );

    let passed = proposal.quorum_reached(circle.member_count());
    if !passed {
        require!(proposal.is_expired(current), CircleLendError::QuorumNotMet);
    }

    match proposal.kind {
        ProposalKind::LoanApproval => {
            let loan = ctx
                .accounts
                .loan
                .as_mut()
                .ok_or(CircleLendError::InvalidLoanState)?;
            require!(
                loan.key() == proposal.target,
                CircleLendError::InvalidLoanState
            );
            require!(
                loan.status == LoanStatus::Requested,
                CircleLendError::InvalidLoanState
            );
            loan.status = if passed {
                LoanStatus::Approved
            } else {
                LoanStatus::Rejected
            };
        }
        ProposalKind::MemberRemoval => {
            if passed {
                circle.remove_member(&proposal.target)?;
            }
        }
    }

    proposal.status = if passed {
        ProposalStatus::Executed
    } else {
        ProposalStatus::Expired
    };

    emit!(ProposalExecuted {
        proposal: proposal.key(),
        passed,
        timestamp: current,
    });
    msg!(
        "Proposal {} {}",
        proposal.key(),
        if passed { "executed" } else { "expired" }
    );
    Ok(())
}

#[derive(Accounts)]
pub struct ExecuteProposal<'info> {
    #[account(mut)]
    pub circle: Account<'info, Circle>,

    #[account(
        mut,
        constraint = proposal.circle == circle.key() @ CircleLendError::ProposalNotExecutable
    )]
    pub proposal: Account<'info, Proposal>,

    pub loan: Option<Account<'info, Loan>>,

    pub executor: Signer<'info>,
}
