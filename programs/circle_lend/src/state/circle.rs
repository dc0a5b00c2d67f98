use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, MAX_CIRCLE_MEMBERS, MAX_CIRCLE_NAME_LEN, QUORUM_BPS};
use crate::error::CircleLendError;

/// A social lending circle. Members vouch for each other's loans by vote.
#[account]
#[derive(InitSpace)]
pub struct Circle {
    #[max_len(MAX_CIRCLE_NAME_LEN)]
    pub name: String,
    pub creator: Pubkey,
    #[max_len(MAX_CIRCLE_MEMBERS)]
    pub members: Vec<Pubkey>,
    pub min_credit_score: u16,
    pub max_members: u8,
    /// Monotonic counter seeding proposal PDAs.
    pub total_proposals: u64,
    pub created_at: i64,
    pub bump: u8,
}

impl Circle {
    pub fn is_member(&self, key: &Pubkey) -> bool {
        self.members.contains(key)
    }

    pub fn member_count(&self) -> u16 {
        self.members.len() as u16
    }

    pub fn add_member(&mut self, key: Pubkey) -> Result<()> {
        require!(!self.is_member(&key), CircleLendError::AlreadyMember);
        require!(
            self.members.len() < self.max_members as usize,
            CircleLendError::CircleFull
        );
        self.members.push(key);
        Ok(())
    }

    pub fn remove_member(&mut self, key: &Pubkey) -> Result<()> {
        let before = self.members.len();
        self.members.retain(|m| m != key);
        require!(self.members.len() < before, CircleLendError::NotCircleMember);
        Ok(())
    }
}

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalKind {
    LoanApproval,
    MemberRemoval,
}

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalStatus {
    Active,
    Executed,
    Rejected,
    Expired,
}

#[account]
#[derive(InitSpace)]
pub struct Proposal {
    pub circle: Pubkey,
    pub proposer: Pubkey,
    pub kind: ProposalKind,
    /// Loan account for LoanApproval, member key for MemberRemoval.
    pub target: Pubkey,
    pub votes_for: u16,
    pub votes_against: u16,
    #[max_len(MAX_CIRCLE_MEMBERS)]
    pub voters: Vec<Pubkey>,
    pub created_at: i64,
    pub voting_ends_at: i64,
    pub status: ProposalStatus,
    pub bump: u8,
}

impl Proposal {
    pub fn has_voted(&self, key: &Pubkey) -> bool {
        self.voters.contains(key)
    }

    /// One recorded vote per member, rejected after the window closes.
    pub fn record_vote(&mut self, voter: Pubkey, support: bool, now: i64) -> Result<()> {
        require!(
            self.status == ProposalStatus::Active,
            CircleLendError::ProposalNotExecutable
        );
        require!(now < self.voting_ends_at, CircleLendError::ProposalExpired);
        require!(!self.has_voted(&voter), CircleLendError::AlreadyVoted);
        self.voters.push(voter);
        if support {
            self.votes_for += 1;
        } else {
            self.votes_against += 1;
        }
        Ok(())
    }

    /// Supporting votes against the 60% quorum of the current member count.
    pub fn quorum_reached(&self, member_count: u16) -> bool {
        if member_count == 0 {
            return false;
        }
        (self.votes_for as u64) * BPS_DENOMINATOR >= QUORUM_BPS * member_count as u64
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.voting_ends_at
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::VOTING_WINDOW;

    fn circle_of(n: usize) -> Circle {
        Circle {
            name: "savers".to_string(),
            creator: Pubkey::new_unique(),
            members: (0..n).map(|_| Pubkey::new_unique()).collect(),
            min_credit_score: 500,
            max_members: MAX_CIRCLE_MEMBERS as u8,
            total_proposals: 0,
            created_at: 0,
            bump: 0,
        }
    }

    fn proposal() -> Proposal {
        Proposal {
            circle: Pubkey::default(),
            proposer: Pubkey::default(),
            kind: ProposalKind::LoanApproval,
            target: Pubkey::default(),
            votes_for: 0,
            votes_against: 0,
            voters: vec![],
            created_at: 0,
            voting_ends_at: VOTING_WINDOW,
            status: ProposalStatus::Active,
            bump: 0,
        }
    }

    #[test]
    fn four_of_six_reaches_quorum() {
        let mut p = proposal();
        p.votes_for = 4;
        assert!(p.quorum_reached(6)); // 66.6% >= 60%
    }

    #[test]
    fn three_of_six_misses_quorum() {
        let mut p = proposal();
        p.votes_for = 3;
        assert!(!p.quorum_reached(6)); // 50% < 60%
    }

    #[test]
    fn exact_quorum_counts() {
        let mut p = proposal();
        p.votes_for = 3;
        assert!(p.quorum_reached(5)); // exactly 60%
    }

    #[test]
    fn one_vote_per_member() {
        let mut p = proposal();
        let voter = Pubkey::new_unique();
        p.record_vote(voter, true, 100).unwrap();
        assert!(p.record_vote(voter, false, 101).is_err());
        assert_eq!(p.votes_for, 1);
        assert_eq!(p.votes_against, 0);
    }

    #[test]
    fn votes_rejected_after_window() {
        let mut p = proposal();
        assert!(p.record_vote(Pubkey::new_unique(), true, VOTING_WINDOW).is_err());
    }

    #[test]
    fn membership_capacity_and_dedup() {
        let mut c = circle_of(2);
        let member = c.members[0];
        assert!(c.add_member(member).is_err());
        c.max_members = 3;
        c.add_member(Pubkey::new_unique()).unwrap();
        assert!(c.add_member(Pubkey::new_unique()).is_err()); // full
        c.remove_member(&member).unwrap();
        assert!(!c.is_member(&member));
        assert!(c.remove_member(&member).is_err());
    }
}
