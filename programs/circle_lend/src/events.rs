use anchor_lang::prelude::*;

// Pool events
#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct InterestAccrued {
    pub pool: Pubkey,
    pub interest: u64,
    pub borrow_index: u128,
    pub utilization_bps: u64,
    pub timestamp: i64,
}

// Loan events
#[event]
pub struct LoanCreated {
    pub loan: Pubkey,
    pub borrower: Pubkey,
    pub pool: Pubkey,
    pub principal: u64,
    pub rate_bps: u16,
    pub installments: u16,
    pub timestamp: i64,
}

#[event]
pub struct PaymentMade {
    pub loan: Pubkey,
    pub amount: u64,
    pub interest_paid: u64,
    pub principal_paid: u64,
    pub late_fee_paid: u64,
    pub remaining_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct LoanCompleted {
    pub loan: Pubkey,
    pub borrower: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct LoanDefaulted {
    pub loan: Pubkey,
    pub borrower: Pubkey,
    pub days_overdue: u32,
    pub timestamp: i64,
}

// Collateral events
#[event]
pub struct CollateralLocked {
    pub loan: Pubkey,
    pub mint: Pubkey,
    pub value: u64,
    pub ratio_bps: u64,
    pub timestamp: i64,
}

#[event]
pub struct CollateralLiquidated {
    pub loan: Pubkey,
    pub liquidator: Pubkey,
    pub collateral_transferred: u64,
    pub bonus: u64,
    pub timestamp: i64,
}

// Credit boundary events
#[event]
pub struct ScorePosted {
    pub owner: Pubkey,
    pub score: u16,
    pub expires_at: i64,
    pub timestamp: i64,
}

// Circle governance events
#[event]
pub struct CircleCreated {
    pub circle: Pubkey,
    pub creator: Pubkey,
    pub min_credit_score: u16,
    pub timestamp: i64,
}

#[event]
pub struct MemberJoined {
    pub circle: Pubkey,
    pub member: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ProposalCreated {
    pub circle: Pubkey,
    pub proposal: Pubkey,
    pub proposer: Pubkey,
    pub voting_ends_at: i64,
    pub timestamp: i64,
}

#[event]
pub struct VoteCast {
    pub proposal: Pubkey,
    pub voter: Pubkey,
    pub support: bool,
    pub votes_for: u16,
    pub votes_against: u16,
    pub timestamp: i64,
}

#[event]
pub struct ProposalExecuted {
    pub proposal: Pubkey,
    pub passed: bool,
    pub timestamp: i64,
}
