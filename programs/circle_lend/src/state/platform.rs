use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct Platform {
    pub authority: Pubkey,
    /// External scoring service signer; the only key allowed to post scores.
    pub score_oracle: Pubkey,
    /// External price service signer for collateral feeds.
    pub price_oracle: Pubkey,
    pub treasury: Pubkey,
    pub platform_fee: u16, // basis points, taken from interest payments
    pub min_loan_amount: u64,
    pub max_loan_amount: u64,
    /// Monotonic counter seeding loan PDAs.
    pub total_loan_requests: u64,
    pub total_loans_issued: u64,
    pub total_volume: u64,
    pub total_defaults: u64,
    pub is_active: bool,
    pub created_at: i64,
    pub bump: u8,
}

#[account]
#[derive(InitSpace)]
pub struct UserProfile {
    pub owner: Pubkey,
    pub active_loans: u8,
    pub successful_loans: u16,
    pub defaulted_loans: u16,
    pub total_borrowed: u64,
    pub total_repaid: u64,
    pub created_at: i64,
    pub last_updated: i64,
    pub bump: u8,
}
