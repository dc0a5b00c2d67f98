pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod circle_lend {
    use super::*;

    pub fn initialize_platform(
        ctx: Context<InitializePlatform>,
        score_oracle: Pubkey,
        price_oracle: Pubkey,
        platform_fee: u16, // basis points
        min_loan_amount: u64,
        max_loan_amount: u64,
    ) -> Result<()> {
        instructions::initialize_platform(
            ctx,
            score_oracle,
            price_oracle,
            platform_fee,
            min_loan_amount,
            max_loan_amount,
        )?;
        Ok(())
    }

    pub fn initialize_user(ctx: Context<InitializeUser>) -> Result<()> {
        instructions::initialize_user(ctx)?;
        Ok(())
    }

    pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
        instructions::create_pool(ctx)?;
        Ok(())
    }

    pub fn set_pool_status(
        ctx: Context<SetPoolStatus>,
        is_active: bool,
        is_whitelisted: bool,
    ) -> Result<()> {
        instructions::set_pool_status(ctx, is_active, is_whitelisted)?;
        Ok(())
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)?;
        Ok(())
    }

    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw(ctx, shares)?;
        Ok(())
    }

    pub fn accrue_pool(ctx: Context<AccruePool>) -> Result<()> {
        instructions::accrue_pool(ctx)?;
        Ok(())
    }

    pub fn post_credit_score(
        ctx: Context<PostCreditScore>,
        score: u16,
        ttl_seconds: i64,
    ) -> Result<()> {
        instructions::post_credit_score(ctx, score, ttl_seconds)?;
        Ok(())
    }

    pub fn post_price(ctx: Context<PostPrice>, price: u64) -> Result<()> {
        instructions::post_price(ctx, price)?;
        Ok(())
    }

    pub fn request_loan(
        ctx: Context<RequestLoan>,
        amount: u64,
        duration_days: u32,
        frequency: u8,
        collateralized: bool,
    ) -> Result<()> {
        instructions::request_loan(ctx, amount, duration_days, frequency, collateralized)?;
        Ok(())
    }

    pub fn approve_loan(ctx: Context<ApproveLoan>) -> Result<()> {
        instructions::approve_loan(ctx)?;
        Ok(())
    }

    pub fn reject_loan(ctx: Context<ApproveLoan>) -> Result<()> {
        instructions::reject_loan(ctx)?;
        Ok(())
    }

    pub fn disburse_loan(ctx: Context<DisburseLoan>) -> Result<()> {
        instructions::disburse_loan(ctx)?;
        Ok(())
    }

    pub fn repay_loan(ctx: Context<RepayLoan>, payment_amount: u64) -> Result<()> {
        instructions::repay_loan(ctx, payment_amount)?;
        Ok(())
    }

    pub fn payoff_loan(ctx: Context<PayoffLoan>) -> Result<()> {
        instructions::payoff_loan(ctx)?;
        Ok(())
    }

    pub fn mark_defaulted(ctx: Context<MarkDefaulted>) -> Result<()> {
        instructions::mark_defaulted(ctx)?;
        Ok(())
    }

    pub fn lock_collateral(ctx: Context<LockCollateral>, kind: u8, amount: u64) -> Result<()> {
        instructions::lock_collateral(ctx, kind, amount)?;
        Ok(())
    }

    pub fn liquidate_collateral(ctx: Context<LiquidateCollateral>) -> Result<()> {
        instructions::liquidate_collateral(ctx)?;
        Ok(())
    }

    pub fn create_circle(
        ctx: Context<CreateCircle>,
        name: String,
        min_credit_score: u16,
        max_members: u8,
    ) -> Result<()> {
        instructions::create_circle(ctx, name, min_credit_score, max_members)?;
        Ok(())
    }

    pub fn join_circle(ctx: Context<JoinCircle>) -> Result<()> {
        instructions::join_circle(ctx)?;
        Ok(())
    }

    pub fn create_proposal(ctx: Context<CreateProposal>, kind: u8, target: Pubkey) -> Result<()> {
        instructions::create_proposal(ctx, kind, target)?;
        Ok(())
    }

    pub fn vote_on_proposal(ctx: Context<VoteOnProposal>, support: bool) -> Result<()> {
        instructions::vote_on_proposal(ctx, support)?;
        Ok(())
    }

    pub fn execute_proposal(ctx: Context<ExecuteProposal>) -> Result<()> {
        instructions::execute_proposal(ctx)?;
        Ok(())
    }
}
