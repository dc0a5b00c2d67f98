use crate::constants::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn request_loan(
    ctx: Context<RequestLoan>,
    amount: u64,
    duration_days: u32,
    frequency: u8,
    collateralized: bool,
) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    let pool = &mut ctx.accounts.pool;
    let user_profile = &ctx.accounts.user_profile;
    let credit_score = &ctx.accounts.credit_score;
    let loan = &mut ctx.accounts.loan;
    let current = Clock::get()?.unix_timestamp;

    require!(platform.is_active, CircleLendError::PlatformNotActive);
    require!(pool.is_whitelisted, CircleLendError::InvalidAsset);

    // Validate loan parameters
    require!(amount > 0, CircleLendError::ZeroAmount);
    require!(
        amount >= platform.min_loan_amount && amount <= platform.max_loan_amount,
        CircleLendError::InvalidPoolConfiguration
    );
    require!(
        (MIN_LOAN_DURATION_DAYS..=MAX_LOAN_DURATION_DAYS).contains(&duration_days),
        CircleLendError::InvalidDuration
    );
    let frequency = Frequency::from_u8(frequency)?;
    let total_installments = duration_days / frequency.interval_days();
    require!(
        total_installments >= 1 && total_installments as usize <= MAX_INSTALLMENTS,
        CircleLendError::InvalidDuration
    );
    require!(
        user_profile.active_loans == 0,
        CircleLendError::BorrowerHasActiveLoan
    );

    // A missing or expired score refuses the request outright
    credit_score.assert_usable(current)?;
    let tier = tier_for_score(credit_score.score)?;
    require!(
        amount <= tier.borrowing_limit,
        CircleLendError::AmountExceedsTierLimit
    );
    let annual_rate_bps = base_rate_bps(credit_score.score, collateralized)?;

    pool.accrue(current)?;
    require!(
        amount <= pool.available_liquidity(),
        CircleLendError::InsufficientLiquidity
    );

    // Circle loans gate approval on a member vote
    let circle = match ctx.accounts.circle.as_ref() {
        Some(circle) => {
            require!(
                circle.is_member(&ctx.accounts.borrower.key()),
                CircleLendError::NotCircleMember
            );
            Some(circle.key())
        }
        None => None,
    };

    loan.borrower = ctx.accounts.borrower.key();
    loan.pool = pool.key();
    loan.circle = circle;
    loan.principal = amount;
    loan.annual_rate_bps = annual_rate_bps;
    loan.frequency = frequency;
    loan.duration_days = duration_days;
    loan.total_installments = total_installments as u16;
    loan.installment_amount = 0; // fixed at disbursement
    loan.paid_installments = 0;
    loan.remaining_balance = 0;
    loan.status = LoanStatus::Requested;
    loan.has_collateral = collateralized;
    loan.created_at = current;
    loan.disbursed_at = 0;
    loan.next_due_ts = 0;
    loan.bump = ctx.bumps.loan;

    platform.total_loan_requests = platform
        .total_loan_requests
        .checked_add(1)
        .ok_or(CircleLendError::MathOverflow)?;

    msg!(
        "Loan requested: {} tokens over {} days at {} bps",
        amount,
        duration_days,
        annual_rate_bps
    );
    Ok(())
}

#[derive(Accounts)]
pub struct RequestLoan<'info> {
    #[account(
        mut,
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        seeds = [SEEDS_USER, borrower.key().as_ref()],
        bump = user_profile.bump
    )]
    pub user_profile: Account<'info, UserProfile>,

    #[account(
        seeds = [SEEDS_CREDIT, borrower.key().as_ref()],
        bump = credit_score.bump
    )]
    pub credit_score: Account<'info, CreditScore>,

    #[account(
        mut,
        seeds = [SEEDS_POOL, pool.mint.as_ref()],
        bump = pool.bump,
        constraint = pool.is_active @ CircleLendError::PoolInactive
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = borrower,
        space = 8 + Loan::INIT_SPACE,
        seeds = [
            SEEDS_LOAN,
            borrower.key().as_ref(),
            &platform.total_loan_requests.to_le_bytes()
        ],
        bump
    )]
    pub loan: Account<'info, Loan>,

    pub circle: Option<Account<'info, Circle>>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub system_program: Program<'info, System>,
}
