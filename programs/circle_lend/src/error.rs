use anchor_lang::prelude::*;

#[error_code]
pub enum CircleLendError {
    // Platform / configuration (6000-6009)
    #[msg("Invalid platform configuration")]
    InvalidPlatformConfiguration,
    #[msg("Invalid pool configuration")]
    InvalidPoolConfiguration,
    #[msg("Platform is not active")]
    PlatformNotActive,
    #[msg("Unauthorized: signer does not have permission")]
    Unauthorized,

    // Pool ledger (6010-6019)
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Asset is not whitelisted")]
    InvalidAsset,
    #[msg("Pool is not active")]
    PoolInactive,
    #[msg("Insufficient liquidity in pool")]
    InsufficientLiquidity,
    #[msg("Insufficient shares for withdrawal")]
    InsufficientShares,
    #[msg("Share amount rounds to zero")]
    ShareAmountZero,
    #[msg("Pool operation already in progress")]
    ReentrancyBlocked,

    // Math (6020-6024)
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Division by zero")]
    DivisionByZero,

    // Credit scoring boundary (6025-6034)
    #[msg("Credit score out of range")]
    ScoreOutOfRange,
    #[msg("Credit score has expired")]
    ScoreExpired,
    #[msg("No valid credit score available")]
    ScoreUnavailable,
    #[msg("Score refresh rate limit exceeded")]
    ScoreRateLimited,

    // Loan engine (6035-6049)
    #[msg("Loan amount exceeds credit tier limit")]
    AmountExceedsTierLimit,
    #[msg("Loan duration out of bounds")]
    InvalidDuration,
    #[msg("Invalid repayment frequency")]
    InvalidFrequency,
    #[msg("Loan is not in the required state")]
    InvalidLoanState,
    #[msg("Payment does not cover accrued interest and late fees")]
    InvalidPaymentAmount,
    #[msg("Borrower already has an active loan")]
    BorrowerHasActiveLoan,
    #[msg("Loan is not overdue")]
    LoanNotOverdue,

    // Collateral (6050-6059)
    #[msg("Collateral value below minimum ratio")]
    UnderCollateralized,
    #[msg("Collateral value above maximum ratio")]
    OverCollateralized,
    #[msg("Oracle price is stale")]
    OracleStale,
    #[msg("Oracle price is invalid")]
    InvalidOraclePrice,
    #[msg("Collateral has already been liquidated")]
    AlreadyLiquidated,
    #[msg("Loan has no collateral attached")]
    NoCollateral,
    #[msg("Unknown collateral kind")]
    InvalidCollateralKind,

    // Circle governance (6060-6074)
    #[msg("Caller is not a circle member")]
    NotCircleMember,
    #[msg("Already a member of this circle")]
    AlreadyMember,
    #[msg("Circle is at maximum capacity")]
    CircleFull,
    #[msg("Credit score below circle minimum")]
    ScoreBelowCircleMinimum,
    #[msg("Member has already voted on this proposal")]
    AlreadyVoted,
    #[msg("Proposal has not reached quorum")]
    QuorumNotMet,
    #[msg("Proposal voting window has expired")]
    ProposalExpired,
    #[msg("Proposal is not in an executable state")]
    ProposalNotExecutable,
    #[msg("Circle name too long")]
    CircleNameTooLong,
}
