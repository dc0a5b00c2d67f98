use anchor_lang::prelude::*;

// PDA Seeds
#[constant]
pub const SEEDS_PLATFORM: &[u8] = b"platform";
#[constant]
pub const SEEDS_USER: &[u8] = b"user";
#[constant]
pub const SEEDS_POOL: &[u8] = b"pool";
#[constant]
pub const SEEDS_POOL_VAULT: &[u8] = b"pool_vault";
#[constant]
pub const SEEDS_POSITION: &[u8] = b"position";
#[constant]
pub const SEEDS_CREDIT: &[u8] = b"credit";
#[constant]
pub const SEEDS_LOAN: &[u8] = b"loan";
#[constant]
pub const SEEDS_SCHEDULE: &[u8] = b"schedule";
#[constant]
pub const SEEDS_COLLATERAL: &[u8] = b"collateral";
#[constant]
pub const SEEDS_COLLATERAL_VAULT: &[u8] = b"collateral_vault";
#[constant]
pub const SEEDS_PRICE_FEED: &[u8] = b"price_feed";
#[constant]
pub const SEEDS_CIRCLE: &[u8] = b"circle";
#[constant]
pub const SEEDS_PROPOSAL: &[u8] = b"proposal";

// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

// WAD precision (1e18) for fixed-point index and amortization math
pub const WAD: u128 = 1_000_000_000_000_000_000;

// Stablecoin base units (USDC-style, 6 decimals)
pub const TOKEN_DECIMALS: u8 = 6;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;
pub const DAYS_PER_YEAR: u64 = 365;

// Interest rate curve (all in basis points)
pub const BASE_RATE_BPS: u64 = 500; // 5% at zero utilization
pub const SLOPE1_BPS: u64 = 1_000; // +10% up to the kink
pub const SLOPE2_BPS: u64 = 4_000; // +40% past the kink
pub const OPTIMAL_UTILIZATION_BPS: u64 = 8_000; // 80% kink
pub const RESERVE_FACTOR_BPS: u64 = 1_000; // 10% of borrow interest to reserves

// Loan parameters
pub const MIN_LOAN_DURATION_DAYS: u32 = 30;
pub const MAX_LOAN_DURATION_DAYS: u32 = 365;
pub const MAX_INSTALLMENTS: usize = 52; // weekly over a full year
pub const LATE_FEE_BPS: u64 = 200; // 2% of the installment per full week late
pub const DEFAULT_AFTER_DAYS: u32 = 30; // overdue beyond this marks default
pub const EARLY_PAYOFF_INTEREST_BPS: u64 = 5_000; // 50% of remaining interest

// Collateral
pub const MIN_COLLATERAL_RATIO_BPS: u64 = 5_000; // 50% of principal
pub const MAX_COLLATERAL_RATIO_BPS: u64 = 15_000; // 150% of principal
pub const LIQUIDATION_BONUS_BPS: u64 = 500; // 5% to the liquidator
pub const MAX_ORACLE_STALENESS: i64 = 300; // seconds

// Credit scores
pub const MAX_CREDIT_SCORE: u16 = 1_000;
pub const COLLATERAL_RATE_DISCOUNT_BPS: u16 = 200; // flat discount for secured loans
pub const SCORE_RATE_WINDOW: i64 = 3_600; // rate-limit window per address
pub const SCORE_REQUESTS_PER_WINDOW: u8 = 5;

// Circle governance
pub const MAX_CIRCLE_MEMBERS: usize = 20;
pub const QUORUM_BPS: u64 = 6_000; // 60% of current members must vote for
pub const VOTING_WINDOW: i64 = 7 * SECONDS_PER_DAY;
pub const MAX_CIRCLE_NAME_LEN: usize = 50;
