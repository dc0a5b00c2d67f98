pub mod accrue_pool;
pub mod approve_loan;
pub mod create_circle;
pub mod create_pool;
pub mod create_proposal;
pub mod deposit;
pub mod disburse_loan;
pub mod execute_proposal;
pub mod initialize_platform;
pub mod initialize_user;
pub mod join_circle;
pub mod liquidate_collateral;
pub mod lock_collateral;
pub mod mark_defaulted;
pub mod payoff_loan;
pub mod post_credit_score;
pub mod post_price;
pub mod repay_loan;
pub mod request_loan;
pub mod set_pool_status;
pub mod vote_on_proposal;
pub mod withdraw;

pub use accrue_pool::*;
pub use approve_loan::*;
pub use create_circle::*;
pub use create_pool::*;
pub use create_proposal::*;
pub use deposit::*;
pub use disburse_loan::*;
pub use execute_proposal::*;
pub use initialize_platform::*;
pub use initialize_user::*;
pub use join_circle::*;
pub use liquidate_collateral::*;
pub use lock_collateral::*;
pub use mark_defaulted::*;
pub use payoff_loan::*;
pub use post_credit_score::*;
pub use post_price::*;
pub use repay_loan::*;
pub use request_loan::*;
pub use set_pool_status::*;
pub use vote_on_proposal::*;
pub use withdraw::*;
