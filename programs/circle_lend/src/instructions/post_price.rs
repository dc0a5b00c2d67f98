use crate::constants::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

/// Price boundary for collateral valuation, written by the platform's
/// price oracle in stablecoin base units per whole token.
pub fn post_price(ctx: Context<PostPrice>, price: u64) -> Result<()> {
    require!(price > 0, CircleLendError::InvalidOraclePrice);

    let feed = &mut ctx.accounts.price_feed;
    let current = Clock::get()?.unix_timestamp;

    feed.mint = ctx.accounts.mint.key();
    feed.price = price;
    feed.updated_at = current;
    feed.bump = ctx.bumps.price_feed;

    msg!("Price {} posted for mint {}", price, feed.mint);
    Ok(())
}

#[derive(Accounts)]
pub struct PostPrice<'info> {
    #[account(
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump,
        constraint = platform.price_oracle == oracle.key() @ CircleLendError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init_if_needed,
        payer = oracle,
        space = 8 + PriceFeed::INIT_SPACE,
        seeds = [SEEDS_PRICE_FEED, mint.key().as_ref()],
        bump
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}
