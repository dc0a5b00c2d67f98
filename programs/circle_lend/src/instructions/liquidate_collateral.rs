use crate::constants::*;
use crate::error::*;
use crate::events::CollateralLiquidated;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Resolve a defaulted loan's collateral: the liquidator keeps a 5% bonus,
/// the remainder goes to the platform treasury against the written-off debt.
/// An NFT cannot be split, so it moves whole to the liquidator with the
/// bonus recorded at oracle value.
pub fn liquidate_collateral(ctx: Context<LiquidateCollateral>) -> Result<()> {
    let loan = &mut ctx.accounts.loan;
    let collateral = &mut ctx.accounts.collateral;
    let price_feed = &ctx.accounts.price_feed;
    let current = Clock::get()?.unix_timestamp;

    require!(
        loan.status == LoanStatus::Defaulted,
        CircleLendError::InvalidLoanState
    );
    require!(!collateral.liquidated, CircleLendError::AlreadyLiquidated);

    price_feed.assert_fresh(current)?;
    let value = price_feed.value_of(collateral.kind, collateral.amount)?;
    let bonus = collateral.liquidation_bonus(value)?;

    let loan_key = loan.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_COLLATERAL_VAULT,
        loan_key.as_ref(),
        &[collateral.vault_bump],
    ]];

    let (to_liquidator, to_treasury) = match collateral.kind {
        CollateralKind::Fungible => {
            let bonus_tokens = collateral.liquidation_bonus(collateral.amount)?;
            (bonus_tokens, collateral.amount - bonus_tokens)
        }
        CollateralKind::NonFungible => (collateral.amount, 0),
    };

    if to_liquidator > 0 {
        let cpi_accounts = TransferChecked {
            from: ctx.accounts.collateral_vault.to_account_info(),
            to: ctx.accounts.liquidator_token_account.to_account_info(),
            mint: ctx.accounts.collateral_mint.to_account_info(),
            authority: ctx.accounts.collateral_vault.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        transfer_checked(cpi_ctx, to_liquidator, ctx.accounts.collateral_mint.decimals)?;
    }
    if to_treasury > 0 {
        let cpi_accounts = TransferChecked {
            from: ctx.accounts.collateral_vault.to_account_info(),
            to: ctx.accounts.treasury_token_account.to_account_info(),
            mint: ctx.accounts.collateral_mint.to_account_info(),
            authority: ctx.accounts.collateral_vault.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        transfer_checked(cpi_ctx, to_treasury, ctx.accounts.collateral_mint.decimals)?;
    }

    collateral.liquidated = true;
    loan.status = LoanStatus::Liquidated;

    emit!(CollateralLiquidated {
        loan: loan.key(),
        liquidator: ctx.accounts.liquidator.key(),
        collateral_transferred: value - bonus,
        bonus,
        timestamp: current,
    });
    msg!(
        "Collateral liquidated for loan {} with bonus {}",
        loan.key(),
        bonus
    );
    Ok(())
}

#[derive(Accounts)]
pub struct LiquidateCollateral<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,

    #[account(
        seeds = [SEEDS_PLATFORM],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_COLLATERAL, loan.key().as_ref()],
        bump = collateral.bump,
        constraint = collateral.loan == loan.key() @ CircleLendError::NoCollateral
    )]
    pub collateral: Account<'info, Collateral>,

    #[account(constraint = collateral_mint.key() == collateral.mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [SEEDS_PRICE_FEED, collateral_mint.key().as_ref()],
        bump = price_feed.bump
    )]
    pub price_feed: Account<'info, PriceFeed>,

    #[account(
        mut,
        seeds = [SEEDS_COLLATERAL_VAULT, loan.key().as_ref()],
        bump = collateral.vault_bump
    )]
    pub collateral_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = liquidator,
        associated_token::mint = collateral_mint,
        associated_token::authority = liquidator,
        associated_token::token_program = token_program,
    )]
    pub liquidator_token_account: InterfaceAccount<'info, TokenAccount>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    #[account(
        mut,
        constraint = treasury_token_account.owner == platform.treasury @ CircleLendError::Unauthorized
    )]
    pub treasury_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
