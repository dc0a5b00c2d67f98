use crate::constants::*;
use crate::error::*;
use crate::events::CollateralLocked;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

pub fn lock_collateral(ctx: Context<LockCollateral>, kind: u8, amount: u64) -> Result<()> {
    let loan = &ctx.accounts.loan;
    let collateral = &mut ctx.accounts.collateral;
    let price_feed = &ctx.accounts.price_feed;
    let current = Clock::get()?.unix_timestamp;

    require!(
        loan.status == LoanStatus::Requested || loan.status == LoanStatus::Approved,
        CircleLendError::InvalidLoanState
    );
    require!(loan.has_collateral, CircleLendError::NoCollateral);

    let kind = match kind {
        0 => CollateralKind::Fungible,
        1 => CollateralKind::NonFungible,
        _ => return Err(CircleLendError::InvalidCollateralKind.into()),
    };
    let amount = match kind {
        CollateralKind::NonFungible => 1,
        CollateralKind::Fungible => {
            require!(amount > 0, CircleLendError::ZeroAmount);
            amount
        }
    };

    // Externally priced; the band keeps micro-loans from being either
    // unsecured in practice or absurdly over-pledged
    price_feed.assert_fresh(current)?;
    let value = price_feed.value_of(kind, amount)?;
    let ratio_bps = check_collateral_ratio(value, loan.principal)?;

    // Escrow the pledged tokens
    let transfer_cpi_accounts = TransferChecked {
        from: ctx.accounts.borrower_token_account.to_account_info(),
        to: ctx.accounts.collateral_vault.to_account_info(),
        mint: ctx.accounts.collateral_mint.to_account_info(),
        authority: ctx.accounts.borrower.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_cpi_accounts,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.collateral_mint.decimals)?;

    collateral.loan = loan.key();
    collateral.mint = ctx.accounts.collateral_mint.key();
    collateral.kind = kind;
    collateral.amount = amount;
    collateral.value_at_lock = value;
    collateral.locked_at = current;
    collateral.liquidated = false;
    collateral.bump = ctx.bumps.collateral;
    collateral.vault_bump = ctx.bumps.collateral_vault;

    emit!(CollateralLocked {
        loan: loan.key(),
        mint: collateral.mint,
        value,
        ratio_bps,
        timestamp: current,
    });
    msg!(
        "Collateral worth {} locked at {} bps of principal",
        value,
        ratio_bps
    );
    Ok(())
}

#[derive(Accounts)]
pub struct LockCollateral<'info> {
    #[account(
        constraint = loan.borrower == borrower.key() @ CircleLendError::Unauthorized
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        init,
        payer = borrower,
        space = 8 + Collateral::INIT_SPACE,
        seeds = [SEEDS_COLLATERAL, loan.key().as_ref()],
        bump
    )]
    pub collateral: Account<'info, Collateral>,

    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [SEEDS_PRICE_FEED, collateral_mint.key().as_ref()],
        bump = price_feed.bump
    )]
    pub price_feed: Account<'info, PriceFeed>,

    #[account(
        init,
        payer = borrower,
        token::mint = collateral_mint,
        token::authority = collateral_vault,
        seeds = [SEEDS_COLLATERAL_VAULT, loan.key().as_ref()],
        bump
    )]
    pub collateral_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_token_account: InterfaceAccount<'info, TokenAccount>,
    pub associated_token_program: Program<'info, AssociatedToken>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
