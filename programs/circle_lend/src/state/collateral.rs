use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, LIQUIDATION_BONUS_BPS, MAX_COLLATERAL_RATIO_BPS, MAX_ORACLE_STALENESS,
    MIN_COLLATERAL_RATIO_BPS, TOKEN_DECIMALS,
};
use crate::error::CircleLendError;

#[derive(InitSpace, AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CollateralKind {
    Fungible,
    NonFungible,
}

/// Collateral pledged against a loan. References the loan, never owns it;
/// the loan engine drives the default signal that unlocks liquidation.
#[account]
#[derive(InitSpace)]
pub struct Collateral {
    pub loan: Pubkey,
    pub mint: Pubkey,
    pub kind: CollateralKind,
    /// Token amount for fungibles; always 1 for NFTs.
    pub amount: u64,
    pub value_at_lock: u64,
    pub locked_at: i64,
    pub liquidated: bool,
    pub bump: u8,
    pub vault_bump: u8,
}

impl Collateral {
    /// Liquidator's cut of the collateral value.
    pub fn liquidation_bonus(&self, value: u64) -> Result<u64> {
        let bonus = (value as u128)
            .checked_mul(LIQUIDATION_BONUS_BPS as u128)
            .ok_or(CircleLendError::MathOverflow)?
            .checked_div(BPS_DENOMINATOR as u128)
            .ok_or(CircleLendError::DivisionByZero)?;
        u64::try_from(bonus).map_err(|_| CircleLendError::MathOverflow.into())
    }
}

/// Oracle-posted price for a collateral mint, quoted in stablecoin base
/// units per whole token. Written only by the platform's price oracle.
#[account]
#[derive(InitSpace)]
pub struct PriceFeed {
    pub mint: Pubkey,
    pub price: u64,
    pub updated_at: i64,
    pub bump: u8,
}

impl PriceFeed {
    pub fn assert_fresh(&self, now: i64) -> Result<()> {
        require!(self.price > 0, CircleLendError::InvalidOraclePrice);
        require!(
            now - self.updated_at <= MAX_ORACLE_STALENESS,
            CircleLendError::OracleStale
        );
        Ok(())
    }

    /// Value of a pledged position at this price.
    pub fn value_of(&self, kind: CollateralKind, amount: u64) -> Result<u64> {
        match kind {
            CollateralKind::NonFungible => Ok(self.price),
            CollateralKind::Fungible => {
                let value = (amount as u128)
                    .checked_mul(self.price as u128)
                    .ok_or(CircleLendError::MathOverflow)?
                    .checked_div(10u128.pow(TOKEN_DECIMALS as u32))
                    .ok_or(CircleLendError::DivisionByZero)?;
                u64::try_from(value).map_err(|_| CircleLendError::MathOverflow.into())
            }
        }
    }
}

/// Collateral value over loan principal, in basis points.
pub fn collateral_ratio_bps(value: u64, principal: u64) -> Result<u64> {
    if principal == 0 {
        return Err(CircleLendError::DivisionByZero.into());
    }
    let ratio = (value as u128)
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(CircleLendError::MathOverflow)?
        .checked_div(principal as u128)
        .ok_or(CircleLendError::DivisionByZero)?;
    u64::try_from(ratio).map_err(|_| CircleLendError::MathOverflow.into())
}

/// Lock precondition: value must sit inside the 50%-150% band of principal.
pub fn check_collateral_ratio(value: u64, principal: u64) -> Result<u64> {
    let ratio = collateral_ratio_bps(value, principal)?;
    require!(
        ratio >= MIN_COLLATERAL_RATIO_BPS,
        CircleLendError::UnderCollateralized
    );
    require!(
        ratio <= MAX_COLLATERAL_RATIO_BPS,
        CircleLendError::OverCollateralized
    );
    Ok(ratio)
}

#[cfg(test)]
mod test {
    use super::*;

    fn feed(price: u64, updated_at: i64) -> PriceFeed {
        PriceFeed {
            mint: Pubkey::default(),
            price,
            updated_at,
            bump: 0,
        }
    }

    #[test]
    fn stale_price_rejected() {
        let f = feed(1_000_000, 0);
        assert!(f.assert_fresh(MAX_ORACLE_STALENESS).is_ok());
        assert!(f.assert_fresh(MAX_ORACLE_STALENESS + 1).is_err());
        assert!(feed(0, 0).assert_fresh(0).is_err());
    }

    #[test]
    fn fungible_value_scales_by_amount() {
        // 2.5 tokens at 4.00 each
        let f = feed(4_000_000, 0);
        assert_eq!(
            f.value_of(CollateralKind::Fungible, 2_500_000).unwrap(),
            10_000_000
        );
    }

    #[test]
    fn nft_value_is_the_quoted_price() {
        let f = feed(750_000_000, 0);
        assert_eq!(f.value_of(CollateralKind::NonFungible, 1).unwrap(), 750_000_000);
    }

    #[test]
    fn ratio_band_enforced() {
        let principal = 1_000_000_000u64;
        assert!(check_collateral_ratio(499_000_000, principal).is_err()); // under 50%
        assert_eq!(check_collateral_ratio(500_000_000, principal).unwrap(), 5_000);
        assert_eq!(check_collateral_ratio(1_500_000_000, principal).unwrap(), 15_000);
        assert!(check_collateral_ratio(1_501_000_000, principal).is_err()); // over 150%
    }

    #[test]
    fn bonus_is_five_percent() {
        let collateral = Collateral {
            loan: Pubkey::default(),
            mint: Pubkey::default(),
            kind: CollateralKind::Fungible,
            amount: 0,
            value_at_lock: 0,
            locked_at: 0,
            liquidated: false,
            bump: 0,
            vault_bump: 0,
        };
        assert_eq!(collateral.liquidation_bonus(1_000_000_000).unwrap(), 50_000_000);
    }
}
