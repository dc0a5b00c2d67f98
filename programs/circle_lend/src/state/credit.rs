use anchor_lang::prelude::*;

use crate::constants::{COLLATERAL_RATE_DISCOUNT_BPS, MAX_CREDIT_SCORE};
use crate::error::CircleLendError;

/// Externally supplied credit score, written only by the platform's score
/// oracle. The program never computes scores; it validates range and
/// freshness and rate-limits refreshes per address.
#[account]
#[derive(InitSpace)]
pub struct CreditScore {
    pub owner: Pubkey,
    pub score: u16,
    pub posted_at: i64,
    pub expires_at: i64,
    pub window_start: i64,
    pub posts_in_window: u8,
    pub bump: u8,
}

impl CreditScore {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Loan flow precondition: a missing or expired score refuses the
    /// request, never silently substitutes a default.
    pub fn assert_usable(&self, now: i64) -> Result<()> {
        require!(!self.is_expired(now), CircleLendError::ScoreUnavailable);
        Ok(())
    }

    /// Range/staleness check at the tier-adapter boundary.
    pub fn assert_not_expired(&self, now: i64) -> Result<()> {
        require!(!self.is_expired(now), CircleLendError::ScoreExpired);
        Ok(())
    }
}

/// Risk tier mapped from a score by ordered range lookup. Static table;
/// scores come from the external service.
pub struct CreditTier {
    pub min_score: u16,
    pub max_score: u16,
    pub label: &'static str,
    pub borrowing_limit: u64,
    pub interest_rate_bps: u16,
}

/// Limits in 6-decimal stablecoin base units.
pub const CREDIT_TIERS: [CreditTier; 5] = [
    CreditTier {
        min_score: 0,
        max_score: 349,
        label: "Bad",
        borrowing_limit: 50_000_000,
        interest_rate_bps: 2_000,
    },
    CreditTier {
        min_score: 350,
        max_score: 499,
        label: "Poor",
        borrowing_limit: 150_000_000,
        interest_rate_bps: 1_600,
    },
    // Default tier for new, unscored users
    CreditTier {
        min_score: 500,
        max_score: 649,
        label: "Fair",
        borrowing_limit: 500_000_000,
        interest_rate_bps: 1_200,
    },
    CreditTier {
        min_score: 650,
        max_score: 799,
        label: "Good",
        borrowing_limit: 1_500_000_000,
        interest_rate_bps: 1_000,
    },
    CreditTier {
        min_score: 800,
        max_score: 1_000,
        label: "Excellent",
        borrowing_limit: 5_000_000_000,
        interest_rate_bps: 800,
    },
];

pub fn tier_for_score(score: u16) -> Result<&'static CreditTier> {
    require!(score <= MAX_CREDIT_SCORE, CircleLendError::ScoreOutOfRange);
    CREDIT_TIERS
        .iter()
        .find(|tier| score >= tier.min_score && score <= tier.max_score)
        .ok_or(CircleLendError::ScoreOutOfRange.into())
}

/// Tier rate with the flat discount for collateralized loans.
pub fn base_rate_bps(score: u16, collateralized: bool) -> Result<u16> {
    let tier = tier_for_score(score)?;
    if collateralized {
        Ok(tier
            .interest_rate_bps
            .saturating_sub(COLLATERAL_RATE_DISCOUNT_BPS))
    } else {
        Ok(tier.interest_rate_bps)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for_score(0).unwrap().label, "Bad");
        assert_eq!(tier_for_score(349).unwrap().label, "Bad");
        assert_eq!(tier_for_score(350).unwrap().label, "Poor");
        assert_eq!(tier_for_score(500).unwrap().label, "Fair");
        assert_eq!(tier_for_score(649).unwrap().label, "Fair");
        assert_eq!(tier_for_score(650).unwrap().label, "Good");
        assert_eq!(tier_for_score(800).unwrap().label, "Excellent");
        assert_eq!(tier_for_score(1_000).unwrap().label, "Excellent");
    }

    #[test]
    fn out_of_range_score_rejected() {
        assert!(tier_for_score(1_001).is_err());
    }

    #[test]
    fn fair_tier_limit_for_new_users() {
        let tier = tier_for_score(500).unwrap();
        assert_eq!(tier.borrowing_limit, 500_000_000);
        assert_eq!(tier.interest_rate_bps, 1_200);
    }

    #[test]
    fn collateral_discount_is_flat_200bps() {
        assert_eq!(base_rate_bps(500, false).unwrap(), 1_200);
        assert_eq!(base_rate_bps(500, true).unwrap(), 1_000);
        assert_eq!(base_rate_bps(900, true).unwrap(), 600);
    }

    #[test]
    fn score_expiry() {
        let score = CreditScore {
            owner: Pubkey::default(),
            score: 700,
            posted_at: 0,
            expires_at: 1_000,
            window_start: 0,
            posts_in_window: 1,
            bump: 0,
        };
        assert!(score.assert_usable(999).is_ok());
        assert!(score.assert_usable(1_000).is_err());
    }
}
