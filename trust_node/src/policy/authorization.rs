use super::tiers::{upgrade_path, TrustLevel, TrustTier, UpgradePath};
use crate::error::{Result, TrustError};
use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of checking a bet against a tier ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BetAuthorizationResult {
    Approved {
        trust_level: TrustLevel,
        /// Ceiling minus the requested amount
        remaining_limit: Decimal,
    },
    Denied {
        reason: String,
        upgrade_path: UpgradePath,
    },
}

impl BetAuthorizationResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, BetAuthorizationResult::Approved { .. })
    }
}

/// Check `requested` against the tier ceiling. The ceiling itself is allowed.
///
/// A non-positive amount is a caller bug, not a denial, and is rejected
/// before any comparison.
pub fn authorize(tier: &TrustTier, requested: Decimal) -> Result<BetAuthorizationResult> {
    if requested <= Decimal::ZERO {
        return Err(TrustError::InvalidBetAmount(requested));
    }

    if requested > tier.max_bet {
        return Ok(BetAuthorizationResult::Denied {
            reason: format!(
                "requested amount {} exceeds tier ceiling {}",
                requested, tier.max_bet
            ),
            upgrade_path: upgrade_path(tier.level),
        });
    }

    Ok(BetAuthorizationResult::Approved {
        trust_level: tier.level,
        remaining_limit: tier.max_bet - requested,
    })
}
