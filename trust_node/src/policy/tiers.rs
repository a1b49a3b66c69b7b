use crate::error::{Result, TrustError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Marker reported as the next level of the top tier
pub const NO_FURTHER_TIER: &str = "maximum";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    Basic,
    Verified,
    Trusted,
    Premium,
}

impl TrustLevel {
    pub const ALL: [TrustLevel; 4] = [
        TrustLevel::Basic,
        TrustLevel::Verified,
        TrustLevel::Trusted,
        TrustLevel::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::Basic => "basic",
            TrustLevel::Verified => "verified",
            TrustLevel::Trusted => "trusted",
            TrustLevel::Premium => "premium",
        }
    }

    pub fn next(&self) -> Option<TrustLevel> {
        match self {
            TrustLevel::Basic => Some(TrustLevel::Verified),
            TrustLevel::Verified => Some(TrustLevel::Trusted),
            TrustLevel::Trusted => Some(TrustLevel::Premium),
            TrustLevel::Premium => None,
        }
    }

    fn requirements(&self) -> &'static [&'static str] {
        match self {
            TrustLevel::Basic => &[
                "Verify email address",
                "Add phone number",
                "Complete 10 successful bets",
            ],
            TrustLevel::Verified => &[
                "Upload government ID",
                "Complete video verification call",
                "Maintain 30-day betting history",
            ],
            TrustLevel::Trusted => &[
                "Connect hardware security key",
                "Install GeoProp verification app",
                "Enable biometric authentication",
            ],
            TrustLevel::Premium => &[],
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trust level with its qualifying score and betting ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustTier {
    pub level: TrustLevel,
    pub min_score: u8,
    pub max_bet: Decimal,
}

impl TrustTier {
    pub fn new(level: TrustLevel, min_score: u8, max_bet: Decimal) -> Self {
        Self {
            level,
            min_score,
            max_bet,
        }
    }
}

/// Steps required to reach the next tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradePath {
    #[serde(serialize_with = "serialize_next_level")]
    pub next_level: Option<TrustLevel>,
    pub requirements: Vec<String>,
}

impl UpgradePath {
    pub fn is_terminal(&self) -> bool {
        self.next_level.is_none()
    }
}

fn serialize_next_level<S: Serializer>(
    level: &Option<TrustLevel>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match level {
        Some(level) => level.serialize(serializer),
        None => serializer.serialize_str(NO_FURTHER_TIER),
    }
}

/// Requirements to move from `level` to the tier above it
pub fn upgrade_path(level: TrustLevel) -> UpgradePath {
    UpgradePath {
        next_level: level.next(),
        requirements: level
            .requirements()
            .iter()
            .map(|req| req.to_string())
            .collect(),
    }
}

/// Immutable score-band table, built once at startup.
///
/// Holds exactly one tier per level in ascending order; the bands are
/// contiguous and the lowest starts at zero, so every score resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<TrustTier>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                TrustTier::new(TrustLevel::Basic, 0, Decimal::from(10)),
                TrustTier::new(TrustLevel::Verified, 60, Decimal::from(50)),
                TrustTier::new(TrustLevel::Trusted, 80, Decimal::from(200)),
                TrustTier::new(TrustLevel::Premium, 95, Decimal::from(1000)),
            ],
        }
    }
}

impl TierTable {
    pub fn new(tiers: Vec<TrustTier>) -> Result<Self> {
        if tiers.len() != TrustLevel::ALL.len() {
            return Err(TrustError::InvalidTierTable(format!(
                "expected {} tiers, got {}",
                TrustLevel::ALL.len(),
                tiers.len()
            )));
        }

        for (tier, expected) in tiers.iter().zip(TrustLevel::ALL.iter()) {
            if tier.level != *expected {
                return Err(TrustError::InvalidTierTable(format!(
                    "tier {} is out of order (expected {})",
                    tier.level, expected
                )));
            }
            if tier.min_score > 100 {
                return Err(TrustError::InvalidTierTable(format!(
                    "tier {} minimum score {} exceeds 100",
                    tier.level, tier.min_score
                )));
            }
            if tier.max_bet.is_sign_negative() {
                return Err(TrustError::InvalidTierTable(format!(
                    "tier {} has a negative ceiling",
                    tier.level
                )));
            }
        }

        if tiers[0].min_score != 0 {
            return Err(TrustError::InvalidTierTable(
                "lowest tier must start at score 0".to_string(),
            ));
        }

        if tiers.windows(2).any(|pair| pair[0].min_score >= pair[1].min_score) {
            return Err(TrustError::InvalidTierTable(
                "minimum scores must be strictly ascending".to_string(),
            ));
        }

        Ok(Self { tiers })
    }

    /// Highest tier whose minimum score `score` meets
    pub fn resolve_tier(&self, score: u8) -> TrustTier {
        self.tiers
            .iter()
            .rev()
            .find(|tier| score >= tier.min_score)
            .unwrap_or(&self.tiers[0])
            .clone()
    }

    pub fn tier(&self, level: TrustLevel) -> &TrustTier {
        // one tier per level, in TrustLevel::ALL order
        &self.tiers[level as usize]
    }

    pub fn tiers(&self) -> &[TrustTier] {
        &self.tiers
    }

    pub fn upgrade_path(&self, level: TrustLevel) -> UpgradePath {
        upgrade_path(level)
    }
}
