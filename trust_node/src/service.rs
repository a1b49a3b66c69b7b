//! Registration and bet-validation flows over the trust core

use crate::config::TrustConfig;
use crate::device::{ClientHints, DeviceIdentity, Fingerprinter};
use crate::error::{Result, TrustError};
use crate::policy::{authorize, BetAuthorizationResult, TierTable, TrustLevel, UpgradePath};
use crate::storage::IdentityStore;
use crate::verification::{
    HttpProbe, ProcessLister, ReqwestProbe, SysinfoProcessLister, UnknownCheckPolicy,
    VerificationCheckSet, VerificationRunner,
};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of registering a device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceRegistration {
    pub device_id: String,
    pub user_id: String,
    pub trust_score: u8,
    pub trust_level: TrustLevel,
    pub max_bet_amount: Decimal,
    pub verification_checks: BTreeMap<String, bool>,
    /// Unix seconds
    pub registered_at: i64,
    pub next_upgrade_path: UpgradePath,
    /// Checks whose data source was unavailable; their wire value above
    /// follows the configured unknown-check policy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unverified_checks: Vec<String>,
}

/// Wires fingerprinting, verification, tiering and authorization together
pub struct DeviceTrustService {
    fingerprinter: Arc<Fingerprinter>,
    runner: VerificationRunner,
    tiers: TierTable,
    store: Arc<dyn IdentityStore>,
    unknown_policy: UnknownCheckPolicy,
}

impl DeviceTrustService {
    pub fn new(
        fingerprinter: Fingerprinter,
        runner: VerificationRunner,
        tiers: TierTable,
        store: Arc<dyn IdentityStore>,
    ) -> Self {
        let unknown_policy = runner.config().unknown_policy;
        Self {
            fingerprinter: Arc::new(fingerprinter),
            runner,
            tiers,
            store,
            unknown_policy,
        }
    }

    /// Production wiring: local host signals, reqwest probes, sysinfo
    /// process scan, configured tier table
    pub fn from_config(config: &TrustConfig, store: Arc<dyn IdentityStore>) -> Result<Self> {
        let tiers = config.tier_table()?;
        let http: Arc<dyn HttpProbe> = Arc::new(ReqwestProbe::default());
        let processes: Arc<dyn ProcessLister> = Arc::new(SysinfoProcessLister::new());
        Ok(Self::new(
            Fingerprinter::for_host(&config.fingerprint),
            VerificationRunner::new(http, processes, config.verification.clone()),
            tiers,
            store,
        ))
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Fingerprint the host, score it, run the checks and record the tier
    pub async fn register_device(
        &self,
        user_id: &str,
        hints: &ClientHints,
    ) -> Result<DeviceRegistration> {
        let fingerprinter = Arc::clone(&self.fingerprinter);
        let hints_owned = hints.clone();
        // sysinfo reads are blocking
        let fingerprint =
            tokio::task::spawn_blocking(move || fingerprinter.capture_with(&hints_owned)).await?;

        let DeviceIdentity {
            device_id,
            trust_score,
        } = self.fingerprinter.identify(&fingerprint);

        let checks: VerificationCheckSet = self.runner.run_checks(&fingerprint).await;
        let tier = self.tiers.resolve_tier(trust_score);

        self.store.put_identity(&device_id, tier.clone()).await?;

        let unverified_checks: Vec<String> = checks
            .unknown_checks()
            .iter()
            .map(|name| name.as_str().to_string())
            .collect();
        if !unverified_checks.is_empty() {
            warn!(
                "Device {} registered with unverified checks: {:?}",
                device_id, unverified_checks
            );
        }

        info!(
            "Registered device {} for user {}: score={} level={} checks_passed={}/{}",
            device_id,
            user_id,
            trust_score,
            tier.level,
            checks.passed_count(),
            checks.len()
        );

        Ok(DeviceRegistration {
            device_id,
            user_id: user_id.to_string(),
            trust_score,
            trust_level: tier.level,
            max_bet_amount: tier.max_bet,
            verification_checks: checks.as_bools(self.unknown_policy),
            registered_at: chrono::Utc::now().timestamp(),
            next_upgrade_path: self.tiers.upgrade_path(tier.level),
            unverified_checks,
        })
    }

    /// Authorize a bet for a previously registered device
    pub async fn validate_bet_request(
        &self,
        device_id: &str,
        amount: Decimal,
    ) -> Result<BetAuthorizationResult> {
        if amount <= Decimal::ZERO {
            return Err(TrustError::InvalidBetAmount(amount));
        }

        let tier = self
            .store
            .lookup(device_id)
            .await?
            .ok_or_else(|| TrustError::UnknownDevice(device_id.to_string()))?;

        let result = authorize(&tier, amount)?;
        if let BetAuthorizationResult::Denied { reason, .. } = &result {
            warn!("Bet denied for device {}: {}", device_id, reason);
        }
        Ok(result)
    }
}
