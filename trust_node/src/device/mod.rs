//! Device fingerprinting: host signal capture, content-derived device ids
//! and the additive trust score.

pub mod fingerprint;
pub mod scoring;
pub mod signals;

pub use fingerprint::{ClientHints, DeviceFingerprint, NetworkInterface, ScreenResolution};
pub use scoring::ScoringRules;
pub use signals::{HostSignals, SysinfoSignals};

use crate::config::FingerprintConfig;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity derived from a fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Hex SHA-256 of the canonical fingerprint
    pub device_id: String,
    pub trust_score: u8,
}

/// Captures fingerprints from a signal source and derives identities
pub struct Fingerprinter {
    signals: Arc<dyn HostSignals>,
    rules: ScoringRules,
    defaults: FingerprintConfig,
}

impl Fingerprinter {
    pub fn new(signals: Arc<dyn HostSignals>, config: &FingerprintConfig) -> Self {
        Self {
            signals,
            rules: ScoringRules::new(config.gpu_markers.clone()),
            defaults: config.clone(),
        }
    }

    /// Fingerprinter over the local host
    pub fn for_host(config: &FingerprintConfig) -> Self {
        Self::new(Arc::new(SysinfoSignals::new()), config)
    }

    /// Capture with no client-reported attributes
    pub fn capture(&self) -> DeviceFingerprint {
        self.capture_with(&ClientHints::default())
    }

    /// Capture a fresh fingerprint. Never fails: any signal that cannot be
    /// read is recorded as empty or zero.
    pub fn capture_with(&self, hints: &ClientHints) -> DeviceFingerprint {
        let signals = &self.signals;

        let network_interfaces = signals
            .ipv4_interfaces()
            .into_iter()
            .map(|(interface, ip)| NetworkInterface { interface, ip })
            .collect();

        let timezone = hints
            .timezone
            .clone()
            .or_else(|| signals.timezone())
            .unwrap_or_else(|| "UTC".to_string());

        let fingerprint = DeviceFingerprint {
            os: signals.os_name().unwrap_or_default(),
            os_version: signals.os_version().unwrap_or_default(),
            architecture: signals.architecture().unwrap_or_default(),
            processor: signals.processor().unwrap_or_default(),
            cpu_count: signals.cpu_count().unwrap_or(0),
            memory_total: signals.memory_total().unwrap_or(0),
            disk_total: signals.disk_total().unwrap_or(0),
            network_interfaces,
            user_agent: hints
                .user_agent
                .clone()
                .unwrap_or_else(|| self.defaults.default_user_agent.clone()),
            screen_resolution: ScreenResolution {
                width: hints.screen_width.unwrap_or(self.defaults.default_screen_width),
                height: hints.screen_height.unwrap_or(self.defaults.default_screen_height),
            },
            timezone,
        };

        debug!(
            "Captured fingerprint: os={} cpus={} memory={} interfaces={}",
            fingerprint.os,
            fingerprint.cpu_count,
            fingerprint.memory_total,
            fingerprint.network_interfaces.len()
        );

        fingerprint
    }

    /// Derive the device id and trust score. Pure.
    pub fn identify(&self, fp: &DeviceFingerprint) -> DeviceIdentity {
        DeviceIdentity {
            device_id: fp.digest(),
            trust_score: self.rules.score(fp),
        }
    }
}
