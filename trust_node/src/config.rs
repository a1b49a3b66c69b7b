//! Layered configuration for the trust node.
//!
//! Values are resolved in order: built-in defaults, an optional YAML/TOML
//! file, then `GEOPROP__*` environment variables. A bare `PORT` variable
//! overrides the listen port last, as hosted platforms inject it that way.

use crate::error::{Result, TrustError};
use crate::policy::{TierTable, TrustTier};
use crate::verification::UnknownCheckPolicy;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound on any outbound verification probe
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    pub server: ServerConfig,
    pub verification: VerificationConfig,
    pub fingerprint: FingerprintConfig,
    /// Score bands and ceilings, lowest tier first
    pub tiers: Vec<TrustTier>,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            verification: VerificationConfig::default(),
            fingerprint: FingerprintConfig::default(),
            tiers: TierTable::default().tiers().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "https://geoprop.ai".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Liveness endpoint probed by the network-stability check
    pub health_url: String,
    /// IP-geolocation endpoint; must answer JSON with a `status` field
    pub geolocation_url: String,
    pub timeout_secs: u64,
    /// Lowercase substrings that flag a running process as a cheat tool
    pub suspicious_processes: Vec<String>,
    pub unknown_policy: UnknownCheckPolicy,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            health_url: "https://api.iotex.io/health".to_string(),
            geolocation_url: "http://ip-api.com/json".to_string(),
            timeout_secs: MAX_PROBE_TIMEOUT_SECS,
            suspicious_processes: [
                "cheatengine",
                "artmoney",
                "gameguardian",
                "gamehack",
                "speedhack",
                "trainer",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            unknown_policy: UnknownCheckPolicy::FailOpen,
        }
    }
}

impl VerificationConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Case-insensitive substrings of the processor description that mark
    /// a discrete gaming GPU. Vendor-wide markers like `radeon` also match
    /// APU brand strings ("... with Radeon Graphics").
    pub gpu_markers: Vec<String>,
    pub default_user_agent: String,
    pub default_screen_width: u32,
    pub default_screen_height: u32,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            gpu_markers: vec!["nvidia".to_string()],
            default_user_agent: "GeoProp-Client/1.0".to_string(),
            default_screen_width: 1920,
            default_screen_height: 1080,
        }
    }
}

impl TrustConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration file {:?}", path);
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("GEOPROP")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: TrustConfig = builder.build()?.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| TrustError::Config(format!("PORT is not a valid port: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tier_table()?;

        let timeout = self.verification.timeout_secs;
        if timeout == 0 || timeout > MAX_PROBE_TIMEOUT_SECS {
            return Err(TrustError::Config(format!(
                "verification.timeout_secs must be within 1..={} (got {})",
                MAX_PROBE_TIMEOUT_SECS, timeout
            )));
        }
        if self.verification.health_url.trim().is_empty() {
            return Err(TrustError::Config("verification.health_url is empty".to_string()));
        }
        if self.verification.geolocation_url.trim().is_empty() {
            return Err(TrustError::Config(
                "verification.geolocation_url is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the validated tier table from the `tiers` section
    pub fn tier_table(&self) -> Result<TierTable> {
        TierTable::new(self.tiers.clone())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
