use rust_decimal::Decimal;
use std::time::Duration;

/// Errors surfaced by the trust core and its orchestration layer
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("Invalid bet amount: {0} (must be greater than zero)")]
    InvalidBetAmount(Decimal),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Identity store error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TrustError>;

/// Failures of the injected collaborators (HTTP probe, process lister).
///
/// These never leave the verification runner: each one is folded into the
/// outcome of the check that hit it.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Probe source unavailable: {0}")]
    Unavailable(String),
}

impl From<::config::ConfigError> for TrustError {
    fn from(err: ::config::ConfigError) -> Self {
        TrustError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for TrustError {
    fn from(err: tokio::task::JoinError) -> Self {
        TrustError::Internal(anyhow::anyhow!("blocking task failed: {}", err))
    }
}
