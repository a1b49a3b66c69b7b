//! GeoProp device trust node.
//!
//! Fingerprints the host a bettor plays from, derives a content-addressed
//! device id and trust score, runs independent verification checks, maps
//! the score to a progressive trust tier and authorizes bets against the
//! tier's ceiling.

pub mod api;
pub mod config;
pub mod device;
pub mod error;
pub mod policy;
pub mod service;
pub mod storage;
pub mod verification;

pub use crate::config::TrustConfig;
pub use crate::error::{ProbeError, Result, TrustError};
pub use crate::service::{DeviceRegistration, DeviceTrustService};
