//! Independent device verification checks.
//!
//! Five checks run on every registration. Each one resolves locally to an
//! outcome; a failing data source never aborts a sibling check.

pub mod probes;
pub mod process;
pub mod runner;

pub use probes::{HttpProbe, ProbeResponse, ReqwestProbe};
pub use process::{ProcessLister, SysinfoProcessLister};
pub use runner::VerificationRunner;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    DeviceFingerprint,
    NetworkStability,
    GamingHardware,
    Geolocation,
    ProcessIntegrity,
}

impl CheckName {
    pub const ALL: [CheckName; 5] = [
        CheckName::DeviceFingerprint,
        CheckName::NetworkStability,
        CheckName::GamingHardware,
        CheckName::Geolocation,
        CheckName::ProcessIntegrity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckName::DeviceFingerprint => "device_fingerprint",
            CheckName::NetworkStability => "network_stability",
            CheckName::GamingHardware => "gaming_hardware",
            CheckName::Geolocation => "geolocation",
            CheckName::ProcessIntegrity => "process_integrity",
        }
    }
}

/// Result of a single check. `Unknown` means the data source needed to
/// evaluate the check was unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed,
    Unknown,
}

impl CheckOutcome {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed
        }
    }

    /// Collapse to a boolean under `policy`
    pub fn resolve(self, policy: UnknownCheckPolicy) -> bool {
        match self {
            CheckOutcome::Passed => true,
            CheckOutcome::Failed => false,
            CheckOutcome::Unknown => policy == UnknownCheckPolicy::FailOpen,
        }
    }
}

/// How an `Unknown` outcome is reported when results are collapsed to
/// booleans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCheckPolicy {
    #[default]
    FailOpen,
    FailClosed,
}

/// Outcomes of one verification run, always keyed by all five checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationCheckSet {
    outcomes: BTreeMap<CheckName, CheckOutcome>,
}

impl VerificationCheckSet {
    pub(crate) fn new(
        network_stability: CheckOutcome,
        gaming_hardware: CheckOutcome,
        geolocation: CheckOutcome,
        process_integrity: CheckOutcome,
    ) -> Self {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(CheckName::DeviceFingerprint, CheckOutcome::Passed);
        outcomes.insert(CheckName::NetworkStability, network_stability);
        outcomes.insert(CheckName::GamingHardware, gaming_hardware);
        outcomes.insert(CheckName::Geolocation, geolocation);
        outcomes.insert(CheckName::ProcessIntegrity, process_integrity);
        Self { outcomes }
    }

    pub fn get(&self, name: CheckName) -> CheckOutcome {
        self.outcomes
            .get(&name)
            .copied()
            .unwrap_or(CheckOutcome::Unknown)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckName, CheckOutcome)> + '_ {
        self.outcomes.iter().map(|(name, outcome)| (*name, *outcome))
    }

    pub fn unknown_checks(&self) -> Vec<CheckName> {
        self.iter()
            .filter(|(_, outcome)| *outcome == CheckOutcome::Unknown)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn passed_count(&self) -> usize {
        self.iter()
            .filter(|(_, outcome)| *outcome == CheckOutcome::Passed)
            .count()
    }

    /// Wire form: check name to pass/fail
    pub fn as_bools(&self, policy: UnknownCheckPolicy) -> BTreeMap<String, bool> {
        self.iter()
            .map(|(name, outcome)| (name.as_str().to_string(), outcome.resolve(policy)))
            .collect()
    }
}
