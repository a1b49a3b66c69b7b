use super::{CheckOutcome, HttpProbe, ProcessLister, VerificationCheckSet};
use crate::config::VerificationConfig;
use crate::device::DeviceFingerprint;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

/// Gaming-hardware check: minimum logical CPUs
pub const GAMING_MIN_CPUS: u32 = 4;
/// Gaming-hardware check: memory must exceed this many bytes
pub const GAMING_MIN_MEMORY_BYTES: u64 = 8_000_000_000;

/// Status value the geolocation service reports for a resolved address
const GEOLOCATION_SUCCESS: &str = "success";

/// Runs the verification checks against injected collaborators
pub struct VerificationRunner {
    http: Arc<dyn HttpProbe>,
    processes: Arc<dyn ProcessLister>,
    config: VerificationConfig,
}

impl VerificationRunner {
    pub fn new(
        http: Arc<dyn HttpProbe>,
        processes: Arc<dyn ProcessLister>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            http,
            processes,
            config,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Run all checks. The two network probes and the process scan run
    /// concurrently; the result always carries every check.
    pub async fn run_checks(&self, fp: &DeviceFingerprint) -> VerificationCheckSet {
        let timeout = self.config.probe_timeout();

        let (network_stability, geolocation, process_integrity) = tokio::join!(
            self.check_network_stability(timeout),
            self.check_geolocation(timeout),
            self.check_process_integrity(),
        );
        let gaming_hardware = CheckOutcome::from_bool(detect_gaming_hardware(fp));

        VerificationCheckSet::new(
            network_stability,
            gaming_hardware,
            geolocation,
            process_integrity,
        )
    }

    async fn check_network_stability(&self, timeout: Duration) -> CheckOutcome {
        let url = &self.config.health_url;
        match tokio::time::timeout(timeout, self.http.get(url, timeout)).await {
            Ok(Ok(response)) => {
                if response.status != 200 {
                    debug!("Health probe {} answered {}", url, response.status);
                }
                CheckOutcome::from_bool(response.status == 200)
            }
            Ok(Err(e)) => {
                debug!("Health probe {} failed: {}", url, e);
                CheckOutcome::Failed
            }
            Err(_) => {
                debug!("Health probe {} timed out after {:?}", url, timeout);
                CheckOutcome::Failed
            }
        }
    }

    async fn check_geolocation(&self, timeout: Duration) -> CheckOutcome {
        let url = &self.config.geolocation_url;
        match tokio::time::timeout(timeout, self.http.get(url, timeout)).await {
            Ok(Ok(response)) => {
                let status = response
                    .json()
                    .and_then(|body| body.get("status").and_then(|s| s.as_str()).map(str::to_string));
                if status.as_deref() != Some(GEOLOCATION_SUCCESS) {
                    debug!("Geolocation lookup reported status {:?}", status);
                }
                CheckOutcome::from_bool(status.as_deref() == Some(GEOLOCATION_SUCCESS))
            }
            Ok(Err(e)) => {
                debug!("Geolocation lookup failed: {}", e);
                CheckOutcome::Failed
            }
            Err(_) => {
                debug!("Geolocation lookup timed out after {:?}", timeout);
                CheckOutcome::Failed
            }
        }
    }

    async fn check_process_integrity(&self) -> CheckOutcome {
        let lister = Arc::clone(&self.processes);
        let names = match tokio::task::spawn_blocking(move || lister.process_names()).await {
            Ok(Ok(names)) => names,
            Ok(Err(e)) => {
                warn!("Process integrity unknown, lister unavailable: {}", e);
                return CheckOutcome::Unknown;
            }
            Err(e) => {
                warn!("Process integrity unknown, scan task failed: {}", e);
                return CheckOutcome::Unknown;
            }
        };

        match find_suspicious_process(&names, &self.config.suspicious_processes) {
            Some(name) => {
                warn!("Suspicious process detected: {}", name);
                CheckOutcome::Failed
            }
            None => CheckOutcome::Passed,
        }
    }
}

/// CPU and memory plausibility for a gaming device. Pure.
pub fn detect_gaming_hardware(fp: &DeviceFingerprint) -> bool {
    fp.cpu_count >= GAMING_MIN_CPUS && fp.memory_total > GAMING_MIN_MEMORY_BYTES
}

/// First running process whose lowercase name contains a denylisted substring
pub fn find_suspicious_process<'a>(names: &'a [String], denylist: &[String]) -> Option<&'a str> {
    names
        .iter()
        .find(|name| {
            let name = name.to_lowercase();
            denylist
                .iter()
                .any(|needle| !needle.is_empty() && name.contains(&needle.to_lowercase()))
        })
        .map(|name| name.as_str())
}
