#![allow(dead_code)]

use async_trait::async_trait;
use geoprop_trust_node::config::{FingerprintConfig, VerificationConfig};
use geoprop_trust_node::device::{Fingerprinter, HostSignals};
use geoprop_trust_node::policy::TierTable;
use geoprop_trust_node::storage::MemoryIdentityStore;
use geoprop_trust_node::verification::{
    HttpProbe, ProbeResponse, ProcessLister, UnknownCheckPolicy, VerificationRunner,
};
use geoprop_trust_node::{DeviceTrustService, ProbeError};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

/// Host with fixed hardware signals
pub struct FakeHost {
    pub processor: &'static str,
    pub cpu_count: u32,
    pub memory_total: u64,
    pub interfaces: Vec<(&'static str, [u8; 4])>,
}

impl FakeHost {
    /// 8 CPUs, 17 GB, NVIDIA GPU, two interfaces: scores 90
    pub fn gaming_rig() -> Self {
        Self {
            processor: "AMD Ryzen 9 7950X + NVIDIA GeForce RTX 4080",
            cpu_count: 8,
            memory_total: 17_000_000_000,
            interfaces: vec![("eth0", [192, 168, 1, 20]), ("wlan0", [192, 168, 1, 21])],
        }
    }

    /// 4 CPUs, 8 GB, integrated graphics, one interface: scores 50
    pub fn office_laptop() -> Self {
        Self {
            processor: "Intel Core i5-8250U",
            cpu_count: 4,
            memory_total: 8_000_000_000,
            interfaces: vec![("wlan0", [10, 0, 0, 5])],
        }
    }

    /// 16 CPUs, 32 GB, no GPU marker, two interfaces: scores 75
    pub fn workstation() -> Self {
        Self {
            processor: "Intel Xeon W-2295",
            cpu_count: 16,
            memory_total: 32_000_000_000,
            interfaces: vec![("eno1", [10, 1, 0, 2]), ("eno2", [10, 1, 0, 3])],
        }
    }
}

impl HostSignals for FakeHost {
    fn os_name(&self) -> Option<String> {
        Some("Linux".to_string())
    }
    fn os_version(&self) -> Option<String> {
        Some("6.5".to_string())
    }
    fn architecture(&self) -> Option<String> {
        Some("x86_64".to_string())
    }
    fn processor(&self) -> Option<String> {
        Some(self.processor.to_string())
    }
    fn cpu_count(&self) -> Option<u32> {
        Some(self.cpu_count)
    }
    fn memory_total(&self) -> Option<u64> {
        Some(self.memory_total)
    }
    fn disk_total(&self) -> Option<u64> {
        Some(1_000_000_000_000)
    }
    fn ipv4_interfaces(&self) -> Vec<(String, Ipv4Addr)> {
        self.interfaces
            .iter()
            .map(|(name, ip)| (name.to_string(), Ipv4Addr::from(*ip)))
            .collect()
    }
    fn timezone(&self) -> Option<String> {
        Some("UTC".to_string())
    }
}

/// HTTP probe that either answers like healthy upstreams or refuses
pub struct FakeHttp {
    pub reachable: bool,
}

#[async_trait]
impl HttpProbe for FakeHttp {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        if !self.reachable {
            return Err(ProbeError::Http(format!("connection refused: {}", url)));
        }
        let body = if url.contains("ip-api") {
            br#"{"status":"success","country":"Germany"}"#.to_vec()
        } else {
            br#"{"status":"ok"}"#.to_vec()
        };
        Ok(ProbeResponse { status: 200, body })
    }
}

/// Process lister; `None` simulates an unreadable process table
pub struct FakeProcesses(pub Option<Vec<&'static str>>);

impl ProcessLister for FakeProcesses {
    fn process_names(&self) -> Result<Vec<String>, ProbeError> {
        match &self.0 {
            Some(names) => Ok(names.iter().map(|n| n.to_lowercase()).collect()),
            None => Err(ProbeError::Unavailable("access denied".to_string())),
        }
    }
}

pub struct Harness {
    pub service: Arc<DeviceTrustService>,
    pub store: Arc<MemoryIdentityStore>,
}

pub fn harness(
    host: FakeHost,
    http: FakeHttp,
    processes: FakeProcesses,
    policy: UnknownCheckPolicy,
) -> Harness {
    let verification = VerificationConfig {
        unknown_policy: policy,
        ..VerificationConfig::default()
    };
    let store = Arc::new(MemoryIdentityStore::new());
    let service = DeviceTrustService::new(
        Fingerprinter::new(Arc::new(host), &FingerprintConfig::default()),
        VerificationRunner::new(Arc::new(http), Arc::new(processes), verification),
        TierTable::default(),
        store.clone(),
    );
    Harness {
        service: Arc::new(service),
        store,
    }
}

pub fn healthy(host: FakeHost) -> Harness {
    harness(
        host,
        FakeHttp { reachable: true },
        FakeProcesses(Some(vec!["systemd", "steam", "discord"])),
        UnknownCheckPolicy::FailOpen,
    )
}
