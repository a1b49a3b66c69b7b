use log::debug;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::path::Path;
use sysinfo::{CpuRefreshKind, Disks, Networks, RefreshKind, System};

/// Source of host-level signals for fingerprint capture.
///
/// Every accessor is best-effort: `None` (or an empty list) means the
/// signal could not be read on this host.
pub trait HostSignals: Send + Sync {
    fn os_name(&self) -> Option<String>;
    fn os_version(&self) -> Option<String>;
    fn architecture(&self) -> Option<String>;
    fn processor(&self) -> Option<String>;
    fn cpu_count(&self) -> Option<u32>;
    fn memory_total(&self) -> Option<u64>;
    fn disk_total(&self) -> Option<u64>;
    fn ipv4_interfaces(&self) -> Vec<(String, Ipv4Addr)>;
    fn timezone(&self) -> Option<String>;
}

/// Reads host signals through `sysinfo`, `num_cpus` and the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSignals;

impl SysinfoSignals {
    pub fn new() -> Self {
        Self
    }
}

impl HostSignals for SysinfoSignals {
    fn os_name(&self) -> Option<String> {
        System::name()
    }

    fn os_version(&self) -> Option<String> {
        System::os_version()
    }

    fn architecture(&self) -> Option<String> {
        Some(std::env::consts::ARCH.to_string())
    }

    fn processor(&self) -> Option<String> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()),
        );
        sys.cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }

    fn cpu_count(&self) -> Option<u32> {
        u32::try_from(num_cpus::get()).ok()
    }

    fn memory_total(&self) -> Option<u64> {
        let mut sys = System::new();
        sys.refresh_memory();
        Some(sys.total_memory()).filter(|total| *total > 0)
    }

    fn disk_total(&self) -> Option<u64> {
        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"));

        let total = match root {
            Some(disk) => disk.total_space(),
            None => disks.list().iter().map(|disk| disk.total_space()).sum(),
        };
        Some(total).filter(|total| *total > 0)
    }

    fn ipv4_interfaces(&self) -> Vec<(String, Ipv4Addr)> {
        let networks = Networks::new_with_refreshed_list();
        let mut interfaces = Vec::new();
        for (name, data) in &networks {
            for network in data.ip_networks() {
                if let IpAddr::V4(addr) = network.addr {
                    interfaces.push((name.clone(), addr));
                }
            }
        }
        interfaces
    }

    fn timezone(&self) -> Option<String> {
        if let Ok(tz) = std::env::var("TZ") {
            let tz = tz.trim_start_matches(':').trim().to_string();
            if !tz.is_empty() {
                return Some(tz);
            }
        }

        if let Ok(contents) = std::fs::read_to_string("/etc/timezone") {
            let tz = contents.trim().to_string();
            if !tz.is_empty() {
                return Some(tz);
            }
        }

        // /etc/localtime -> /usr/share/zoneinfo/Region/City
        match std::fs::read_link("/etc/localtime") {
            Ok(target) => {
                let target = target.to_string_lossy().into_owned();
                target
                    .split_once("zoneinfo/")
                    .map(|(_, zone)| zone.to_string())
            }
            Err(e) => {
                debug!("Host timezone unavailable: {}", e);
                None
            }
        }
    }
}
