use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::net::Ipv4Addr;

/// A network interface carrying an IPv4 address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub interface: String,
    pub ip: Ipv4Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenResolution {
    pub width: u32,
    pub height: u32,
}

/// Software-detectable description of a host.
///
/// Unavailable signals are stored as empty strings, zero or an empty
/// interface set; a fingerprint is never partially constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFingerprint {
    pub os: String,
    pub os_version: String,
    pub architecture: String,
    pub processor: String,
    pub cpu_count: u32,
    /// Total physical memory in bytes
    pub memory_total: u64,
    /// Total disk capacity in bytes
    pub disk_total: u64,
    pub network_interfaces: BTreeSet<NetworkInterface>,
    pub user_agent: String,
    pub screen_resolution: ScreenResolution,
    pub timezone: String,
}

impl DeviceFingerprint {
    /// Number of distinct interface names that carry at least one address
    pub fn distinct_interface_count(&self) -> usize {
        self.network_interfaces
            .iter()
            .map(|iface| iface.interface.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Canonical JSON encoding: object keys sorted at every level, the
    /// interface set in its natural order, no insignificant whitespace.
    ///
    /// Keys are sorted explicitly: any crate in the build graph may turn on
    /// `serde_json/preserve_order`, which makes `Map` keep field order and
    /// would silently change every digest.
    pub fn canonical_json(&self) -> String {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        sort_keys(value).to_string()
    }

    /// Hex SHA-256 of the canonical encoding
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.canonical_json().as_bytes()))
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Client-reported attributes that the host cannot observe itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientHints {
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub screen_width: Option<u32>,
    #[serde(default)]
    pub screen_height: Option<u32>,
    #[serde(default)]
    pub timezone: Option<String>,
}
