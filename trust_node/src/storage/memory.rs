use super::{IdentityStore, IdentityStoreStats};
use crate::error::Result;
use crate::policy::TrustTier;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory identity store, safe for concurrent registrations
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    identities: DashMap<String, TrustTier>,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn get_identity(&self, device_id: &str) -> Result<Option<TrustTier>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.identities.get(device_id).map(|entry| entry.value().clone()))
    }

    async fn put_identity(&self, device_id: &str, tier: TrustTier) -> Result<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.identities.insert(device_id.to_string(), tier);
        Ok(())
    }

    async fn get_stats(&self) -> Result<IdentityStoreStats> {
        Ok(IdentityStoreStats {
            num_entries: self.identities.len() as u64,
            read_operations: self.reads.load(Ordering::Relaxed),
            write_operations: self.writes.load(Ordering::Relaxed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{TierTable, TrustLevel};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_then_lookup() {
        let store = MemoryIdentityStore::new();
        let tier = TierTable::default().tier(TrustLevel::Trusted).clone();

        assert!(store.lookup("abc").await.unwrap().is_none());
        store.put_identity("abc", tier.clone()).await.unwrap();
        assert_eq!(store.lookup("abc").await.unwrap(), Some(tier));

        let stats = store.get_stats().await.unwrap();
        assert_eq!(stats.num_entries, 1);
        assert_eq!(stats.write_operations, 1);
        assert_eq!(stats.read_operations, 2);
    }

    #[tokio::test]
    async fn test_upsert_replaces_tier() {
        let store = MemoryIdentityStore::new();
        let table = TierTable::default();
        store.put_identity("dev", table.tier(TrustLevel::Basic).clone()).await.unwrap();
        store.put_identity("dev", table.tier(TrustLevel::Premium).clone()).await.unwrap();

        let tier = store.get_identity("dev").await.unwrap().unwrap();
        assert_eq!(tier.level, TrustLevel::Premium);
        assert_eq!(store.get_stats().await.unwrap().num_entries, 1);
    }

    #[tokio::test]
    async fn test_concurrent_registrations() {
        let store = Arc::new(MemoryIdentityStore::new());
        let tier = TierTable::default().tier(TrustLevel::Verified).clone();

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            let tier = tier.clone();
            handles.push(tokio::spawn(async move {
                store.put_identity(&format!("device-{}", i), tier).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.get_stats().await.unwrap().num_entries, 32);
    }
}
