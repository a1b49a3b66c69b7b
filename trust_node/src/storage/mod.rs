use crate::error::Result;
use crate::policy::TrustTier;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod memory;

pub use memory::MemoryIdentityStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityStoreStats {
    pub num_entries: u64,
    pub read_operations: u64,
    pub write_operations: u64,
}

// Persistence seam for device id -> resolved tier
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn get_identity(&self, device_id: &str) -> Result<Option<TrustTier>>;
    async fn put_identity(&self, device_id: &str, tier: TrustTier) -> Result<()>;
    async fn get_stats(&self) -> Result<IdentityStoreStats>;

    /// Tier lookup used by bet authorization (alias for `get_identity`)
    async fn lookup(&self, device_id: &str) -> Result<Option<TrustTier>> {
        self.get_identity(device_id).await
    }
}
