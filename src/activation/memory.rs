//! In-process [`PolicyApi`] implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::api::{ApiError, Network, PolicyApi, StoredPolicy};

#[derive(Debug, Default)]
struct Inner {
    policies: HashMap<(Network, String), StoredPolicy>,
    /// Last version handed out per key; survives deletes.
    versions: HashMap<(Network, String), u64>,
    upserts: Vec<(Network, String)>,
}

/// A policy store kept in memory.
///
/// Versions start at 1 and increase per (network, id) on every upsert.
#[derive(Debug, Default)]
pub struct InMemoryPolicyApi {
    inner: Mutex<Inner>,
}

impl InMemoryPolicyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upserts made to `network` so far.
    pub fn upsert_count(&self, network: Network) -> usize {
        self.inner
            .lock()
            .upserts
            .iter()
            .filter(|(n, _)| *n == network)
            .count()
    }

    /// The stored document, if any.
    pub fn stored(&self, network: Network, id: &str) -> Option<StoredPolicy> {
        self.inner
            .lock()
            .policies
            .get(&(network, id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl PolicyApi for InMemoryPolicyApi {
    async fn get_policy(&self, network: Network, id: &str) -> Result<StoredPolicy, ApiError> {
        self.stored(network, id)
            .ok_or_else(|| ApiError::not_found(network, id))
    }

    async fn upsert_policy(&self, network: Network, id: &str, json: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock();
        let key = (network, id.to_string());
        let version = inner.versions.get(&key).copied().unwrap_or(0) + 1;
        inner.versions.insert(key.clone(), version);
        inner.policies.insert(
            key.clone(),
            StoredPolicy {
                json: json.to_string(),
                version,
            },
        );
        inner.upserts.push(key);
        Ok(version)
    }

    async fn delete_policy(&self, network: Network, id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        match inner.policies.remove(&(network, id.to_string())) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(network, id)),
        }
    }
}
