//! The remote policy API seen by the activator.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Where a policy version is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Staging,
    Production,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Staging => "staging",
            Network::Production => "production",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Errors and payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("policy {id} not found on {network}")]
    NotFound { network: Network, id: String },

    #[error("policy rejected by the API: {0}")]
    Rejected(String),

    #[error("API request failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn not_found(network: Network, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            network,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// A policy document as stored on one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPolicy {
    /// Canonical JSON document.
    pub json: String,
    /// Server-assigned version, incremented on every write.
    pub version: u64,
}

// ---------------------------------------------------------------------------
// PolicyApi
// ---------------------------------------------------------------------------

/// Access to the remote policy store.
///
/// Implementations own transport and authentication; the activator only
/// decides which calls to make.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// Fetch the current document for `id` on `network`.
    async fn get_policy(&self, network: Network, id: &str) -> Result<StoredPolicy, ApiError>;

    /// Create or replace the document, returning the new version.
    async fn upsert_policy(&self, network: Network, id: &str, json: &str) -> Result<u64, ApiError>;

    /// Remove the document. Fails with [`ApiError::NotFound`] if absent.
    async fn delete_policy(&self, network: Network, id: &str) -> Result<(), ApiError>;
}
