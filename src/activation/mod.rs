//! Staging/production bookkeeping for managed policies.
//!
//! A policy lives independently on the staging and production networks,
//! each with its own server-assigned version. [`PolicyActivator`] decides
//! which writes a desired document needs:
//!
//! - staging is written whenever the desired document is not equivalent to
//!   the last one written there;
//! - production is written only when asked to, whether or not staging
//!   changed in the same call.

mod api;
mod memory;

pub use api::{ApiError, Network, PolicyApi, StoredPolicy};
pub use memory::InMemoryPolicyApi;

use std::sync::Arc;

use pixelpolicy_model::{decode_json, encode_json, equivalent};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("invalid policy document: {0}")]
    Policy(#[from] pixelpolicy_model::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, ActivationError>;

/// What is known about one policy on both networks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyState {
    /// Last document written to (or read from) staging.
    pub staging_json: Option<String>,
    pub staging_version: Option<u64>,
    pub production_version: Option<u64>,
}

/// Applies desired policy documents through an injected [`PolicyApi`].
#[derive(Clone)]
pub struct PolicyActivator {
    api: Arc<dyn PolicyApi>,
}

impl PolicyActivator {
    pub fn new(api: Arc<dyn PolicyApi>) -> Self {
        Self { api }
    }

    /// Bring policy `id` in line with `desired_json`.
    ///
    /// The document is validated and written in canonical form. Returns the
    /// state after all writes.
    pub async fn apply(
        &self,
        id: &str,
        desired_json: &str,
        state: &PolicyState,
        activate_on_production: bool,
    ) -> Result<PolicyState> {
        let policy = decode_json(desired_json)?;
        let canonical = encode_json(&policy)?;
        let mut next = state.clone();

        let staging_changed = match &state.staging_json {
            Some(previous) => !equivalent(desired_json, previous),
            None => true,
        };

        if staging_changed {
            let version = self
                .api
                .upsert_policy(Network::Staging, id, &canonical)
                .await?;
            info!(policy = id, version, "Policy written to staging");
            next.staging_version = Some(version);
            next.staging_json = Some(canonical.clone());
        } else {
            debug!(policy = id, "Staging policy unchanged, skipping write");
        }

        if activate_on_production {
            let version = self
                .api
                .upsert_policy(Network::Production, id, &canonical)
                .await?;
            info!(policy = id, version, "Policy written to production");
            next.production_version = Some(version);
        }

        Ok(next)
    }

    /// Read the current state of policy `id` from both networks.
    ///
    /// A network without the policy leaves its fields empty.
    pub async fn refresh(&self, id: &str) -> Result<PolicyState> {
        let mut state = PolicyState::default();

        match self.api.get_policy(Network::Staging, id).await {
            Ok(stored) => {
                state.staging_json = Some(stored.json);
                state.staging_version = Some(stored.version);
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        match self.api.get_policy(Network::Production, id).await {
            Ok(stored) => state.production_version = Some(stored.version),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        Ok(state)
    }

    /// Remove policy `id` from both networks.
    ///
    /// Staging must exist. Production may never have been written, so a
    /// missing production policy counts as deleted.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete_policy(Network::Staging, id).await?;
        info!(policy = id, "Policy deleted from staging");

        match self.api.delete_policy(Network::Production, id).await {
            Ok(()) => {
                info!(policy = id, "Policy deleted from production");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                debug!(policy = id, "Policy was never on production");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
