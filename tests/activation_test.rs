//! Integration tests for staging/production activation.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use common::rich_policy;
use pixelpolicy::activation::{
    ActivationError, ApiError, InMemoryPolicyApi, Network, PolicyActivator, PolicyApi,
    PolicyState, StoredPolicy,
};
use pixelpolicy::model::{encode_json, encode_json_pretty, equivalent};

fn setup() -> (Arc<InMemoryPolicyApi>, PolicyActivator) {
    let api = Arc::new(InMemoryPolicyApi::new());
    let activator = PolicyActivator::new(api.clone());
    (api, activator)
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unchanged_policy_skips_staging() {
    let (api, activator) = setup();
    let doc = encode_json(&rich_policy()).unwrap();

    let state = activator
        .apply("p", &doc, &PolicyState::default(), false)
        .await
        .unwrap();

    // Same policy, different formatting.
    let pretty = encode_json_pretty(&rich_policy()).unwrap();
    let again = activator.apply("p", &pretty, &state, false).await.unwrap();

    assert_eq!(again, state);
    assert_eq!(api.upsert_count(Network::Staging), 1);
}

#[tokio::test]
async fn changed_policy_bumps_staging_version() {
    let (api, activator) = setup();
    let state = activator
        .apply("p", r#"{"hosts":["a.example"]}"#, &PolicyState::default(), false)
        .await
        .unwrap();
    let state = activator
        .apply("p", r#"{"hosts":["b.example"]}"#, &state, false)
        .await
        .unwrap();

    assert_eq!(state.staging_version, Some(2));
    let stored = api.stored(Network::Staging, "p").unwrap();
    assert!(equivalent(&stored.json, r#"{"hosts":["b.example"]}"#));
}

#[tokio::test]
async fn production_follows_flag_even_without_staging_change() {
    let (api, activator) = setup();
    let doc = r#"{"hosts":["a.example"]}"#;

    let state = activator
        .apply("p", doc, &PolicyState::default(), false)
        .await
        .unwrap();
    assert_eq!(state.production_version, None);

    let state = activator.apply("p", doc, &state, true).await.unwrap();
    assert_eq!(state.staging_version, Some(1));
    assert_eq!(state.production_version, Some(1));
    assert_eq!(api.upsert_count(Network::Staging), 1);
    assert_eq!(api.upsert_count(Network::Production), 1);
}

#[tokio::test]
async fn malformed_document_writes_nothing() {
    let (api, activator) = setup();
    let result = activator
        .apply("p", "{not json", &PolicyState::default(), true)
        .await;
    assert_matches!(result, Err(ActivationError::Policy(_)));
    assert_eq!(api.upsert_count(Network::Staging), 0);
    assert_eq!(api.upsert_count(Network::Production), 0);
}

#[tokio::test]
async fn unreadable_previous_state_counts_as_changed() {
    let (api, activator) = setup();
    let stale = PolicyState {
        staging_json: Some("garbage".into()),
        staging_version: Some(4),
        production_version: None,
    };
    let state = activator
        .apply("p", r#"{"hosts":["a.example"]}"#, &stale, false)
        .await
        .unwrap();
    assert_eq!(api.upsert_count(Network::Staging), 1);
    assert_eq!(state.staging_version, Some(1));
}

#[tokio::test]
async fn refresh_reads_both_networks() {
    let (_api, activator) = setup();
    let state = activator
        .apply("p", r#"{"hosts":["a.example"]}"#, &PolicyState::default(), true)
        .await
        .unwrap();

    let refreshed = activator.refresh("p").await.unwrap();
    assert_eq!(refreshed, state);

    let missing = activator.refresh("other").await.unwrap();
    assert_eq!(missing, PolicyState::default());
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_tolerates_missing_production() {
    let (api, activator) = setup();
    activator
        .apply("p", r#"{"hosts":["a.example"]}"#, &PolicyState::default(), false)
        .await
        .unwrap();

    activator.delete("p").await.unwrap();
    assert!(api.stored(Network::Staging, "p").is_none());
}

#[tokio::test]
async fn delete_requires_staging() {
    let (_api, activator) = setup();
    assert_matches!(
        activator.delete("p").await,
        Err(ActivationError::Api(ApiError::NotFound {
            network: Network::Staging,
            ..
        }))
    );
}

/// Production deletes fail with something other than "not found".
struct FailingProduction(InMemoryPolicyApi);

#[async_trait]
impl PolicyApi for FailingProduction {
    async fn get_policy(&self, network: Network, id: &str) -> Result<StoredPolicy, ApiError> {
        self.0.get_policy(network, id).await
    }

    async fn upsert_policy(&self, network: Network, id: &str, json: &str) -> Result<u64, ApiError> {
        self.0.upsert_policy(network, id, json).await
    }

    async fn delete_policy(&self, network: Network, id: &str) -> Result<(), ApiError> {
        match network {
            Network::Staging => self.0.delete_policy(network, id).await,
            Network::Production => Err(ApiError::Transport("connection reset".into())),
        }
    }
}

#[tokio::test]
async fn delete_propagates_other_production_errors() {
    let api = Arc::new(FailingProduction(InMemoryPolicyApi::new()));
    let activator = PolicyActivator::new(api.clone());
    activator
        .apply("p", "{}", &PolicyState::default(), true)
        .await
        .unwrap();

    assert_matches!(
        activator.delete("p").await,
        Err(ActivationError::Api(ApiError::Transport(_)))
    );
    assert!(api.0.stored(Network::Staging, "p").is_none());
}
