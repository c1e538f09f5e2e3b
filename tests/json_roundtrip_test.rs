//! Integration tests for the canonical JSON document codec.

mod common;

use assert_matches::assert_matches;
use common::{compound_chain, rich_policy};
use pixelpolicy::model::{
    decode_json, encode_json, encode_json_pretty, policy_to_value, Error, Policy, Transformation,
};
use serde_json::json;

#[test]
fn rich_policy_round_trips() {
    let policy = rich_policy();
    assert_eq!(decode_json(&encode_json(&policy).unwrap()).unwrap(), policy);
    assert_eq!(decode_json(&encode_json_pretty(&policy).unwrap()).unwrap(), policy);
}

#[test]
fn json_has_no_depth_limit() {
    let policy = Policy::with_transformations(vec![compound_chain(
        20,
        Some(Transformation::max_colors(2)),
    )]);
    assert_eq!(decode_json(&encode_json(&policy).unwrap()).unwrap(), policy);
}

#[test]
fn serde_impls_match_codec() {
    let policy = rich_policy();
    assert_eq!(serde_json::to_value(&policy).unwrap(), policy_to_value(&policy).unwrap());
    let back: Policy = serde_json::from_value(policy_to_value(&policy).unwrap()).unwrap();
    assert_eq!(back, policy);
}

#[test]
fn document_shape() {
    let value = policy_to_value(&rich_policy()).unwrap();

    assert_eq!(value["breakpoints"], json!({"widths": [320, 640, 1280]}));
    assert_eq!(value["rolloutDuration"], json!(3600));
    assert!(value.get("serveStaleDuration").is_none());

    let crop = &value["transformations"][0];
    assert_eq!(crop["transformation"], json!("Crop"));
    assert_eq!(crop["gravity"], json!({"name": "g", "value": "Center"}));
    assert_eq!(crop["height"], json!({"name": "h"}));
    assert_eq!(crop["allowExpansion"], json!({"value": true}));

    let text = &value["transformations"][1]["image"];
    assert_eq!(text["type"], json!("Text"));
    assert_eq!(text["transformation"]["transformation"], json!("Blur"));

    let post = &value["postBreakpointTransformations"];
    assert_eq!(post[1]["image"]["type"], json!("Box"));
    assert_eq!(post[1]["image"]["transformation"]["transformation"], json!("Opacity"));

    assert_eq!(value["variables"][1]["enumOptions"][1], json!({"id": "n", "value": "North"}));
}

#[test]
fn restricted_family_rejects_geometry_operators() {
    let doc = r#"{"postBreakpointTransformations":[{"transformation":"Crop"}]}"#;
    assert_matches!(
        decode_json(doc),
        Err(Error::UnsupportedVariant { kind: "post-breakpoint transformation", .. })
    );
}

#[test]
fn wrong_container_types_are_malformed() {
    assert_matches!(
        decode_json(r#"{"transformations":{"transformation":"Blur"}}"#),
        Err(Error::MalformedDocument(msg)) if msg.contains("/transformations")
    );
    assert_matches!(
        decode_json(r#"{"hosts":[1]}"#),
        Err(Error::MalformedScalar { ref path, .. }) if path == "/hosts/0"
    );
}
