//! # End-to-End Policy Document Tests
//!
//! Builds complete documents through `generate_policy` with a frozen clock
//! and compares them against the exact JSON the ISM engine is given.

use ism_core::FixedClock;
use ism_policy::{generate_policy, to_json, PolicyOverrides, PolicySettings};
use serde_json::{json, Value};

const STAMP: i64 = 1_768_478_400_000;

fn generate(settings: &PolicySettings) -> Value {
    let envelope = generate_policy(settings, &FixedClock::at(STAMP)).expect("policy should build");
    serde_json::from_str(&to_json(&envelope).unwrap()).unwrap()
}

fn with_ages(snapshot: &str, cold: &str, close: &str, delete: &str) -> PolicySettings {
    PolicySettings {
        snapshot_age: snapshot.into(),
        cold_age: cold.into(),
        close_age: close.into(),
        delete_age: delete.into(),
        ..PolicySettings::default()
    }
}

fn state_names(doc: &Value) -> Vec<&str> {
    doc["policy"]["states"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect()
}

#[test]
fn default_document_matches_expected_json() {
    let expected = json!({
        "policy": {
            "policy_id": "session_index_policy",
            "description": "Index state management policy to snapshot indices after 1d, move them into a cold state after 30d and delete them after 365d",
            "last_updated_time": STAMP,
            "schema_version": 1,
            "error_notification": null,
            "default_state": "hot",
            "states": [
                {
                    "name": "hot",
                    "actions": [{"replica_count": {"number_of_replicas": 0}}],
                    "transitions": [{"state_name": "snapshot", "conditions": {"min_index_age": "1d"}}]
                },
                {
                    "name": "snapshot",
                    "actions": [{"snapshot": {"repository": "logs", "snapshot": "session_snapshot"}}],
                    "transitions": [{"state_name": "cold", "conditions": {"min_index_age": "30d"}}]
                },
                {
                    "name": "cold",
                    "actions": [{"read_only": {}}],
                    "transitions": [{"state_name": "closed", "conditions": {"min_index_age": "60d"}}]
                },
                {
                    "name": "closed",
                    "actions": [{"close": {}}],
                    "transitions": [{"state_name": "delete", "conditions": {"min_index_age": "365d"}}]
                },
                {
                    "name": "delete",
                    "actions": [{"delete": {}}],
                    "transitions": []
                }
            ],
            "ism_template": {
                "index_patterns": ["arkime_sessions3-*"],
                "priority": 100
            }
        }
    });

    assert_eq!(generate(&PolicySettings::default()), expected);
}

#[test]
fn all_stages_disabled_leaves_hot_only() {
    let doc = generate(&with_ages("0", "0", "0", "0"));
    assert_eq!(state_names(&doc), ["hot"]);
    assert_eq!(doc["policy"]["states"][0]["transitions"], json!([]));
    assert_eq!(doc["policy"]["default_state"], "hot");
}

#[test]
fn disabled_cold_stage_links_snapshot_to_closed() {
    let doc = generate(&with_ages("1d", "0", "60d", "365d"));
    assert_eq!(state_names(&doc), ["hot", "snapshot", "closed", "delete"]);
    assert_eq!(
        doc["policy"]["states"][1]["transitions"],
        json!([{"state_name": "closed", "conditions": {"min_index_age": "60d"}}])
    );
}

#[test]
fn only_delete_enabled() {
    let doc = generate(&with_ages("0", "0", "0", "90d"));
    assert_eq!(state_names(&doc), ["hot", "delete"]);
    assert_eq!(
        doc["policy"]["states"][0]["transitions"],
        json!([{"state_name": "delete", "conditions": {"min_index_age": "90d"}}])
    );
}

#[test]
fn last_state_never_transitions() {
    for (snapshot, cold, close, delete) in [
        ("1d", "30d", "60d", "0"),
        ("1d", "0", "0", "0"),
        ("0", "12h", "0", "0"),
        ("0", "0", "45m", "0"),
    ] {
        let doc = generate(&with_ages(snapshot, cold, close, delete));
        let states = doc["policy"]["states"].as_array().unwrap();
        assert_eq!(states.last().unwrap()["transitions"], json!([]));
    }
}

#[test]
fn index_patterns_trimmed_in_order() {
    let settings = PolicySettings {
        index_pattern: "a, b ,c".into(),
        ..PolicySettings::default()
    };
    let doc = generate(&settings);
    assert_eq!(doc["policy"]["ism_template"]["index_patterns"], json!(["a", "b", "c"]));
}

#[test]
fn identical_inputs_identical_bytes() {
    let settings = with_ages("2h", "0", "7d", "30d");
    let clock = FixedClock::at(STAMP);
    let a = to_json(&generate_policy(&settings, &clock).unwrap()).unwrap();
    let b = to_json(&generate_policy(&settings, &clock).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn config_file_layer_feeds_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");
    std::fs::write(
        &path,
        "policy_id: zeek_policy\nindex_pattern: \"zeek-*, arkime_sessions3-*\"\npriority: 50\nreplicas: 1\ncold_age: 0\n",
    )
    .unwrap();

    let flags = PolicyOverrides {
        priority: Some(75),
        ..Default::default()
    };
    let settings = PolicyOverrides::load(&path).unwrap().merge(flags).resolve();
    let doc = generate(&settings);

    assert_eq!(doc["policy"]["policy_id"], "zeek_policy");
    assert_eq!(doc["policy"]["ism_template"]["priority"], 75);
    assert_eq!(
        doc["policy"]["ism_template"]["index_patterns"],
        json!(["zeek-*", "arkime_sessions3-*"])
    );
    assert_eq!(
        doc["policy"]["states"][0]["actions"],
        json!([{"replica_count": {"number_of_replicas": 1}}])
    );
    assert_eq!(state_names(&doc), ["hot", "snapshot", "closed", "delete"]);
}

#[test]
fn invalid_age_produces_no_document() {
    let err = generate_policy(&with_ages("1d", "30", "60d", "365d"), &FixedClock::at(STAMP))
        .unwrap_err();
    assert!(err.is_invalid_age());
}
