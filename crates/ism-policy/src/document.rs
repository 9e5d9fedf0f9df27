//! # Policy Document Assembler
//!
//! Wraps a [`LifecycleChain`] with identity, versioning and index-template
//! metadata to form the document handed to the ISM engine:
//!
//! ```json
//! {"policy": {
//!   "policy_id": "session_index_policy",
//!   "description": "...",
//!   "last_updated_time": 1768478400000,
//!   "schema_version": 1,
//!   "error_notification": null,
//!   "default_state": "hot",
//!   "states": [ ... ],
//!   "ism_template": {"index_patterns": ["arkime_sessions3-*"], "priority": 100}
//! }}
//! ```
//!
//! Field order follows the struct declaration order, which is the order the
//! engine's own export uses.

use serde::Serialize;

use ism_core::{Clock, EpochMillis};
use ism_state::{LifecycleChain, StageAges, StateName};

use crate::error::PolicyError;

/// Identity and template inputs for [`assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyMetadata {
    pub policy_id: String,
    pub description: String,
    pub schema_version: i64,
    /// Comma-separated index patterns, split by [`split_index_patterns`].
    pub index_patterns: String,
    pub priority: i64,
}

/// Index patterns the policy is attached to, and the match priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsmTemplate {
    pub index_patterns: Vec<String>,
    pub priority: i64,
}

/// The body of the `"policy"` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDocument {
    pub policy_id: String,
    pub description: String,
    pub last_updated_time: EpochMillis,
    pub schema_version: i64,
    /// Always `null`; error notification channels are configured in the engine.
    pub error_notification: Option<serde_json::Value>,
    pub default_state: StateName,
    pub states: LifecycleChain,
    pub ism_template: IsmTemplate,
}

/// `{"policy": PolicyDocument}`, the serialized artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyEnvelope {
    pub policy: PolicyDocument,
}

/// Split a comma-separated pattern list, trimming each element.
///
/// Order and duplicates are preserved; an empty input yields one empty pattern.
pub fn split_index_patterns(csv: &str) -> Vec<String> {
    csv.split(',').map(|p| p.trim().to_string()).collect()
}

/// Human-readable policy description naming the snapshot, cold and delete ages.
pub fn describe(ages: &StageAges) -> String {
    format!(
        "Index state management policy to snapshot indices after {}, move them into a cold state after {} and delete them after {}",
        ages.snapshot, ages.cold, ages.delete
    )
}

/// Assemble the policy document, stamping `last_updated_time` from `clock`.
///
/// # Errors
///
/// Returns [`PolicyError::Chain`] if `chain` violates a lifecycle invariant.
pub fn assemble(
    meta: &PolicyMetadata,
    chain: LifecycleChain,
    clock: &dyn Clock,
) -> Result<PolicyEnvelope, PolicyError> {
    chain.validate(None)?;
    let default_state = chain.first().map(|s| s.name).unwrap_or(StateName::Hot);

    let document = PolicyDocument {
        policy_id: meta.policy_id.clone(),
        description: meta.description.clone(),
        last_updated_time: clock.now(),
        schema_version: meta.schema_version,
        error_notification: None,
        default_state,
        states: chain,
        ism_template: IsmTemplate {
            index_patterns: split_index_patterns(&meta.index_patterns),
            priority: meta.priority,
        },
    };

    tracing::info!(
        policy_id = %document.policy_id,
        states = document.states.len(),
        last_updated_time = %document.last_updated_time,
        "assembled policy document"
    );

    Ok(PolicyEnvelope { policy: document })
}

/// Serialize the envelope as a single line of JSON.
pub fn to_json(envelope: &PolicyEnvelope) -> Result<String, PolicyError> {
    Ok(serde_json::to_string(envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ism_core::FixedClock;
    use ism_state::{build_chain, SnapshotTarget};

    fn meta(patterns: &str) -> PolicyMetadata {
        PolicyMetadata {
            policy_id: "session_index_policy".into(),
            description: "test".into(),
            schema_version: 1,
            index_patterns: patterns.into(),
            priority: 100,
        }
    }

    fn chain(snapshot: &str, cold: &str, close: &str, delete: &str) -> LifecycleChain {
        let ages = StageAges::parse(snapshot, cold, close, delete).unwrap();
        let target = SnapshotTarget {
            repository: "logs".into(),
            name: "session_snapshot".into(),
        };
        build_chain(0, &ages, &target)
    }

    #[test]
    fn test_split_trims_and_preserves_order() {
        assert_eq!(split_index_patterns("a, b ,c"), ["a", "b", "c"]);
    }

    #[test]
    fn test_split_keeps_duplicates_and_empties() {
        assert_eq!(split_index_patterns("x,x, x"), ["x", "x", "x"]);
        assert_eq!(split_index_patterns("a,,b"), ["a", "", "b"]);
        assert_eq!(split_index_patterns(""), [""]);
    }

    #[test]
    fn test_describe_uses_raw_ages() {
        let ages = StageAges::parse("0", "30d", "60d", "365d").unwrap();
        assert_eq!(
            describe(&ages),
            "Index state management policy to snapshot indices after 0, move them into a cold state after 30d and delete them after 365d"
        );
    }

    #[test]
    fn test_assemble_sets_default_state_and_stamp() {
        let env = assemble(&meta("arkime_sessions3-*"), chain("1d", "30d", "60d", "365d"), &FixedClock::at(7)).unwrap();
        assert_eq!(env.policy.default_state, StateName::Hot);
        assert_eq!(env.policy.last_updated_time.as_i64(), 7);
        assert_eq!(env.policy.states.len(), 5);
        assert_eq!(env.policy.ism_template.index_patterns, ["arkime_sessions3-*"]);
        assert!(env.policy.error_notification.is_none());
    }

    #[test]
    fn test_json_has_policy_key_and_null_notification() {
        let env = assemble(&meta("a"), chain("0", "0", "0", "0"), &FixedClock::at(1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&env).unwrap()).unwrap();
        let policy = &value["policy"];
        assert!(policy["error_notification"].is_null());
        assert_eq!(policy["default_state"], "hot");
        assert_eq!(policy["states"].as_array().unwrap().len(), 1);
        assert_eq!(policy["states"][0]["transitions"], serde_json::json!([]));
    }

    #[test]
    fn test_json_key_order() {
        let env = assemble(&meta("a"), chain("0", "0", "0", "0"), &FixedClock::at(1)).unwrap();
        let json = to_json(&env).unwrap();
        let keys = [
            "\"policy_id\"",
            "\"description\"",
            "\"last_updated_time\"",
            "\"schema_version\"",
            "\"error_notification\"",
            "\"default_state\"",
            "\"states\"",
            "\"ism_template\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_same_inputs_same_bytes() {
        let clock = FixedClock::at(1_700_000_000_000);
        let a = to_json(&assemble(&meta("a,b"), chain("1d", "0", "60d", "365d"), &clock).unwrap()).unwrap();
        let b = to_json(&assemble(&meta("a,b"), chain("1d", "0", "60d", "365d"), &clock).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
