//! # ism-policy — ISM Policy Document Generation
//!
//! Turns generator settings into the `{"policy": ...}` document consumed by
//! the index state management engine.
//!
//! ## Pipeline
//!
//! ```text
//! PolicySettings ──stage_ages()──▶ StageAges ──build_chain()──▶ LifecycleChain
//!                                                                    │
//!                               PolicyMetadata + Clock ──assemble()──┴──▶ PolicyEnvelope
//! ```
//!
//! Age validation happens first: a malformed age aborts before any part of
//! the document is built.

pub mod config;
pub mod document;
pub mod error;

pub use config::{PolicyOverrides, PolicySettings, RawAge};
pub use document::{
    assemble, describe, split_index_patterns, to_json, IsmTemplate, PolicyDocument,
    PolicyEnvelope, PolicyMetadata,
};
pub use error::PolicyError;

use ism_core::Clock;
use ism_state::build_chain;

/// Validate, build and assemble a policy from resolved settings.
pub fn generate_policy(
    settings: &PolicySettings,
    clock: &dyn Clock,
) -> Result<PolicyEnvelope, PolicyError> {
    let ages = settings.stage_ages()?;
    let chain = build_chain(settings.replicas, &ages, &settings.snapshot_target());
    chain.validate(Some(&ages))?;
    assemble(&settings.metadata(&ages), chain, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ism_core::FixedClock;

    #[test]
    fn generate_with_defaults() {
        let env = generate_policy(&PolicySettings::default(), &FixedClock::at(0)).unwrap();
        assert_eq!(env.policy.states.len(), 5);
        assert_eq!(env.policy.ism_template.priority, 100);
    }

    #[test]
    fn generate_rejects_bad_age() {
        let settings = PolicySettings {
            close_age: "60 days".into(),
            ..PolicySettings::default()
        };
        let err = generate_policy(&settings, &FixedClock::at(0)).unwrap_err();
        assert!(err.is_invalid_age());
        assert!(err.to_string().contains("60 days"));
    }
}
