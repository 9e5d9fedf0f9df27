//! # Lifecycle States, Actions and Transitions
//!
//! The building blocks of an ISM policy's `states` array.
//!
//! ## States
//!
//! ```text
//! hot ──▶ snapshot ──▶ cold ──▶ closed ──▶ delete
//! ```
//!
//! `hot` is always present and is the default state. Each later state is
//! optional; when one is omitted its predecessor transitions directly to the
//! next enabled state.
//!
//! ## Wire Shape
//!
//! ```json
//! {"name": "cold",
//!  "actions": [{"read_only": {}}],
//!  "transitions": [{"state_name": "closed", "conditions": {"min_index_age": "60d"}}]}
//! ```

use serde::{Deserialize, Serialize};

use ism_core::IndexAge;

// ─── State Name ──────────────────────────────────────────────────────

/// Name of a lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateName {
    /// Fully writable, every index starts here.
    Hot,
    /// Archival snapshot taken before the index becomes read-only.
    Snapshot,
    /// Read-only but still queryable.
    Cold,
    /// Closed to free resources, not deleted.
    Closed,
    /// Deleted.
    Delete,
}

impl StateName {
    /// All states in lifecycle order.
    pub fn all() -> &'static [StateName] {
        &[
            Self::Hot,
            Self::Snapshot,
            Self::Cold,
            Self::Closed,
            Self::Delete,
        ]
    }

    /// The stages that follow `hot`, in the order they are considered.
    pub fn gated_stages() -> &'static [StateName] {
        &Self::all()[1..]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Snapshot => "snapshot",
            Self::Cold => "cold",
            Self::Closed => "closed",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for StateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Actions ─────────────────────────────────────────────────────────

/// An ISM action attached to a state.
///
/// Externally tagged, so `ReadOnly {}` serializes as `{"read_only":{}}`
/// exactly as the engine expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Set the index replica count.
    ReplicaCount { number_of_replicas: u32 },
    /// Snapshot the index into a repository.
    Snapshot { repository: String, snapshot: String },
    /// Mark the index read-only.
    ReadOnly {},
    /// Close the index.
    Close {},
    /// Delete the index.
    Delete {},
}

// ─── Transitions ─────────────────────────────────────────────────────

/// Conditions gating a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConditions {
    /// Minimum index age before the transition fires.
    pub min_index_age: IndexAge,
}

/// Move to `state_name` once the index age reaches `conditions.min_index_age`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state_name: StateName,
    pub conditions: TransitionConditions,
}

impl Transition {
    pub fn new(state_name: StateName, min_index_age: IndexAge) -> Self {
        Self {
            state_name,
            conditions: TransitionConditions { min_index_age },
        }
    }

    pub fn min_index_age(&self) -> &IndexAge {
        &self.conditions.min_index_age
    }
}

// ─── Lifecycle State ─────────────────────────────────────────────────

/// One entry of the policy's `states` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub name: StateName,
    pub actions: Vec<Action>,
    pub transitions: Vec<Transition>,
}

impl LifecycleState {
    /// A state with a single action and no outgoing transition.
    pub fn new(name: StateName, action: Action) -> Self {
        Self {
            name,
            actions: vec![action],
            transitions: Vec::new(),
        }
    }

    /// Whether the state has no outgoing transition.
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The single outgoing transition, if any.
    pub fn next(&self) -> Option<&Transition> {
        self.transitions.first()
    }
}
