//! # State-Chain Builder
//!
//! Assembles the ordered `states` array of a policy from the hot replica
//! count, the four stage ages and the snapshot target.
//!
//! ## Algorithm
//!
//! The chain starts as `[hot]`. Each gated stage is considered in the fixed
//! order snapshot → cold → closed → delete. A disabled stage contributes
//! nothing. An enabled stage is appended, then the element before it (always
//! index `len - 2`) has its transitions overwritten with a single transition
//! to the new stage at that stage's threshold. Because the predecessor is
//! always the current tail, omitted stages are skipped without looking back.
//! Finally the last element's transitions are cleared.
//!
//! ```text
//! snapshot=1d cold=0 close=60d delete=365d
//!
//! hot ──1d──▶ snapshot ──60d──▶ closed ──365d──▶ delete
//! ```

use serde::Serialize;
use thiserror::Error;

use ism_core::{AgeThreshold, IndexAge, IsmError};

use crate::state::{Action, LifecycleState, StateName, Transition};

// ─── Errors ──────────────────────────────────────────────────────────

/// A chain invariant that does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The chain has no states.
    #[error("lifecycle chain is empty")]
    Empty,

    /// The first state is not `hot`.
    #[error("lifecycle chain must start with hot, found {found}")]
    MissingHot { found: StateName },

    /// A state appears more than once.
    #[error("lifecycle state {state} appears more than once")]
    DuplicateState { state: StateName },

    /// A non-terminal state does not transition to its successor.
    #[error("state {from} must transition to {expected}, found {found:?}")]
    BrokenLink {
        from: StateName,
        expected: StateName,
        found: Vec<StateName>,
    },

    /// The last state still has an outgoing transition.
    #[error("terminal state {state} has an outgoing transition")]
    TerminalHasTransition { state: StateName },

    /// A transition's age differs from the threshold that enabled its target.
    #[error("transition into {state} uses {found}, expected {expected}")]
    ThresholdMismatch {
        state: StateName,
        expected: String,
        found: String,
    },
}

// ─── Inputs ──────────────────────────────────────────────────────────

/// The four validated stage ages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAges {
    pub snapshot: AgeThreshold,
    pub cold: AgeThreshold,
    pub close: AgeThreshold,
    pub delete: AgeThreshold,
}

impl StageAges {
    /// Validate the four raw stage ages, reporting the first bad one in stage order.
    pub fn parse(snapshot: &str, cold: &str, close: &str, delete: &str) -> Result<Self, IsmError> {
        Ok(Self {
            snapshot: ism_core::validate(snapshot)?,
            cold: ism_core::validate(cold)?,
            close: ism_core::validate(close)?,
            delete: ism_core::validate(delete)?,
        })
    }

    /// Threshold gating `stage`. `hot` has no gate.
    pub fn threshold(&self, stage: StateName) -> Option<&AgeThreshold> {
        match stage {
            StateName::Hot => None,
            StateName::Snapshot => Some(&self.snapshot),
            StateName::Cold => Some(&self.cold),
            StateName::Closed => Some(&self.close),
            StateName::Delete => Some(&self.delete),
        }
    }

    /// `(stage, threshold)` pairs in build order.
    pub fn stages(&self) -> impl Iterator<Item = (StateName, &AgeThreshold)> + '_ {
        StateName::gated_stages()
            .iter()
            .filter_map(|&stage| self.threshold(stage).map(|t| (stage, t)))
    }
}

/// Where the snapshot stage writes its snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotTarget {
    pub repository: String,
    pub name: String,
}

// ─── Chain ───────────────────────────────────────────────────────────

/// The ordered lifecycle states of a policy.
///
/// Only produced by [`build_chain`] (or deserialization), so a value in hand
/// normally satisfies every invariant; [`LifecycleChain::validate`] checks
/// them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LifecycleChain(Vec<LifecycleState>);

impl LifecycleChain {
    pub fn states(&self) -> &[LifecycleState] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The default state.
    pub fn first(&self) -> Option<&LifecycleState> {
        self.0.first()
    }

    /// The state with no outgoing transition.
    pub fn terminal(&self) -> Option<&LifecycleState> {
        self.0.last()
    }

    pub fn names(&self) -> Vec<StateName> {
        self.0.iter().map(|s| s.name).collect()
    }

    /// Check the chain invariants, optionally against the ages it was built from.
    pub fn validate(&self, ages: Option<&StageAges>) -> Result<(), ChainError> {
        let first = self.0.first().ok_or(ChainError::Empty)?;
        if first.name != StateName::Hot {
            return Err(ChainError::MissingHot { found: first.name });
        }

        for (i, state) in self.0.iter().enumerate() {
            if self.0[..i].iter().any(|s| s.name == state.name) {
                return Err(ChainError::DuplicateState { state: state.name });
            }
        }

        for pair in self.0.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let linked = match from.transitions.as_slice() {
                [t] => t.state_name == to.name,
                _ => false,
            };
            if !linked {
                return Err(ChainError::BrokenLink {
                    from: from.name,
                    expected: to.name,
                    found: from.transitions.iter().map(|t| t.state_name).collect(),
                });
            }

            if let Some(expected) = ages.and_then(|a| a.threshold(to.name)) {
                let found = from.transitions[0].min_index_age();
                if expected.index_age() != Some(found) {
                    return Err(ChainError::ThresholdMismatch {
                        state: to.name,
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
            }
        }

        if let Some(last) = self.0.last() {
            if !last.is_terminal() {
                return Err(ChainError::TerminalHasTransition { state: last.name });
            }
        }

        Ok(())
    }
}

impl TryFrom<Vec<LifecycleState>> for LifecycleChain {
    type Error = ChainError;

    fn try_from(states: Vec<LifecycleState>) -> Result<Self, Self::Error> {
        let chain = Self(states);
        chain.validate(None)?;
        Ok(chain)
    }
}

fn stage_action(stage: StateName, hot_replicas: u32, snapshot: &SnapshotTarget) -> Action {
    match stage {
        StateName::Hot => Action::ReplicaCount {
            number_of_replicas: hot_replicas,
        },
        StateName::Snapshot => Action::Snapshot {
            repository: snapshot.repository.clone(),
            snapshot: snapshot.name.clone(),
        },
        StateName::Cold => Action::ReadOnly {},
        StateName::Closed => Action::Close {},
        StateName::Delete => Action::Delete {},
    }
}

/// Build the lifecycle chain. Infallible: all ages are already validated.
pub fn build_chain(hot_replicas: u32, ages: &StageAges, snapshot: &SnapshotTarget) -> LifecycleChain {
    let mut states = vec![LifecycleState::new(
        StateName::Hot,
        stage_action(StateName::Hot, hot_replicas, snapshot),
    )];

    for (stage, threshold) in ages.stages() {
        let age: &IndexAge = match threshold {
            AgeThreshold::Disabled => {
                tracing::debug!(stage = %stage, skipped = true, "stage disabled");
                continue;
            }
            AgeThreshold::After(age) => age,
        };

        states.push(LifecycleState::new(
            stage,
            stage_action(stage, hot_replicas, snapshot),
        ));
        let prev = states.len() - 2;
        states[prev].transitions = vec![Transition::new(stage, age.clone())];

        tracing::debug!(
            from = %states[prev].name,
            stage = %stage,
            min_index_age = %age,
            "stage appended"
        );
    }

    let last = states.len() - 1;
    states[last].transitions.clear();

    LifecycleChain(states)
}
