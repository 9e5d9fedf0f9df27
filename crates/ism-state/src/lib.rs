//! # ism-state — Index Lifecycle Model
//!
//! Describes how an index ages through the states of an ISM policy and
//! builds the linear chain of those states.
//!
//! - **States** (`state.rs`): `StateName`, `Action`, `Transition`,
//!   `LifecycleState`, serialized in the shape the ISM engine consumes.
//! - **Chain** (`chain.rs`): `build_chain` turns validated stage ages into a
//!   `LifecycleChain` that starts at `hot` and ends in a terminal state.
//!
//! ## Design
//!
//! The chain is linear: every state has at most one outgoing transition and
//! no state name appears twice. Stage names are an enum, never free strings.

pub mod chain;
pub mod state;

pub use chain::{build_chain, ChainError, LifecycleChain, SnapshotTarget, StageAges};
pub use state::{Action, LifecycleState, StateName, Transition, TransitionConditions};
