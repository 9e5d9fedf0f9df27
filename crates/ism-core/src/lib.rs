//! # ism-core — Foundational Types for the ISM Policy Generator
//!
//! Leaf crate of the workspace. Defines the validated primitives every other
//! crate builds on:
//!
//! - **`AgeThreshold` / `IndexAge`** (`age.rs`): the per-stage age arguments,
//!   validated once at the edge. Downstream code never sees a raw age string.
//! - **`EpochMillis` / `Clock`** (`temporal.rs`): the `last_updated_time`
//!   stamp and an injectable time source.
//! - **`IsmError`** (`error.rs`): the shared error hierarchy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ism-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod age;
pub mod error;
pub mod temporal;

pub use age::{validate, AgeThreshold, AgeUnit, IndexAge, DISABLED_MARKER};
pub use error::IsmError;
pub use temporal::{Clock, EpochMillis, FixedClock, SystemClock};
