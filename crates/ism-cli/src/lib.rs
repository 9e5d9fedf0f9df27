//! # ism-cli — ISM Policy Generator CLI
//!
//! Provides the `ism-policy` binary, which prints the index state management
//! policy for session indices as a single JSON document on stdout.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation and assembly are delegated to
//!   `ism-core`, `ism-state` and `ism-policy`.
//! - Stdout carries only the policy document. Logs and diagnostics go to stderr.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Document written |
//! | 1 | Invalid age, unreadable config, or write failure |
//! | 2 | Argument parsing failed (usage printed by clap) |

pub mod generate;

pub use generate::{resolve_path, run_generate, GenerateArgs, Invocation};
