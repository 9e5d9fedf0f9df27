//! # Generate Command
//!
//! Flag surface and handler for emitting the policy document.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: hot → snapshot (1d) → cold (30d) → closed (60d) → delete (365d)
//! ism-policy
//!
//! # No snapshot, keep indices read-only for two weeks, then delete:
//! ism-policy --snapshot 0 --cold 1d --close 0 --delete 14d
//!
//! # Layer a YAML file under the flags:
//! ism-policy --config ism.yaml --priority 200
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use ism_core::Clock;
use ism_policy::config::{INDEX_PATTERN_ENV, SNAPSHOT_REPO_ENV};
use ism_policy::{generate_policy, to_json, PolicyOverrides, RawAge};

/// Policy generation flags. Unset flags fall back to `--config`, then to
/// the built-in defaults.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Index management policy ID [default: session_index_policy].
    #[arg(long = "policy", value_name = "STR")]
    pub policy_id: Option<String>,

    /// Index management policy index pattern, comma-separated [default: arkime_sessions3-*].
    #[arg(long, value_name = "STR", env = INDEX_PATTERN_ENV)]
    pub index_pattern: Option<String>,

    /// Template priority [default: 100].
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub priority: Option<i64>,

    /// Index management policy template schema version [default: 1].
    #[arg(long = "version", value_name = "INT", allow_negative_numbers = true)]
    pub schema_version: Option<i64>,

    /// Replica count for hot state [default: 0].
    #[arg(long, value_name = "INT")]
    pub replicas: Option<u32>,

    /// Snapshot index age (e.g., 1d); 0 to disable [default: 1d].
    #[arg(long = "snapshot", value_name = "AGE")]
    pub snapshot_age: Option<String>,

    /// Snapshot repository [default: logs].
    #[arg(long, value_name = "STR", env = SNAPSHOT_REPO_ENV)]
    pub snapshot_repo: Option<String>,

    /// Snapshot name [default: session_snapshot].
    #[arg(long, value_name = "STR")]
    pub snapshot_name: Option<String>,

    /// Cold state index age (e.g., 30d); 0 to disable [default: 30d].
    #[arg(long = "cold", value_name = "AGE")]
    pub cold_age: Option<String>,

    /// Close state index age (e.g., 60d); 0 to disable [default: 60d].
    #[arg(long = "close", value_name = "AGE")]
    pub close_age: Option<String>,

    /// Delete state index age (e.g., 365d); 0 to disable [default: 365d].
    #[arg(long = "delete", value_name = "AGE")]
    pub delete_age: Option<String>,

    /// YAML file supplying any of the settings above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// The flag layer of the configuration.
    pub fn overrides(&self) -> PolicyOverrides {
        let age = |raw: &Option<String>| raw.as_deref().map(RawAge::from);
        PolicyOverrides {
            policy_id: self.policy_id.clone(),
            index_pattern: self.index_pattern.clone(),
            priority: self.priority,
            schema_version: self.schema_version,
            replicas: self.replicas,
            snapshot_age: age(&self.snapshot_age),
            snapshot_repo: self.snapshot_repo.clone(),
            snapshot_name: self.snapshot_name.clone(),
            cold_age: age(&self.cold_age),
            close_age: age(&self.close_age),
            delete_age: age(&self.delete_age),
        }
    }
}

/// Per-run context captured once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// Directory relative paths (e.g. `--config`) are resolved against.
    pub working_dir: PathBuf,
}

impl Invocation {
    pub fn capture(verbosity: u8) -> Self {
        let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            verbosity,
            working_dir,
        }
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Build the policy and write it to `out` as one line of JSON.
///
/// Nothing is written unless the whole document builds.
pub fn run_generate(
    args: &GenerateArgs,
    invocation: &Invocation,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> Result<u8> {
    let file_layer = match &args.config {
        Some(path) => {
            let resolved = resolve_path(path, &invocation.working_dir);
            PolicyOverrides::load(&resolved)
                .with_context(|| format!("loading config layer from {}", resolved.display()))?
        }
        None => PolicyOverrides::default(),
    };

    let settings = file_layer.merge(args.overrides()).resolve();
    tracing::debug!(?settings, "resolved settings");

    let envelope = generate_policy(&settings, clock)?;
    let json = to_json(&envelope)?;

    writeln!(out, "{json}").context("writing policy document")?;
    out.flush().context("flushing policy document")?;
    Ok(0)
}
