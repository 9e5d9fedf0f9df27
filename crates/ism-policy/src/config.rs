//! # Generator Settings
//!
//! Resolves the inputs of a policy from three layers, highest precedence
//! first:
//!
//! 1. Command-line flags (and the environment variables the CLI binds to
//!    `--index-pattern` and `--snapshot-repo`).
//! 2. An optional YAML file passed with `--config`.
//! 3. Built-in defaults.
//!
//! Every layer is a [`PolicyOverrides`] with all fields optional; merging
//! them and calling [`PolicyOverrides::resolve`] yields a complete
//! [`PolicySettings`].
//!
//! ## Config File
//!
//! ```yaml
//! policy_id: session_index_policy
//! index_pattern: "arkime_sessions3-*, arkime_history_v1-*"
//! replicas: 1
//! snapshot_age: 0        # integers are accepted for ages, 0 disables
//! cold_age: 14d
//! ```
//!
//! Unknown keys are rejected so that a misspelt setting is not silently
//! ignored.

use std::path::Path;

use serde::Deserialize;

use ism_core::IsmError;
use ism_state::{SnapshotTarget, StageAges};

use crate::document::{describe, PolicyMetadata};
use crate::error::PolicyError;

pub const DEFAULT_POLICY_ID: &str = "session_index_policy";
pub const DEFAULT_INDEX_PATTERN: &str = "arkime_sessions3-*";
pub const DEFAULT_PRIORITY: i64 = 100;
pub const DEFAULT_SCHEMA_VERSION: i64 = 1;
pub const DEFAULT_HOT_REPLICAS: u32 = 0;
pub const DEFAULT_SNAPSHOT_AGE: &str = "1d";
pub const DEFAULT_SNAPSHOT_REPO: &str = "logs";
pub const DEFAULT_SNAPSHOT_NAME: &str = "session_snapshot";
pub const DEFAULT_COLD_AGE: &str = "30d";
pub const DEFAULT_CLOSE_AGE: &str = "60d";
pub const DEFAULT_DELETE_AGE: &str = "365d";

/// Environment variable supplying the default `--index-pattern`.
pub const INDEX_PATTERN_ENV: &str = "ARKIME_INDEX_PATTERN";
/// Environment variable supplying the default `--snapshot-repo`.
pub const SNAPSHOT_REPO_ENV: &str = "ISM_SNAPSHOT_REPO";

/// An age as written in YAML: `30d` is a string, a bare `0` is an integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawAge {
    Number(u64),
    Text(String),
}

impl From<RawAge> for String {
    fn from(raw: RawAge) -> Self {
        match raw {
            RawAge::Number(n) => n.to_string(),
            RawAge::Text(s) => s,
        }
    }
}

impl From<&str> for RawAge {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One configuration layer. `None` means "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyOverrides {
    pub policy_id: Option<String>,
    pub index_pattern: Option<String>,
    pub priority: Option<i64>,
    pub schema_version: Option<i64>,
    pub replicas: Option<u32>,
    pub snapshot_age: Option<RawAge>,
    pub snapshot_repo: Option<String>,
    pub snapshot_name: Option<String>,
    pub cold_age: Option<RawAge>,
    pub close_age: Option<RawAge>,
    pub delete_age: Option<RawAge>,
}

impl PolicyOverrides {
    /// Parse a YAML configuration layer.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load a YAML configuration layer from disk.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides = Self::from_yaml(&content).map_err(|source| PolicyError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(overrides)
    }

    /// Layer `higher` on top of `self`; fields set in `higher` win.
    pub fn merge(self, higher: PolicyOverrides) -> PolicyOverrides {
        PolicyOverrides {
            policy_id: higher.policy_id.or(self.policy_id),
            index_pattern: higher.index_pattern.or(self.index_pattern),
            priority: higher.priority.or(self.priority),
            schema_version: higher.schema_version.or(self.schema_version),
            replicas: higher.replicas.or(self.replicas),
            snapshot_age: higher.snapshot_age.or(self.snapshot_age),
            snapshot_repo: higher.snapshot_repo.or(self.snapshot_repo),
            snapshot_name: higher.snapshot_name.or(self.snapshot_name),
            cold_age: higher.cold_age.or(self.cold_age),
            close_age: higher.close_age.or(self.close_age),
            delete_age: higher.delete_age.or(self.delete_age),
        }
    }

    /// Fill unset fields from the built-in defaults.
    pub fn resolve(self) -> PolicySettings {
        let d = PolicySettings::default();
        let age = |raw: Option<RawAge>, default: String| raw.map(String::from).unwrap_or(default);
        PolicySettings {
            policy_id: self.policy_id.unwrap_or(d.policy_id),
            index_pattern: self.index_pattern.unwrap_or(d.index_pattern),
            priority: self.priority.unwrap_or(d.priority),
            schema_version: self.schema_version.unwrap_or(d.schema_version),
            replicas: self.replicas.unwrap_or(d.replicas),
            snapshot_age: age(self.snapshot_age, d.snapshot_age),
            snapshot_repo: self.snapshot_repo.unwrap_or(d.snapshot_repo),
            snapshot_name: self.snapshot_name.unwrap_or(d.snapshot_name),
            cold_age: age(self.cold_age, d.cold_age),
            close_age: age(self.close_age, d.close_age),
            delete_age: age(self.delete_age, d.delete_age),
        }
    }
}

/// Fully resolved generator inputs. Ages are still raw strings here and are
/// validated by [`PolicySettings::stage_ages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySettings {
    pub policy_id: String,
    pub index_pattern: String,
    pub priority: i64,
    pub schema_version: i64,
    pub replicas: u32,
    pub snapshot_age: String,
    pub snapshot_repo: String,
    pub snapshot_name: String,
    pub cold_age: String,
    pub close_age: String,
    pub delete_age: String,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            policy_id: DEFAULT_POLICY_ID.to_string(),
            index_pattern: DEFAULT_INDEX_PATTERN.to_string(),
            priority: DEFAULT_PRIORITY,
            schema_version: DEFAULT_SCHEMA_VERSION,
            replicas: DEFAULT_HOT_REPLICAS,
            snapshot_age: DEFAULT_SNAPSHOT_AGE.to_string(),
            snapshot_repo: DEFAULT_SNAPSHOT_REPO.to_string(),
            snapshot_name: DEFAULT_SNAPSHOT_NAME.to_string(),
            cold_age: DEFAULT_COLD_AGE.to_string(),
            close_age: DEFAULT_CLOSE_AGE.to_string(),
            delete_age: DEFAULT_DELETE_AGE.to_string(),
        }
    }
}

impl PolicySettings {
    /// Validate the four stage ages.
    pub fn stage_ages(&self) -> Result<StageAges, IsmError> {
        StageAges::parse(
            &self.snapshot_age,
            &self.cold_age,
            &self.close_age,
            &self.delete_age,
        )
    }

    pub fn snapshot_target(&self) -> SnapshotTarget {
        SnapshotTarget {
            repository: self.snapshot_repo.clone(),
            name: self.snapshot_name.clone(),
        }
    }

    pub fn metadata(&self, ages: &StageAges) -> PolicyMetadata {
        PolicyMetadata {
            policy_id: self.policy_id.clone(),
            description: describe(ages),
            schema_version: self.schema_version,
            index_patterns: self.index_pattern.clone(),
            priority: self.priority,
        }
    }
}
