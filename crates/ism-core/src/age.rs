//! # Index Age Thresholds
//!
//! Defines `AgeThreshold`, the validated form of the per-stage age arguments
//! (`--snapshot`, `--cold`, `--close`, `--delete`), and `IndexAge`, the
//! enabled duration that ends up in a transition's `min_index_age` condition.
//!
//! ## Accepted Forms
//!
//! | Input | Result |
//! |-------|--------|
//! | `0` | [`AgeThreshold::Disabled`], the stage is omitted |
//! | `<digits><unit>` | [`AgeThreshold::After`], unit is one of `d`, `h`, `m`, `s` |
//! | anything else | [`IsmError::InvalidAgeFormat`] |
//!
//! Digits are ASCII only. Whitespace, signs, decimal points and trailing
//! characters (including a trailing newline) are rejected.
//!
//! The magnitude is retained as its digit string and never converted to an
//! integer: the ISM engine owns the interpretation, so `999999999d` is
//! accepted and emitted verbatim.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IsmError;

/// The literal that disables a stage.
pub const DISABLED_MARKER: &str = "0";

/// Time unit suffix of an [`IndexAge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeUnit {
    /// `d`
    Days,
    /// `h`
    Hours,
    /// `m`
    Minutes,
    /// `s`
    Seconds,
}

impl AgeUnit {
    /// All units in suffix order `d`, `h`, `m`, `s`.
    pub fn all() -> &'static [AgeUnit] {
        &[Self::Days, Self::Hours, Self::Minutes, Self::Seconds]
    }

    /// The single-character suffix used in the policy document.
    pub fn suffix(&self) -> char {
        match self {
            Self::Days => 'd',
            Self::Hours => 'h',
            Self::Minutes => 'm',
            Self::Seconds => 's',
        }
    }

    /// Map a suffix character back to a unit.
    pub fn from_suffix(c: char) -> Option<Self> {
        Self::all().iter().copied().find(|unit| unit.suffix() == c)
    }
}

impl std::fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// An enabled minimum index age, e.g. `30d`.
///
/// Serializes as its string form so it can be dropped straight into the
/// `min_index_age` condition of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexAge {
    magnitude: String,
    unit: AgeUnit,
}

impl IndexAge {
    /// Parse `<digits><unit>`. The disabled marker is not an `IndexAge`.
    pub fn parse(raw: &str) -> Result<Self, IsmError> {
        let reject = |reason| IsmError::InvalidAgeFormat {
            value: raw.to_string(),
            reason,
        };

        let (split, last) = raw.char_indices().last().ok_or_else(|| reject("empty value"))?;
        let unit = AgeUnit::from_suffix(last)
            .ok_or_else(|| reject("missing or unknown unit, expected one of d, h, m, s"))?;

        let magnitude = &raw[..split];
        if magnitude.is_empty() {
            return Err(reject("missing magnitude before unit"));
        }
        if !magnitude.bytes().all(|b| b.is_ascii_digit()) {
            return Err(reject("magnitude must be decimal digits"));
        }

        Ok(Self {
            magnitude: magnitude.to_string(),
            unit,
        })
    }

    /// The digit string preceding the unit, exactly as supplied.
    pub fn magnitude(&self) -> &str {
        &self.magnitude
    }

    /// The unit suffix.
    pub fn unit(&self) -> AgeUnit {
        self.unit
    }
}

impl std::fmt::Display for IndexAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

impl FromStr for IndexAge {
    type Err = IsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IndexAge {
    type Error = IsmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IndexAge> for String {
    fn from(age: IndexAge) -> Self {
        age.to_string()
    }
}

/// A validated stage age: either disabled or an enabled [`IndexAge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgeThreshold {
    /// The stage is omitted from the lifecycle.
    Disabled,
    /// The stage is entered once the index is at least this old.
    After(IndexAge),
}

impl AgeThreshold {
    /// Whether the stage gated by this threshold is part of the lifecycle.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::After(_))
    }

    /// The enabled age, if any.
    pub fn index_age(&self) -> Option<&IndexAge> {
        match self {
            Self::Disabled => None,
            Self::After(age) => Some(age),
        }
    }
}

impl std::fmt::Display for AgeThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str(DISABLED_MARKER),
            Self::After(age) => write!(f, "{age}"),
        }
    }
}

impl FromStr for AgeThreshold {
    type Err = IsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Validate a raw stage-age argument.
///
/// # Errors
///
/// Returns [`IsmError::InvalidAgeFormat`] for anything other than `0` or
/// `<digits><d|h|m|s>`.
pub fn validate(raw: &str) -> Result<AgeThreshold, IsmError> {
    if raw == DISABLED_MARKER {
        return Ok(AgeThreshold::Disabled);
    }
    IndexAge::parse(raw).map(AgeThreshold::After)
}
