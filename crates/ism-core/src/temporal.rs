//! # Temporal Types — Epoch-Millisecond Timestamps
//!
//! The policy document stamps `last_updated_time` as an integer count of
//! milliseconds since the Unix epoch. This module defines that value and
//! the [`Clock`] seam through which it is obtained.
//!
//! Production code reads the wall clock through [`SystemClock`]. Tests pass
//! a [`FixedClock`] so that two documents built from identical inputs are
//! byte-identical.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    /// Wrap a raw millisecond count.
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Convert from a `chrono::DateTime<Utc>`, discarding sub-millisecond precision.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// The raw millisecond count.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of the `last_updated_time` stamp.
pub trait Clock {
    /// The current time in epoch milliseconds.
    fn now(&self) -> EpochMillis;
}

/// Wall-clock time via `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        EpochMillis::from_utc(Utc::now())
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub EpochMillis);

impl FixedClock {
    /// A clock that always reports `millis`.
    pub fn at(millis: i64) -> Self {
        Self(EpochMillis::new(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> EpochMillis {
        self.0
    }
}
