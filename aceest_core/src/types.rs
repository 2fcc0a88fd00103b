//! Core domain types for the ACEest Fitness workout log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout categories (the fixed workout phases)
//! - Logged entries and their categorized view
//! - Raw submissions as they arrive from a client
//! - Aggregates (listing, summary, progress)

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display format for entry timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Category
// ============================================================================

/// Workout phase an entry is filed under
///
/// Declaration order is the stable listing order.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    #[serde(rename = "Warm-up")]
    WarmUp,
    #[default]
    #[serde(rename = "Workout")]
    Workout,
    #[serde(rename = "Cool-down")]
    CoolDown,
}

impl Category {
    /// All categories in listing order
    pub const ALL: [Category; 3] = [Category::WarmUp, Category::Workout, Category::CoolDown];

    /// Wire name of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::WarmUp => "Warm-up",
            Category::Workout => "Workout",
            Category::CoolDown => "Cool-down",
        }
    }

    /// Wire names of every category, for error reporting
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory {
                allowed: Self::names(),
            })
    }
}

// ============================================================================
// Entries
// ============================================================================

/// A single logged exercise session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutEntry {
    pub exercise: String,
    /// Minutes, always > 0
    pub duration: u32,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

/// An entry annotated with the category it was filed under
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorizedEntry {
    pub category: Category,
    #[serde(flatten)]
    pub entry: WorkoutEntry,
}

/// Category → entries in insertion order
pub type CategoryMap = BTreeMap<Category, Vec<WorkoutEntry>>;

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Raw submissions
// ============================================================================

/// Duration exactly as a client sent it, before validation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DurationInput {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Any other JSON value (bool, array, object)
    Other(serde_json::Value),
}

impl DurationInput {
    /// Convert to whole minutes
    ///
    /// Floats are truncated toward zero; text must be a base-10 integer
    /// once surrounding whitespace is trimmed. The result must be > 0.
    pub fn to_minutes(&self) -> Result<u32> {
        let minutes: i64 = match self {
            DurationInput::Integer(n) => *n,
            DurationInput::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::InvalidDuration(format!("{} is not a number", f)));
                }
                let truncated = f.trunc();
                if truncated > i64::MAX as f64 {
                    return Err(Error::InvalidDuration(format!("{} is too large", f)));
                }
                truncated as i64
            }
            DurationInput::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::InvalidDuration(format!("'{}' is not an integer", s)))?,
            DurationInput::Other(v) => {
                return Err(Error::InvalidDuration(format!("{} is not a number", v)));
            }
        };

        if minutes <= 0 {
            return Err(Error::InvalidDuration(format!(
                "{} is not greater than zero",
                minutes
            )));
        }

        u32::try_from(minutes)
            .map_err(|_| Error::InvalidDuration(format!("{} is too large", minutes)))
    }
}

impl From<i64> for DurationInput {
    fn from(n: i64) -> Self {
        DurationInput::Integer(n)
    }
}

impl From<i32> for DurationInput {
    fn from(n: i32) -> Self {
        DurationInput::Integer(n.into())
    }
}

impl From<u32> for DurationInput {
    fn from(n: u32) -> Self {
        DurationInput::Integer(n.into())
    }
}

impl From<f64> for DurationInput {
    fn from(f: f64) -> Self {
        DurationInput::Float(f)
    }
}

impl From<&str> for DurationInput {
    fn from(s: &str) -> Self {
        DurationInput::Text(s.to_string())
    }
}

/// A text field exactly as a client sent it, before validation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    /// Any non-string JSON value
    Other(serde_json::Value),
}

impl TextInput {
    /// The text, if the client sent a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextInput::Text(s) => Some(s),
            TextInput::Other(_) => None,
        }
    }
}

impl From<&str> for TextInput {
    fn from(s: &str) -> Self {
        TextInput::Text(s.to_string())
    }
}

/// A workout submission as decoded from a request body
///
/// Fields keep their raw JSON shape so a wrongly typed field is reported
/// by validation rather than by decoding. `workout` is accepted as an
/// alias of `exercise`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkoutInput {
    #[serde(default)]
    pub category: Option<TextInput>,
    #[serde(default, alias = "workout")]
    pub exercise: Option<TextInput>,
    #[serde(default)]
    pub duration: Option<DurationInput>,
}

// ============================================================================
// Aggregates
// ============================================================================

/// Flattened listing of every entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub workouts: Vec<CategorizedEntry>,
    pub count: usize,
    pub by_category: CategoryMap,
}

/// Qualitative bucket for total logged minutes
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MotivationTier {
    Low,
    Medium,
    High,
}

impl MotivationTier {
    pub fn message(self) -> &'static str {
        match self {
            MotivationTier::Low => "Good start! Keep moving.",
            MotivationTier::Medium => "Nice effort! You're building consistency.",
            MotivationTier::High => "Excellent dedication! Keep up the great work.",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Motivation {
    pub tier: MotivationTier,
    pub message: String,
}

/// Totals with a motivational message
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub workouts: CategoryMap,
    pub total_time: u64,
    pub motivation: Motivation,
}

/// Per-category minutes and their share of the grand total
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Progress {
    pub totals: BTreeMap<Category, u64>,
    pub percentages: BTreeMap<Category, f64>,
    pub total_time: u64,
}
