//! Core type definitions with validation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::ClockTime;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid entry status value.
    #[error("invalid entry status: {value}")]
    InvalidEntryStatus { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated logged-entry identifier, assigned by the persistence layer.
    EntryId, "entry ID"
);

define_string_id!(
    /// A validated imported calendar event identifier.
    EventId, "event ID"
);

/// Whether the user has confirmed a logged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Proposed but not yet confirmed.
    #[default]
    Pending,
    /// Confirmed by the user.
    Confirmed,
}

impl EntryStatus {
    /// String representation for storage and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(ValidationError::InvalidEntryStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// One user-confirmed (or pending) activity, as supplied by storage.
///
/// An entry without both `start_time` and `end_time` is untimed and is laid
/// out by its `duration_minutes` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<ClockTime>,
    #[serde(default)]
    pub status: EntryStatus,
}

impl LoggedEntry {
    /// Both stored bounds, if the entry carries them.
    pub const fn explicit_times(&self) -> Option<(ClockTime, ClockTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub const fn is_timed(&self) -> bool {
        self.explicit_times().is_some()
    }

    pub const fn is_confirmed(&self) -> bool {
        matches!(self.status, EntryStatus::Confirmed)
    }
}

/// A calendar event supplied by the import service, already in local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<ClockTime>,
    #[serde(default)]
    pub all_day: bool,
}

impl ImportedEvent {
    /// Start and end for timed events. All-day events and events missing a
    /// bound have none.
    pub const fn time_bounds(&self) -> Option<(ClockTime, ClockTime)> {
        if self.all_day {
            return None;
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// A logged entry with its position on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEntry {
    pub entry: LoggedEntry,
    pub placed_start: ClockTime,
    pub placed_end: ClockTime,
    /// True when the entry had no explicit time and the position was
    /// synthesized for display.
    pub is_estimated: bool,
}

/// A contiguous stretch of the day with no confirmed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGap {
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub duration_minutes: u32,
}

impl TimeGap {
    pub const fn new(start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            start_minutes,
            end_minutes,
            duration_minutes: end_minutes.saturating_sub(start_minutes),
        }
    }

    pub const fn start(&self) -> ClockTime {
        ClockTime::saturating_from_minutes(self.start_minutes)
    }

    pub const fn end(&self) -> ClockTime {
        ClockTime::saturating_from_minutes(self.end_minutes)
    }
}
