//! Core logic for the time journal.
//!
//! This crate contains the fundamental types and logic for:
//! - Extraction: pulling times and durations out of free-text activity notes
//! - Placement: laying out a day's entries on a 24-hour timeline
//! - Reconciliation: hiding or flagging imported calendar events
//! - Gap detection: finding unlogged stretches of a day

pub mod clock;
pub mod expression;
mod extract;
mod gaps;
mod interval;
mod placement;
mod reconcile;
mod rules;
pub mod types;

pub use clock::{ClockError, ClockTime, MINUTES_PER_DAY};
pub use expression::{ExpressionKind, ParseOutcome, TimeExpression};
pub use extract::{DEFAULT_ACTIVITY_MINUTES, default_duration_minutes, detect_expressions, parse};
pub use gaps::{MIN_GAP_MINUTES, find_unlogged_gaps};
pub use placement::{DayLayout, PlacementOptions, place, place_entries};
pub use reconcile::{Reconciliation, reconcile_events};
pub use types::{
    EntryId, EntryStatus, EventId, ImportedEvent, LoggedEntry, PlacedEntry, TimeGap,
    ValidationError,
};
