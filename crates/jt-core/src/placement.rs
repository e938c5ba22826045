//! Timeline placement.
//!
//! Lays out one day's logged entries next to the imported calendar events.
//!
//! # Algorithm Summary
//!
//! 1. Split entries into timed (both bounds stored) and untimed.
//! 2. Walk the timed entries sorted by start to find the free stretches of the
//!    visible window.
//! 3. Fill untimed entries into those stretches greedily, in caller order,
//!    with a fill cursor that only moves forward.
//! 4. Stack whatever does not fit immediately before the earliest timed entry.
//! 5. Reconcile imported events and report unlogged gaps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, MINUTES_PER_DAY};
use crate::gaps::find_unlogged_gaps;
use crate::interval::{Interval, free_intervals};
use crate::reconcile::reconcile_events;
use crate::types::{EntryId, EventId, ImportedEvent, LoggedEntry, PlacedEntry, TimeGap};

/// How a day is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOptions {
    /// First visible hour. Default: 0.
    pub visible_start_hour: u32,
    /// Hour the visible window ends at. Default: 24.
    pub visible_end_hour: u32,
    /// The viewed day is the caller's current date.
    pub is_today: bool,
    /// The viewed day lies after the caller's current date.
    pub is_future_day: bool,
    /// Current wall-clock time, consulted when `is_today` is set.
    pub now: Option<ClockTime>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            visible_start_hour: 0,
            visible_end_hour: 24,
            is_today: false,
            is_future_day: false,
            now: None,
        }
    }
}

impl PlacementOptions {
    /// The visible window in minutes. Hours past 24 are clamped and an
    /// inverted window is empty.
    pub(crate) fn visible_window(&self) -> Interval {
        let start = self.visible_start_hour.saturating_mul(60).min(MINUTES_PER_DAY);
        let end = self.visible_end_hour.saturating_mul(60).min(MINUTES_PER_DAY);
        Interval::new(start, end.max(start))
    }
}

/// Everything a renderer needs to draw one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout {
    /// One placement per input entry, in input order.
    pub placed_entries: Vec<PlacedEntry>,
    /// Imported events a confirmed entry already covers.
    pub hidden_event_ids: BTreeSet<EventId>,
    /// Confirmed entries intersecting a visible imported event.
    pub overlapping_entry_ids: BTreeSet<EntryId>,
    /// Visible imported events intersecting a confirmed entry.
    pub overlapping_event_ids: BTreeSet<EventId>,
    /// Unlogged stretches of at least [`crate::MIN_GAP_MINUTES`].
    pub gaps: Vec<TimeGap>,
}

/// Lays out a day.
pub fn place(
    entries: &[LoggedEntry],
    events: &[ImportedEvent],
    options: &PlacementOptions,
) -> DayLayout {
    let placed_entries = place_entries(entries, options);
    let reconciliation = reconcile_events(entries, events);
    let gaps = find_unlogged_gaps(entries, options);

    tracing::debug!(
        entries = entries.len(),
        events = events.len(),
        hidden = reconciliation.hidden_event_ids.len(),
        gaps = gaps.len(),
        "placed day"
    );

    DayLayout {
        placed_entries,
        hidden_event_ids: reconciliation.hidden_event_ids,
        overlapping_entry_ids: reconciliation.overlapping_entry_ids,
        overlapping_event_ids: reconciliation.overlapping_event_ids,
        gaps,
    }
}

/// Where the next untimed entry may start: a free stretch and how much of it
/// earlier entries already used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FillCursor {
    gap_index: usize,
    offset: u32,
}

impl FillCursor {
    /// Finds room for `minutes`, starting at the cursor's stretch. On success
    /// the cursor moves past the placed entry and the start is returned.
    fn take(&mut self, free: &[Interval], minutes: u32) -> Option<u32> {
        for (index, gap) in free.iter().enumerate().skip(self.gap_index) {
            let used = if index == self.gap_index { self.offset } else { 0 };
            if gap.duration().saturating_sub(used) >= minutes {
                let start = gap.start + used;
                *self = Self {
                    gap_index: index,
                    offset: used + minutes,
                };
                return Some(start);
            }
        }
        None
    }
}

/// Positions every entry on the timeline.
///
/// Timed entries keep their stored times. Untimed entries, and entries
/// carrying only one bound, are packed into the free stretches of the visible
/// window and marked as estimated.
pub fn place_entries(entries: &[LoggedEntry], options: &PlacementOptions) -> Vec<PlacedEntry> {
    let window = options.visible_window();

    let mut timed: Vec<Interval> = entries
        .iter()
        .filter_map(LoggedEntry::explicit_times)
        .map(|(start, end)| Interval::from_bounds(start, end))
        .collect();
    timed.sort_by_key(|interval| interval.start);

    let free = free_intervals(&timed, window);
    let overflow_anchor = timed.first().map_or(window.end, |first| first.start);

    let mut cursor = FillCursor::default();
    let mut overflow_minutes = 0u32;

    entries
        .iter()
        .map(|entry| {
            if let Some((start, end)) = entry.explicit_times() {
                return PlacedEntry {
                    entry: entry.clone(),
                    placed_start: start,
                    placed_end: end,
                    is_estimated: false,
                };
            }

            if entry.start_time.is_some() || entry.end_time.is_some() {
                tracing::debug!(entry = %entry.id, "entry has only one bound, placing by duration");
            }

            let minutes = entry.duration_minutes.min(MINUTES_PER_DAY);
            let (start, end) = if let Some(start) = cursor.take(&free, minutes) {
                (start, start + minutes)
            } else {
                let end = overflow_anchor.saturating_sub(overflow_minutes);
                let start = end.saturating_sub(minutes);
                overflow_minutes = overflow_minutes.saturating_add(minutes);
                tracing::debug!(entry = %entry.id, start, end, "no free stretch fits, stacking before first entry");
                (start, end)
            };

            PlacedEntry {
                entry: entry.clone(),
                placed_start: ClockTime::saturating_from_minutes(start),
                placed_end: ClockTime::saturating_from_minutes(end),
                is_estimated: true,
            }
        })
        .collect()
}
