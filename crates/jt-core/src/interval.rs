//! Minute intervals within a single day.

use crate::clock::{ClockTime, MINUTES_PER_DAY};

/// A half-open `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Reads a stored start/end pair.
    ///
    /// An end earlier than the start runs to the end of the viewed day; equal
    /// bounds give an empty interval.
    pub const fn from_bounds(start: ClockTime, end: ClockTime) -> Self {
        let start = start.minutes();
        let end = end.minutes();
        Self {
            start,
            end: if end < start { MINUTES_PER_DAY } else { end },
        }
    }

    pub const fn duration(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Minutes shared with `other`.
    pub fn overlap(self, other: Self) -> u32 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }
}

/// Merges overlapping or touching intervals into a minimal sorted set.
///
/// Empty intervals are dropped.
pub(crate) fn merge(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.iter().filter(|i| !i.is_empty()).copied().collect();
    sorted.sort_by_key(|i| i.start);

    let mut merged: Vec<Interval> = Vec::new();
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
            } else {
                merged.push(interval);
            }
        } else {
            merged.push(interval);
        }
    }
    merged
}

/// Free stretches of `window` not covered by `occupied`.
///
/// `occupied` must be sorted by start. A cursor walks the intervals left to
/// right: whenever the next start lies past the cursor the stretch in between
/// is free, and the cursor then advances to the furthest end seen. Whatever
/// remains between the cursor and the window end is free too.
pub(crate) fn free_intervals(occupied: &[Interval], window: Interval) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut cursor = window.start;

    for interval in occupied {
        if cursor >= window.end {
            break;
        }
        if interval.start > cursor {
            let end = interval.start.min(window.end);
            free.push(Interval::new(cursor, end));
        }
        cursor = cursor.max(interval.end);
    }

    if cursor < window.end {
        free.push(Interval::new(cursor, window.end));
    }
    free
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn iv(start: u32, end: u32) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn backwards_bounds_run_to_end_of_day() {
        let start: ClockTime = "23:00".parse().unwrap();
        let end: ClockTime = "01:00".parse().unwrap();
        assert_eq!(Interval::from_bounds(start, end), iv(1380, 1440));
        assert!(Interval::from_bounds(start, start).is_empty());
    }

    #[test]
    fn overlap_is_shared_minutes() {
        assert_eq!(iv(540, 600).overlap(iv(570, 660)), 30);
        assert_eq!(iv(540, 600).overlap(iv(600, 660)), 0);
        assert_eq!(iv(540, 600).overlap(iv(700, 760)), 0);
    }

    #[test]
    fn merge_joins_overlapping_and_adjacent() {
        let merged = merge(&[iv(660, 720), iv(540, 600), iv(600, 630), iv(700, 800), iv(900, 900)]);
        assert_eq!(merged, vec![iv(540, 630), iv(660, 800)]);
    }

    #[test]
    fn free_intervals_include_leading_between_and_trailing() {
        let free = free_intervals(&[iv(540, 600), iv(660, 720)], iv(420, 1440));
        assert_eq!(free, vec![iv(420, 540), iv(600, 660), iv(720, 1440)]);
    }

    #[test]
    fn free_intervals_respect_cursor_for_nested_entries() {
        // the short entry sits inside the long one and must not reopen a gap
        let free = free_intervals(&[iv(540, 720), iv(600, 630)], iv(540, 780));
        assert_eq!(free, vec![iv(720, 780)]);
    }

    #[test]
    fn free_intervals_clip_to_window() {
        let free = free_intervals(&[iv(300, 500), iv(1300, 1400)], iv(420, 1320));
        assert_eq!(free, vec![iv(500, 1300)]);
        assert!(free_intervals(&[iv(0, 1440)], iv(0, 1440)).is_empty());
    }
}
