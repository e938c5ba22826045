//! Unlogged-time detection.

use crate::interval::{Interval, free_intervals, merge};
use crate::placement::PlacementOptions;
use crate::types::{LoggedEntry, TimeGap};

/// Shortest stretch worth reporting as unlogged.
pub const MIN_GAP_MINUTES: u32 = 30;

/// Finds stretches of the day with no confirmed activity.
///
/// Only confirmed entries with both bounds count. The scan runs from the first
/// logged start to the last logged end, or on to `now` when the day is today,
/// and is clipped to the visible window. Time before the first entry is never
/// reported and neither is anything on a future day. In particular there is no
/// 07:00 floor: a morning that starts at 09:00 yields no 07:00-09:00 gap.
pub fn find_unlogged_gaps(entries: &[LoggedEntry], options: &PlacementOptions) -> Vec<TimeGap> {
    if options.is_future_day {
        return Vec::new();
    }

    let confirmed: Vec<Interval> = entries
        .iter()
        .filter(|entry| entry.is_confirmed())
        .filter_map(LoggedEntry::explicit_times)
        .map(|(start, end)| Interval::from_bounds(start, end))
        .collect();
    let occupied = merge(&confirmed);

    let (Some(first), Some(last)) = (occupied.first(), occupied.last()) else {
        return Vec::new();
    };

    let mut upper = last.end.max(first.start);
    if let Some(now) = options.now.filter(|_| options.is_today) {
        upper = upper.max(now.minutes());
    }

    let visible = options.visible_window();
    let scan = Interval::new(
        first.start.max(visible.start),
        upper.min(visible.end),
    );
    if scan.is_empty() {
        return Vec::new();
    }

    let gaps: Vec<TimeGap> = free_intervals(&occupied, scan)
        .into_iter()
        .filter(|gap| gap.duration() >= MIN_GAP_MINUTES)
        .map(|gap| TimeGap::new(gap.start, gap.end))
        .collect();

    tracing::debug!(
        occupied = occupied.len(),
        scan_start = scan.start,
        scan_end = scan.end,
        gaps = gaps.len(),
        "scanned for unlogged time"
    );
    gaps
}
