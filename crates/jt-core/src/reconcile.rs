//! Imported calendar events against logged entries.
//!
//! An imported event that a confirmed entry already covers is hidden so the
//! same meeting is not drawn twice. Visible events that still intersect a
//! confirmed entry are flagged, together with the entry, as overlapping.

use std::collections::BTreeSet;

use crate::interval::Interval;
use crate::types::{EntryId, EventId, ImportedEvent, LoggedEntry};

/// Outcome of reconciling one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub hidden_event_ids: BTreeSet<EventId>,
    pub overlapping_entry_ids: BTreeSet<EntryId>,
    pub overlapping_event_ids: BTreeSet<EventId>,
}

/// Hides covered events and tags remaining overlaps.
///
/// An event is covered when a single confirmed entry overlaps at least half
/// of the event's own length. All-day events, events missing a bound and
/// zero-length events are never hidden and never overlap anything.
pub fn reconcile_events(entries: &[LoggedEntry], events: &[ImportedEvent]) -> Reconciliation {
    let confirmed: Vec<(&EntryId, Interval)> = entries
        .iter()
        .filter(|entry| entry.is_confirmed())
        .filter_map(|entry| {
            let (start, end) = entry.explicit_times()?;
            Some((&entry.id, Interval::from_bounds(start, end)))
        })
        .collect();

    let mut result = Reconciliation::default();

    for event in events {
        let Some((start, end)) = event.time_bounds() else {
            continue;
        };
        let span = Interval::from_bounds(start, end);
        if span.is_empty() {
            continue;
        }

        let covered = confirmed
            .iter()
            .any(|(_, entry)| entry.overlap(span) * 2 >= span.duration());
        if covered {
            tracing::debug!(event = %event.id, title = %event.title, "hiding event covered by a logged entry");
            result.hidden_event_ids.insert(event.id.clone());
            continue;
        }

        for (entry_id, entry) in &confirmed {
            if entry.overlap(span) > 0 {
                result.overlapping_entry_ids.insert((*entry_id).clone());
                result.overlapping_event_ids.insert(event.id.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::ClockTime;
    use crate::types::EntryStatus;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn entry(id: &str, start: &str, end: &str, status: EntryStatus) -> LoggedEntry {
        LoggedEntry {
            id: EntryId::new(id).unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            activity: "meeting".into(),
            category: Some("work".into()),
            duration_minutes: t(start).minutes_until(t(end)),
            start_time: Some(t(start)),
            end_time: Some(t(end)),
            status,
        }
    }

    fn event(id: &str, start: &str, end: &str) -> ImportedEvent {
        ImportedEvent {
            id: EventId::new(id).unwrap(),
            title: format!("event {id}"),
            start_time: Some(t(start)),
            end_time: Some(t(end)),
            all_day: false,
        }
    }

    fn ids<T: AsRef<str>>(set: &BTreeSet<T>) -> Vec<&str> {
        set.iter().map(T::as_ref).collect()
    }

    #[test]
    fn half_coverage_hides_event() {
        let entries = [entry("e1", "10:00", "10:30", EntryStatus::Confirmed)];
        let events = [event("exact", "10:00", "11:00"), event("less", "10:15", "11:30")];
        let result = reconcile_events(&entries, &events);

        assert_eq!(ids(&result.hidden_event_ids), ["exact"]);
        assert_eq!(ids(&result.overlapping_event_ids), ["less"]);
        assert_eq!(ids(&result.overlapping_entry_ids), ["e1"]);
    }

    #[test]
    fn hidden_events_are_not_overlapping() {
        let entries = [entry("e1", "09:00", "12:00", EntryStatus::Confirmed)];
        let events = [event("standup", "09:30", "09:45")];
        let result = reconcile_events(&entries, &events);

        assert_eq!(ids(&result.hidden_event_ids), ["standup"]);
        assert!(result.overlapping_event_ids.is_empty());
        assert!(result.overlapping_entry_ids.is_empty());
    }

    #[test]
    fn pending_entries_do_not_reconcile() {
        let entries = [entry("e1", "10:00", "11:00", EntryStatus::Pending)];
        let events = [event("sync", "10:00", "11:00")];
        assert_eq!(reconcile_events(&entries, &events), Reconciliation::default());
    }

    #[test]
    fn all_day_and_unbounded_events_are_ignored() {
        let entries = [entry("e1", "00:00", "24:00", EntryStatus::Confirmed)];
        let mut all_day = event("offsite", "00:00", "24:00");
        all_day.all_day = true;
        let mut open = event("open", "09:00", "10:00");
        open.end_time = None;
        let empty = event("empty", "09:00", "09:00");

        let result = reconcile_events(&entries, &[all_day, open, empty]);
        assert_eq!(result, Reconciliation::default());
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let entries = [entry("e1", "09:00", "10:00", EntryStatus::Confirmed)];
        let events = [event("next", "10:00", "11:00")];
        assert_eq!(reconcile_events(&entries, &events), Reconciliation::default());
    }

    #[test]
    fn every_intersecting_entry_is_tagged() {
        let entries = [
            entry("a", "09:00", "09:20", EntryStatus::Confirmed),
            entry("b", "10:40", "11:30", EntryStatus::Confirmed),
            entry("c", "12:00", "13:00", EntryStatus::Confirmed),
        ];
        let events = [event("workshop", "09:00", "11:00")];
        let result = reconcile_events(&entries, &events);

        assert!(result.hidden_event_ids.is_empty());
        assert_eq!(ids(&result.overlapping_entry_ids), ["a", "b"]);
        assert_eq!(ids(&result.overlapping_event_ids), ["workshop"]);
    }
}
