//! Day files: the logged entries and imported events for one or more days.
//!
//! ```json
//! {"days": [{"date": "2026-10-18", "entries": [...], "events": [...]}]}
//! ```

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use jt_core::{ClockTime, ImportedEvent, LoggedEntry, PlacementOptions};
use serde::{Deserialize, Serialize};

use crate::Config;

/// A parsed day file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayFile {
    pub days: Vec<DayRecord>,
}

/// Everything known about one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<LoggedEntry>,
    #[serde(default)]
    pub events: Vec<ImportedEvent>,
}

impl DayFile {
    /// Reads a day file from `path`, or from stdin when `path` is `-`.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read day file from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        };
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let mut file: Self = serde_json::from_str(contents).context("invalid day file")?;
        for day in &mut file.days {
            day.drop_foreign_entries();
        }
        Ok(file)
    }
}

impl DayRecord {
    /// Removes entries dated for a different day than the record.
    fn drop_foreign_entries(&mut self) {
        let date = self.date;
        self.entries.retain(|entry| {
            let matches = entry.date == date;
            if !matches {
                tracing::warn!(entry = %entry.id, entry_date = %entry.date, %date, "skipping entry filed under another day");
            }
            matches
        });
    }
}

/// Where a day sits relative to the caller's present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Past,
    Today,
    Future,
}

impl DayKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Today => "today",
            Self::Future => "future",
        }
    }
}

/// The caller's present: today's date and the current wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Present {
    pub today: NaiveDate,
    pub now: ClockTime,
}

impl Present {
    /// The local date and time, with either part overridable.
    pub fn resolve(today: Option<NaiveDate>, now: Option<ClockTime>) -> Self {
        let local = Local::now().naive_local();
        Self {
            today: today.unwrap_or_else(|| local.date()),
            now: now.unwrap_or_else(|| ClockTime::from(local.time())),
        }
    }

    pub fn classify(&self, date: NaiveDate) -> DayKind {
        match date.cmp(&self.today) {
            std::cmp::Ordering::Less => DayKind::Past,
            std::cmp::Ordering::Equal => DayKind::Today,
            std::cmp::Ordering::Greater => DayKind::Future,
        }
    }

    /// Placement options for `date` under `config`.
    pub fn options_for(&self, date: NaiveDate, config: &Config) -> PlacementOptions {
        let kind = self.classify(date);
        config.placement_options(kind == DayKind::Today, kind == DayKind::Future, Some(self.now))
    }
}
