//! Place command: lay out each day of a day file on the timeline.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use jt_core::{ClockTime, DayLayout, ImportedEvent, PlacedEntry};
use rayon::prelude::*;
use serde::Serialize;

use crate::Config;
use crate::commands::util::{format_duration, format_span};
use crate::day_file::{DayFile, DayRecord, Present};

#[derive(Debug, Args)]
pub struct PlaceArgs {
    /// Day file to read, or `-` for stdin.
    pub file: PathBuf,

    /// Current time as HH:MM (defaults to the local clock).
    #[arg(long)]
    pub now: Option<ClockTime>,

    /// Today's date as YYYY-MM-DD (defaults to the local date).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One day's layout, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub day: &'static str,
    #[serde(flatten)]
    pub layout: DayLayout,
}

/// Lays out every day independently on the rayon pool.
pub fn layout_days(file: &DayFile, config: &Config, present: &Present) -> Vec<DayView> {
    file.days
        .par_iter()
        .map(|day| {
            let options = present.options_for(day.date, config);
            DayView {
                date: day.date,
                day: present.classify(day.date).as_str(),
                layout: jt_core::place(&day.entries, &day.events, &options),
            }
        })
        .collect()
}

pub fn run<W: Write>(writer: &mut W, args: &PlaceArgs, config: &Config) -> Result<()> {
    let file = DayFile::read(&args.file)?;
    let present = Present::resolve(args.today, args.now);
    let views = layout_days(&file, config, &present);
    tracing::debug!(days = views.len(), "laid out day file");

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &views)?;
        writeln!(writer)?;
        return Ok(());
    }

    for (index, (day, view)) in file.days.iter().zip(&views).enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        write_day(writer, day, view)?;
    }
    Ok(())
}

fn write_day<W: Write>(writer: &mut W, day: &DayRecord, view: &DayView) -> Result<()> {
    writeln!(writer, "{} ({})", view.date, view.day)?;
    let layout = &view.layout;

    if layout.placed_entries.is_empty() && day.events.is_empty() {
        writeln!(writer, "  nothing logged")?;
        return Ok(());
    }

    if !layout.placed_entries.is_empty() {
        writeln!(writer, "  entries:")?;
        for placed in &layout.placed_entries {
            writeln!(writer, "    {}", describe_entry(placed, layout))?;
        }
    }

    if !day.events.is_empty() {
        writeln!(writer, "  events:")?;
        for event in &day.events {
            writeln!(writer, "    {}", describe_event(event, layout))?;
        }
    }

    if !layout.gaps.is_empty() {
        writeln!(writer, "  unlogged:")?;
        for gap in &layout.gaps {
            writeln!(
                writer,
                "    {} ({})",
                format_span(gap.start(), gap.end()),
                format_duration(gap.duration_minutes)
            )?;
        }
    }
    Ok(())
}

fn describe_entry(placed: &PlacedEntry, layout: &DayLayout) -> String {
    let mut tags = vec![format_duration(placed.entry.duration_minutes)];
    if placed.is_estimated {
        tags.push("estimated".to_string());
    }
    if layout.overlapping_entry_ids.contains(&placed.entry.id) {
        tags.push("overlaps".to_string());
    }
    format!(
        "{}  {} ({})",
        format_span(placed.placed_start, placed.placed_end),
        placed.entry.activity,
        tags.join(", ")
    )
}

fn describe_event(event: &ImportedEvent, layout: &DayLayout) -> String {
    let when = match (event.all_day, event.time_bounds()) {
        (true, _) => "all day".to_string(),
        (false, Some((start, end))) => format_span(start, end),
        (false, None) => "no time".to_string(),
    };
    let tag = if layout.hidden_event_ids.contains(&event.id) {
        " (hidden)"
    } else if layout.overlapping_event_ids.contains(&event.id) {
        " (overlaps)"
    } else {
        ""
    };
    format!("{when}  {}{tag}", event.title)
}
