//! Gaps command: report unlogged time for each day of a day file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use jt_core::{ClockTime, TimeGap};
use rayon::prelude::*;
use serde::Serialize;

use crate::Config;
use crate::commands::util::{format_duration, format_span};
use crate::day_file::{DayFile, Present};

#[derive(Debug, Args)]
pub struct GapsArgs {
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

#[derive(Debug, Clone, Serialize)]
struct DayGaps {
    date: NaiveDate,
    unlogged_minutes: u32,
    gaps: Vec<TimeGap>,
}

fn gaps_by_day(file: &DayFile, config: &Config, present: &Present) -> Vec<DayGaps> {
    file.days
        .par_iter()
        .map(|day| {
            let options = present.options_for(day.date, config);
            let gaps = jt_core::find_unlogged_gaps(&day.entries, &options);
            DayGaps {
                date: day.date,
                unlogged_minutes: gaps.iter().map(|gap| gap.duration_minutes).sum(),
                gaps,
            }
        })
        .collect()
}

pub fn run<W: Write>(writer: &mut W, args: &GapsArgs, config: &Config) -> Result<()> {
    let file = DayFile::read(&args.file)?;
    let present = Present::resolve(args.today, args.now);
    let days = gaps_by_day(&file, config, &present);

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &days)?;
        writeln!(writer)?;
        return Ok(());
    }

    for day in &days {
        if day.gaps.is_empty() {
            writeln!(writer, "{}: no unlogged time", day.date)?;
            continue;
        }
        let spans: Vec<String> = day
            .gaps
            .iter()
            .map(|gap| format_span(gap.start(), gap.end()))
            .collect();
        writeln!(
            writer,
            "{}: {} unlogged ({})",
            day.date,
            format_duration(day.unlogged_minutes),
            spans.join(", ")
        )?;
    }
    Ok(())
}
