//! Parse command: show what the extractor makes of an activity note.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use jt_core::{ClockTime, ParseOutcome, TimeExpression};

use crate::commands::util::format_duration;
use crate::day_file::Present;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Activity description, e.g. "standup at 9am".
    pub text: String,

    /// Current time as HH:MM (defaults to the local clock).
    #[arg(long)]
    pub now: Option<ClockTime>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ParseArgs) -> Result<()> {
    let now = args.now.unwrap_or_else(|| Present::resolve(None, None).now);
    let outcome = jt_core::parse(&args.text, Some(now));

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &outcome)?;
        writeln!(writer)?;
    } else {
        write_outcome(writer, &outcome)?;
    }
    Ok(())
}

fn write_outcome<W: Write>(writer: &mut W, outcome: &ParseOutcome) -> Result<()> {
    writeln!(writer, "cleaned:  {}", outcome.cleaned_text)?;
    if !outcome.has_expression {
        writeln!(writer, "no time expressions found")?;
        return Ok(());
    }

    let show = |time: Option<ClockTime>| time.map_or_else(|| "-".to_string(), |t| t.to_string());
    writeln!(writer, "start:    {}", show(outcome.resolved_start))?;
    writeln!(writer, "end:      {}", show(outcome.resolved_end))?;
    if let Some(minutes) = outcome.resolved_duration_minutes() {
        writeln!(writer, "duration: {}", format_duration(minutes))?;
    }

    writeln!(writer, "expressions:")?;
    for expression in &outcome.expressions {
        writeln!(
            writer,
            "  {}..{}  {}  {:?}  {}",
            expression.span.start,
            expression.span.end,
            expression.kind,
            expression.text,
            describe(expression)
        )?;
    }
    Ok(())
}

fn describe(expression: &TimeExpression) -> String {
    let mut parts = Vec::new();
    if let Some(start) = expression.resolved_start {
        parts.push(format!("start {start}"));
    }
    if let Some(end) = expression.resolved_end {
        parts.push(format!("end {end}"));
    }
    if let Some(minutes) = expression.resolved_duration_minutes {
        parts.push(format_duration(minutes));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn render(text: &str, now: &str, json: bool) -> String {
        let args = ParseArgs {
            text: text.to_string(),
            now: Some(now.parse().unwrap()),
            json,
        };
        let mut output = Vec::new();
        run(&mut output, &args).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_shows_resolved_bounds() {
        assert_snapshot!(render("standup at 9am", "10:15", false), @r#"
        cleaned:  standup
        start:    09:00
        end:      09:15
        duration: 15m
        expressions:
          8..14  absolute_time  "at 9am"  start 09:00
        "#);
    }

    #[test]
    fn parse_lists_every_expression() {
        assert_snapshot!(render("lunch with Sam then coding for 2 hours", "16:00", false), @r#"
        cleaned:  with Sam then coding
        start:    12:00
        end:      13:00
        duration: 1h 0m
        expressions:
          0..5  range  "lunch"  start 12:00, end 13:00, 1h 0m
          27..38  duration  "for 2 hours"  2h 0m
        "#);
    }

    #[test]
    fn parse_without_expressions() {
        assert_snapshot!(render("read a book", "21:00", false), @r"
        cleaned:  read a book
        no time expressions found
        ");
    }

    #[test]
    fn parse_json_output() {
        let output = render("worked for 2 hours", "15:00", true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["resolved_start"], "13:00");
        assert_eq!(value["resolved_end"], "15:00");
        assert_eq!(value["cleaned_text"], "worked");
        assert_eq!(value["expressions"][0]["kind"], "duration");
        assert_eq!(value["expressions"][0]["span"]["start"], 7);
    }
}
