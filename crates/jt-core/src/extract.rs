//! Temporal expression extraction.
//!
//! [`detect_expressions`] runs the rule catalogue over a piece of free text and
//! returns every accepted time phrase; [`parse`] additionally folds those
//! phrases into one best-guess start and end for the described activity.
//!
//! # Algorithm Summary
//!
//! 1. Walk the rules in priority order; within a rule take every
//!    non-overlapping match.
//! 2. Accept a match only if its span is free in the occupied-span set and its
//!    resolver succeeds. Rejected candidates are dropped silently.
//! 3. Strip accepted spans from the highest offset down and collapse
//!    whitespace.
//! 4. Walk accepted expressions in textual order: ranges set both bounds,
//!    absolute times set the bound they carry, durations add up.
//! 5. Fill in the missing bound from the total duration, the caller's current
//!    time, or a default length inferred from the activity words.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::clock::ClockTime;
use crate::expression::{ExpressionKind, ParseOutcome, TimeExpression};
use crate::rules::RULES;

/// Length assumed for an activity that has a start but nothing else.
pub const DEFAULT_ACTIVITY_MINUTES: u32 = 60;

/// Activity keywords and the length they suggest, checked in order.
static ACTIVITY_DURATIONS: LazyLock<Vec<(Regex, u32)>> = LazyLock::new(|| {
    [
        (
            r"\b(?:stand-?ups?|huddles?|check-?ins?|coffee|breaks?)\b",
            15,
        ),
        (
            r"\b(?:calls?|phone|syncs?|1:1s?|one-on-ones?|emails?|commute|walk(?:ed|ing)?|chats?)\b",
            30,
        ),
        (
            r"\b(?:workouts?|gym|run(?:ning)?|meetings?|class(?:es)?|lessons?)\b",
            60,
        ),
        (r"\b(?:movies?|films?)\b", 120),
        (
            r"\b(?:deep\s+work|cod(?:e|ing)|programming|writing|stud(?:y|ying)|focus(?:ed|ing)?)\b",
            120,
        ),
    ]
    .into_iter()
    .map(|(pattern, minutes)| {
        let regex = Regex::new(&format!("(?i){pattern}"))
            .unwrap_or_else(|err| panic!("invalid activity pattern: {err}"));
        (regex, minutes)
    })
    .collect()
});

/// Byte spans already claimed by an accepted expression.
#[derive(Debug, Default)]
struct OccupiedSpans(Vec<Range<usize>>);

impl OccupiedSpans {
    fn intersects(&self, span: &Range<usize>) -> bool {
        self.0
            .iter()
            .any(|taken| span.start < taken.end && taken.start < span.end)
    }

    fn claim(&mut self, span: Range<usize>) {
        self.0.push(span);
    }
}

/// Finds every time phrase in `text`.
///
/// Returned expressions are ordered by position and their spans are pairwise
/// disjoint. Text with no recognizable phrase yields an empty list.
pub fn detect_expressions(text: &str) -> Vec<TimeExpression> {
    let mut occupied = OccupiedSpans::default();
    let mut expressions = Vec::new();

    for rule in RULES.iter() {
        for caps in rule.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let span = whole.range();
            if span.is_empty() {
                continue;
            }
            if occupied.intersects(&span) {
                tracing::trace!(rule = rule.name, ?span, "candidate overlaps an accepted span");
                continue;
            }
            if is_embedded_in_number(text, &span) {
                tracing::trace!(rule = rule.name, ?span, "candidate is part of a larger number");
                continue;
            }
            let Some(resolution) = (rule.resolve)(&caps) else {
                tracing::trace!(rule = rule.name, text = whole.as_str(), "resolver rejected candidate");
                continue;
            };

            tracing::trace!(rule = rule.name, text = whole.as_str(), ?resolution, "accepted");
            occupied.claim(span.clone());
            expressions.push(TimeExpression {
                span,
                text: whole.as_str().to_string(),
                kind: resolution.kind,
                resolved_start: resolution.start,
                resolved_end: resolution.end,
                resolved_duration_minutes: resolution.duration_minutes,
            });
        }
    }

    expressions.sort_by_key(|e| e.span.start);
    expressions
}

/// Parses an activity description into expressions, cleaned text and a
/// resolved start/end.
///
/// `current_time` anchors a lone duration: "worked for 2 hours" is taken to
/// have just finished. Without it such an outcome carries no bounds.
pub fn parse(text: &str, current_time: Option<ClockTime>) -> ParseOutcome {
    let expressions = detect_expressions(text);
    let cleaned_text = strip_spans(text, expressions.iter().map(|e| e.span.clone()));

    let mut start: Option<ClockTime> = None;
    let mut end: Option<ClockTime> = None;
    let mut total_minutes: Option<u32> = None;

    for expression in &expressions {
        match expression.kind {
            ExpressionKind::Range => {
                start = expression.resolved_start;
                end = expression.resolved_end;
            }
            ExpressionKind::AbsoluteTime => {
                if let Some(time) = expression.resolved_start {
                    start = Some(time);
                }
                if let Some(time) = expression.resolved_end {
                    end = Some(time);
                }
            }
            ExpressionKind::Duration => {
                let minutes = expression.resolved_duration_minutes.unwrap_or(0);
                total_minutes = Some(total_minutes.unwrap_or(0).saturating_add(minutes));
            }
        }
    }

    match (start, end, total_minutes) {
        (None, None, Some(total)) => {
            if let Some(now) = current_time {
                end = Some(now);
                start = Some(now.sub_minutes(i64::from(total)));
            }
        }
        (Some(from), None, Some(total)) => {
            end = Some(from.add_minutes(i64::from(total)));
        }
        (None, Some(until), Some(total)) => {
            start = Some(until.sub_minutes(i64::from(total)));
        }
        (Some(from), None, None) => {
            let minutes = default_duration_minutes(&cleaned_text);
            end = Some(from.add_minutes(i64::from(minutes)));
        }
        _ => {}
    }

    tracing::debug!(
        text,
        expressions = expressions.len(),
        start = ?start,
        end = ?end,
        "parsed activity text"
    );

    ParseOutcome {
        cleaned_text,
        has_expression: !expressions.is_empty(),
        expressions,
        resolved_start: start,
        resolved_end: end,
    }
}

/// Length suggested by the activity words, or [`DEFAULT_ACTIVITY_MINUTES`].
pub fn default_duration_minutes(activity: &str) -> u32 {
    ACTIVITY_DURATIONS
        .iter()
        .find(|(pattern, _)| pattern.is_match(activity))
        .map_or(DEFAULT_ACTIVITY_MINUTES, |(_, minutes)| *minutes)
}

/// Removes `spans` from `text` and collapses whitespace.
///
/// Spans are removed from the highest offset downward so earlier offsets stay
/// valid while the string shrinks.
fn strip_spans(text: &str, spans: impl IntoIterator<Item = Range<usize>>) -> String {
    let mut spans: Vec<Range<usize>> = spans.into_iter().collect();
    spans.sort_by_key(|span| std::cmp::Reverse(span.start));

    let mut remaining = text.to_string();
    for span in spans {
        remaining.replace_range(span, " ");
    }
    remaining.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the span sits inside a longer numeric token such as a date
/// (`2026-01-15`) or a version (`1.2:30`).
fn is_embedded_in_number(text: &str, span: &Range<usize>) -> bool {
    let is_joiner = |c: char| matches!(c, '-' | '/' | ':' | '.');

    let mut before = text[..span.start].chars().rev();
    let joined_before = matches!(
        (before.next(), before.next()),
        (Some(joiner), Some(digit)) if is_joiner(joiner) && digit.is_ascii_digit()
    );

    let mut after = text[span.end..].chars();
    let joined_after = matches!(
        (after.next(), after.next()),
        (Some(joiner), Some(digit)) if joiner != '.' && is_joiner(joiner) && digit.is_ascii_digit()
    );

    joined_before || joined_after
}
