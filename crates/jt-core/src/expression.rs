//! Matched time expressions and parse outcomes.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;

/// What a matched span describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    /// A length of time ("for 2 hours", "the last 30 minutes").
    Duration,
    /// A single point in time ("at 3", "noon", "after lunch").
    AbsoluteTime,
    /// Both bounds ("9am-10:30am", "lunch").
    Range,
}

impl ExpressionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::AbsoluteTime => "absolute_time",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recognized time phrase in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeExpression {
    /// Half-open byte range into the original text. Spans of the expressions
    /// returned by one parse never overlap.
    pub span: Range<usize>,
    /// The matched text.
    pub text: String,
    pub kind: ExpressionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_start: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_end: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_duration_minutes: Option<u32>,
}

/// The result of parsing one activity description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// The input with every matched span removed and whitespace collapsed.
    pub cleaned_text: String,
    /// Matched expressions ordered by position.
    pub expressions: Vec<TimeExpression>,
    pub resolved_start: Option<ClockTime>,
    pub resolved_end: Option<ClockTime>,
    pub has_expression: bool,
}

impl ParseOutcome {
    /// Length of the resolved activity, when both bounds are known.
    pub fn resolved_duration_minutes(&self) -> Option<u32> {
        let (start, end) = (self.resolved_start?, self.resolved_end?);
        Some(start.minutes_until(end))
    }
}
