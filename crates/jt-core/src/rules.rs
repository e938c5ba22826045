//! The ordered rule catalogue behind the extractor.
//!
//! Each [`Rule`] pairs a case-insensitive pattern with a resolver that turns a
//! match into clock times or a duration. [`RULES`] lists them from most
//! semantically specific to most generic; the extractor walks the list top to
//! bottom and a later rule can only claim text no earlier rule has claimed.
//!
//! | # | rule                | example                         | kind          |
//! |---|---------------------|---------------------------------|---------------|
//! | 1 | relative duration   | "the last 2 hours"              | duration      |
//! | 2 | day keyword         | "at noon", "until midnight"     | absolute time |
//! | 3 | part of day         | "this morning", "late night"    | absolute time |
//! | 4 | meal relative       | "after lunch", "pre-dinner"     | absolute time |
//! | 5 | meal                | "lunch"                         | range         |
//! | 6 | range (between)     | "between 1 and 3"               | range         |
//! | 7 | range               | "9am-10:30am", "3 to 5"         | range         |
//! | 8 | `for` duration      | "for an hour and a half"        | duration      |
//! | 9 | bare duration       | "half an hour", "about 20 min"  | duration      |
//! | 10| anchored time       | "at 3", "until 5:30"            | absolute time |
//! | 11| standalone meridiem | "2pm", "10:30 a.m."             | absolute time |
//! | 12| standalone colon    | "14:45"                         | absolute time |

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::clock::{ClockTime, MINUTES_PER_DAY};
use crate::expression::ExpressionKind;

/// What a resolver makes of one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub kind: ExpressionKind,
    pub start: Option<ClockTime>,
    pub end: Option<ClockTime>,
    pub duration_minutes: Option<u32>,
}

impl Resolution {
    const fn duration(minutes: u32) -> Self {
        Self {
            kind: ExpressionKind::Duration,
            start: None,
            end: None,
            duration_minutes: Some(minutes),
        }
    }

    const fn starting_at(time: ClockTime) -> Self {
        Self {
            kind: ExpressionKind::AbsoluteTime,
            start: Some(time),
            end: None,
            duration_minutes: None,
        }
    }

    const fn ending_at(time: ClockTime) -> Self {
        Self {
            kind: ExpressionKind::AbsoluteTime,
            start: None,
            end: Some(time),
            duration_minutes: None,
        }
    }

    const fn range(start: ClockTime, end: ClockTime) -> Self {
        Self {
            kind: ExpressionKind::Range,
            start: Some(start),
            end: Some(end),
            duration_minutes: Some(start.minutes_until(end)),
        }
    }
}

/// A matcher and the resolver for its matches.
pub(crate) struct Rule {
    pub name: &'static str,
    pub pattern: Regex,
    pub resolve: fn(&Captures<'_>) -> Option<Resolution>,
}

impl Rule {
    fn new(
        name: &'static str,
        pattern: &str,
        resolve: fn(&Captures<'_>) -> Option<Resolution>,
    ) -> Self {
        let pattern = Regex::new(&format!("(?i){pattern}"))
            .unwrap_or_else(|err| panic!("rule {name} has an invalid pattern: {err}"));
        Self {
            name,
            pattern,
            resolve,
        }
    }
}

/// Numeric quantity: "2", "1.5".
const NUMBER: &str = r"\d+(?:\.\d+)?";

/// Spelled-out quantity: "an", "a couple of", "forty five".
const QUANTITY_WORD: &str = r"an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|fifteen|twenty|thirty|forty[- ]five|forty|fifty|sixty|ninety|half|(?:a\s+)?couple(?:\s+of)?|(?:a\s+)?few|several";

/// Units a number may carry; "h" and "m" only ever follow digits.
const UNIT: &str = r"hours?|hrs?|h|minutes?|mins?|m";

/// Units a spelled-out quantity may carry.
const UNIT_WORD: &str = r"hours?|hrs?|minutes?|mins?";

const MEAL: &str = r"breakfast|brunch|lunch(?:time)?|dinner|supper";

/// A clock reading such as "3", "9:30", "10am" or "7 p.m." whose capture
/// groups are suffixed with `side` so two readings can share one pattern.
fn clock(side: &str) -> String {
    format!(
        r"\b(?P<h{side}>\d{{1,2}})(?::(?P<m{side}>\d{{2}}))?(?:\s*(?P<p{side}>[ap])(?:m\b|\.m\.)|\b)"
    )
}

/// A spoken or written length of time, with an optional approximation word.
fn duration_phrase() -> String {
    format!(
        r"(?:(?:\b(?:about|around|roughly|approximately|approx\.?|almost|nearly|over|under)|~)\s*)?\b(?:(?P<half>half\s+an?\s+hour|a\s+half\s+hour|half\s+hour)\b|(?P<quarter>(?:a\s+)?quarter\s+(?:of\s+)?an?\s+hour|(?:a\s+)?quarter\s+hour)\b|(?P<ch>\d{{1,2}})\s*h\s*(?P<cm>\d{{1,2}})\s*m(?:ins?|inutes?)?\b|(?:(?P<qty>{NUMBER})(?P<half1>\s+and\s+a\s+half)?\s*(?P<unit>{UNIT})|(?P<wqty>{QUANTITY_WORD})(?P<whalf1>\s+and\s+a\s+half)?\s+(?P<wunit>{UNIT_WORD}))\b(?P<half2>\s+and\s+a\s+half)?(?:,?\s+(?:and\s+)?(?P<extra>\d{{1,2}})\s*(?:minutes?|mins?|m)\b)?)"
    )
}

/// The catalogue, in priority order.
pub(crate) static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "relative_duration",
            &format!(
                r"\b(?:(?:in|over|during|for)\s+)?(?:the\s+)?(?:last|past)\s+(?:(?P<qty>{NUMBER}|{QUANTITY_WORD})\s*)?(?P<unit>hours?|hrs?|minutes?|mins?)\b"
            ),
            resolve_relative_duration,
        ),
        Rule::new(
            "day_keyword",
            r"\b(?:(?P<prep>at|around|about|by|until|till|before|after|from|since)\s+)?(?P<kw>noon|midday|midnight)\b",
            resolve_day_keyword,
        ),
        Rule::new(
            "part_of_day",
            r"\b(?:(?P<q1>early|late)\s+)?(?:(?P<anchor>this|at|in\s+the|last|yesterday|tomorrow)\s+)?(?:(?P<q2>early|late)\s+)?(?P<part>morning|afternoon|evening|night|tonight)\b",
            resolve_part_of_day,
        ),
        Rule::new(
            "meal_relative",
            &format!(
                r"\b(?P<rel>before|after|since|until|till|post|pre)\s*-?\s*(?:(?:my|the|our)\s+)?(?P<meal>{MEAL})\b"
            ),
            resolve_meal_relative,
        ),
        Rule::new("meal", &format!(r"\b(?P<meal>{MEAL})\b"), resolve_meal),
        Rule::new(
            "range_between",
            &format!(
                r"\bbetween\s+{}\s*(?:and|-|–|to)\s*{}",
                clock("1"),
                clock("2")
            ),
            resolve_range,
        ),
        Rule::new(
            "range",
            &format!(
                r"(?:\bfrom\s+)?{}\s*(?:-|–|—|\bto\b|\buntil\b|\btill\b|\bthrough\b|\bthru\b)\s*{}",
                clock("1"),
                clock("2")
            ),
            resolve_range,
        ),
        Rule::new(
            "for_duration",
            &format!(r"\bfor\s+{}", duration_phrase()),
            resolve_duration_phrase,
        ),
        Rule::new("bare_duration", &duration_phrase(), resolve_duration_phrase),
        Rule::new(
            "anchored_time",
            &format!(
                r"(?:\b(?P<prep>at|around|about|by|since|until|till|before|after|from|starting(?:\s+at)?|ending(?:\s+at)?)\s+|@\s*){}",
                clock("")
            ),
            resolve_anchored_time,
        ),
        Rule::new(
            "standalone_meridiem",
            r"\b(?P<h>\d{1,2})(?::(?P<m>\d{2}))?\s*(?P<p>[ap])(?:m\b|\.m\.)",
            resolve_standalone,
        ),
        Rule::new(
            "standalone_colon",
            r"\b(?P<h>\d{1,2}):(?P<m>\d{2})\b",
            resolve_standalone,
        ),
    ]
});

// ========== Clock readings ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    const fn flipped(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

/// Meridiem for a bare hour with no am/pm: 1-7 read as afternoon or evening,
/// 8-11 as morning, 12 as noon.
const fn infer_meridiem(hour: u32) -> Meridiem {
    match hour {
        8..=11 => Meridiem::Am,
        _ => Meridiem::Pm,
    }
}

/// One clock reading taken apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockParts {
    hour: u32,
    minute: u32,
    meridiem: Option<Meridiem>,
    /// Written as a 24-hour value: hour 0, hour above 12, or zero-padded.
    twenty_four_hour: bool,
}

impl ClockParts {
    fn from_captures(caps: &Captures<'_>, side: &str) -> Option<Self> {
        let hour_text = caps.name(&format!("h{side}"))?.as_str();
        let hour: u32 = hour_text.parse().ok()?;
        let minute: u32 = match caps.name(&format!("m{side}")) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let meridiem = caps
            .name(&format!("p{side}"))
            .map(|p| match p.as_str() {
                "a" | "A" => Meridiem::Am,
                _ => Meridiem::Pm,
            });

        if minute > 59 {
            return None;
        }
        let zero_padded = hour_text.len() == 2 && hour_text.starts_with('0');
        match meridiem {
            Some(_) if hour == 0 || hour > 12 => None,
            None if hour > 24 => None,
            _ => Some(Self {
                hour,
                minute,
                meridiem,
                twenty_four_hour: meridiem.is_none() && (hour == 0 || hour > 12 || zero_padded),
            }),
        }
    }

    const fn is_ambiguous(self) -> bool {
        self.meridiem.is_none() && !self.twenty_four_hour
    }

    fn with_meridiem(self, meridiem: Meridiem) -> Option<ClockTime> {
        let hour = match meridiem {
            Meridiem::Am => self.hour % 12,
            Meridiem::Pm => self.hour % 12 + 12,
        };
        ClockTime::new(hour, self.minute).ok()
    }

    /// The reading on its own, inferring a missing meridiem from the hour.
    fn resolve(self) -> Option<ClockTime> {
        if let Some(meridiem) = self.meridiem {
            return self.with_meridiem(meridiem);
        }
        if self.twenty_four_hour {
            return ClockTime::new(self.hour, self.minute).ok();
        }
        self.with_meridiem(infer_meridiem(self.hour))
    }

    /// The earliest 12-hour reading strictly after `start`, falling back to
    /// the standalone reading.
    fn first_after(self, start: ClockTime) -> Option<ClockTime> {
        [Meridiem::Am, Meridiem::Pm]
            .into_iter()
            .filter_map(|meridiem| self.with_meridiem(meridiem))
            .find(|candidate| *candidate > start)
            .or_else(|| self.resolve())
    }
}

// ========== Quantities ==========

/// Value of a quantity word or number.
fn quantity_value(raw: &str) -> Option<f64> {
    let normalized = raw
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    let word = normalized
        .strip_prefix("a ")
        .unwrap_or(&normalized)
        .trim_end_matches(" of");

    let value = match word {
        "a" | "an" | "one" => 1.0,
        "two" | "couple" => 2.0,
        "three" | "few" | "several" => 3.0,
        "four" => 4.0,
        "five" => 5.0,
        "six" => 6.0,
        "seven" => 7.0,
        "eight" => 8.0,
        "nine" => 9.0,
        "ten" => 10.0,
        "eleven" => 11.0,
        "twelve" => 12.0,
        "fifteen" => 15.0,
        "twenty" => 20.0,
        "thirty" => 30.0,
        "forty" => 40.0,
        "forty five" | "forty-five" => 45.0,
        "fifty" => 50.0,
        "sixty" => 60.0,
        "ninety" => 90.0,
        "half" => 0.5,
        other => other.parse().ok()?,
    };
    Some(value)
}

fn unit_minutes(unit: &str) -> f64 {
    if unit.to_ascii_lowercase().starts_with('h') {
        60.0
    } else {
        1.0
    }
}

/// Rounds to whole minutes, rejecting anything longer than a day.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(minutes: f64) -> Option<u32> {
    if !minutes.is_finite() || minutes < 0.0 || minutes > f64::from(MINUTES_PER_DAY) {
        return None;
    }
    Some(minutes.round() as u32)
}

// ========== Resolvers ==========

fn lowercase(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_ascii_lowercase())
}

fn resolve_relative_duration(caps: &Captures<'_>) -> Option<Resolution> {
    let quantity = match caps.name("qty") {
        Some(q) => quantity_value(q.as_str())?,
        None => 1.0,
    };
    let unit = unit_minutes(caps.name("unit")?.as_str());
    whole_minutes(quantity * unit).map(Resolution::duration)
}

fn resolve_day_keyword(caps: &Captures<'_>) -> Option<Resolution> {
    let time = match lowercase(caps, "kw")?.as_str() {
        "midnight" => ClockTime::MIDNIGHT,
        _ => ClockTime::NOON,
    };
    match lowercase(caps, "prep").as_deref() {
        Some("by" | "until" | "till" | "before") => Some(Resolution::ending_at(time)),
        _ => Some(Resolution::starting_at(time)),
    }
}

fn resolve_part_of_day(caps: &Captures<'_>) -> Option<Resolution> {
    let part = lowercase(caps, "part")?;
    let modifier = lowercase(caps, "q1").or_else(|| lowercase(caps, "q2"));
    let anchored = caps.name("anchor").is_some();

    // a bare "night" says too little ("night shift", "good night")
    if part == "night" && modifier.is_none() && !anchored {
        return None;
    }

    let hour = match (part.as_str(), modifier.as_deref()) {
        ("morning", Some("early")) => 7,
        ("morning", Some("late")) => 11,
        ("morning", _) => 9,
        ("afternoon", Some("early")) => 13,
        ("afternoon", Some("late")) => 16,
        ("afternoon", _) => 14,
        ("evening", Some("early")) => 17,
        ("evening", Some("late")) | ("night", None | Some("early")) => 21,
        ("evening", _) => 18,
        ("night", Some(_)) => 23,
        _ => 20,
    };
    ClockTime::new(hour, 0).ok().map(Resolution::starting_at)
}

/// Conventional window for a meal.
fn meal_window(meal: &str) -> (ClockTime, ClockTime) {
    let (start, end) = match meal {
        "breakfast" => (8, 9),
        "brunch" => (11, 12),
        "dinner" | "supper" => (18, 19),
        _ => (12, 13),
    };
    (
        ClockTime::saturating_from_minutes(start * 60),
        ClockTime::saturating_from_minutes(end * 60),
    )
}

fn resolve_meal_relative(caps: &Captures<'_>) -> Option<Resolution> {
    let (start, end) = meal_window(&lowercase(caps, "meal")?);
    match lowercase(caps, "rel")?.as_str() {
        "before" | "until" | "till" | "pre" => Some(Resolution::ending_at(start)),
        _ => Some(Resolution::starting_at(end)),
    }
}

fn resolve_meal(caps: &Captures<'_>) -> Option<Resolution> {
    let (start, end) = meal_window(&lowercase(caps, "meal")?);
    Some(Resolution::range(start, end))
}

fn resolve_range(caps: &Captures<'_>) -> Option<Resolution> {
    let first = ClockParts::from_captures(caps, "1")?;
    let second = ClockParts::from_captures(caps, "2")?;

    let (start, end) = match (first.meridiem, second.meridiem) {
        // "11 to 1pm": the start borrows the end's meridiem unless that puts
        // it after the end
        (None, Some(meridiem)) if first.is_ambiguous() => {
            let end = second.resolve()?;
            let start = first.with_meridiem(meridiem)?;
            if start > end {
                (first.with_meridiem(meridiem.flipped())?, end)
            } else {
                (start, end)
            }
        }
        // "11am-1": the end borrows the start's meridiem unless that puts it
        // before the start
        (Some(meridiem), None) if second.is_ambiguous() => {
            let start = first.resolve()?;
            let end = second.with_meridiem(meridiem)?;
            if end < start {
                (start, second.with_meridiem(meridiem.flipped())?)
            } else {
                (start, end)
            }
        }
        (None, None) if second.is_ambiguous() => {
            let start = first.resolve()?;
            (start, second.first_after(start)?)
        }
        _ => (first.resolve()?, second.resolve()?),
    };
    Some(Resolution::range(start, end))
}

fn resolve_duration_phrase(caps: &Captures<'_>) -> Option<Resolution> {
    if caps.name("half").is_some() {
        return Some(Resolution::duration(30));
    }
    if caps.name("quarter").is_some() {
        return Some(Resolution::duration(15));
    }
    if let (Some(hours), Some(minutes)) = (caps.name("ch"), caps.name("cm")) {
        let hours: u32 = hours.as_str().parse().ok()?;
        let minutes: u32 = minutes.as_str().parse().ok()?;
        if minutes > 59 {
            return None;
        }
        return whole_minutes(f64::from(hours * 60 + minutes)).map(Resolution::duration);
    }

    let qty = caps.name("qty").or_else(|| caps.name("wqty"))?;
    let mut quantity = quantity_value(qty.as_str())?;
    if ["half1", "whalf1", "half2"]
        .iter()
        .any(|name| caps.name(name).is_some())
    {
        quantity += 0.5;
    }
    let unit = unit_minutes(caps.name("unit").or_else(|| caps.name("wunit"))?.as_str());
    let mut minutes = quantity * unit;

    if let Some(extra) = caps.name("extra") {
        let extra: u32 = extra.as_str().parse().ok()?;
        // "2 hours 15 minutes" only; "5 minutes 10 minutes" is not a duration
        if unit < 60.0 || extra > 59 {
            return None;
        }
        minutes += f64::from(extra);
    }
    whole_minutes(minutes).map(Resolution::duration)
}

fn resolve_anchored_time(caps: &Captures<'_>) -> Option<Resolution> {
    let time = ClockParts::from_captures(caps, "")?.resolve()?;
    let prep = lowercase(caps, "prep").unwrap_or_default();
    if ["by", "until", "till", "before", "ending"]
        .iter()
        .any(|word| prep.starts_with(word))
    {
        Some(Resolution::ending_at(time))
    } else {
        Some(Resolution::starting_at(time))
    }
}

fn resolve_standalone(caps: &Captures<'_>) -> Option<Resolution> {
    let time = ClockParts::from_captures(caps, "")?.resolve()?;
    Some(Resolution::starting_at(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    /// Runs a single rule against `text` and returns its first resolution.
    fn first(rule: &str, text: &str) -> Option<Resolution> {
        let rule = RULES
            .iter()
            .find(|r| r.name == rule)
            .unwrap_or_else(|| panic!("no rule named {rule}"));
        let caps = rule.pattern.captures(text)?;
        (rule.resolve)(&caps)
    }

    fn range_of(text: &str) -> (ClockTime, ClockTime) {
        let resolution = first("range", text).unwrap_or_else(|| panic!("{text:?} is a range"));
        (resolution.start.unwrap(), resolution.end.unwrap())
    }

    #[test]
    fn catalogue_compiles_in_priority_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"relative_duration"));
        assert_eq!(names.last(), Some(&"standalone_colon"));
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn bare_hours_follow_working_day_bias() {
        let cases = [(1, 13), (5, 17), (7, 19), (8, 8), (11, 11), (12, 12)];
        for (hour, expected) in cases {
            let resolution = first("anchored_time", &format!("at {hour}")).unwrap();
            assert_eq!(resolution.start.unwrap().hour(), expected, "at {hour}");
        }
    }

    #[test]
    fn explicit_meridiem_wins_over_bias() {
        assert_eq!(first("anchored_time", "at 6am").unwrap().start, Some(t("06:00")));
        assert_eq!(first("anchored_time", "at 9 p.m.").unwrap().start, Some(t("21:00")));
        assert_eq!(first("anchored_time", "at 12am").unwrap().start, Some(t("00:00")));
        assert_eq!(first("anchored_time", "at 12pm").unwrap().start, Some(t("12:00")));
    }

    #[test]
    fn twenty_four_hour_readings_are_literal() {
        assert_eq!(first("standalone_colon", "14:45").unwrap().start, Some(t("14:45")));
        assert_eq!(first("standalone_colon", "05:30").unwrap().start, Some(t("05:30")));
        assert_eq!(first("anchored_time", "at 0:15").unwrap().start, Some(t("00:15")));
    }

    #[test]
    fn impossible_readings_are_rejected() {
        assert!(first("standalone_meridiem", "13pm").is_none());
        assert!(first("standalone_colon", "9:75").is_none());
        assert!(first("anchored_time", "at 31").is_none());
    }

    #[test]
    fn until_and_by_set_the_end() {
        let resolution = first("anchored_time", "until 5:30").unwrap();
        assert_eq!(resolution.start, None);
        assert_eq!(resolution.end, Some(t("17:30")));
        assert_eq!(first("anchored_time", "by 10am").unwrap().end, Some(t("10:00")));
        assert_eq!(first("anchored_time", "since 8").unwrap().start, Some(t("08:00")));
    }

    #[test]
    fn ranges_infer_meridiem_from_either_side() {
        assert_eq!(range_of("3 to 5"), (t("15:00"), t("17:00")));
        assert_eq!(range_of("9 to 5"), (t("09:00"), t("17:00")));
        assert_eq!(range_of("7 to 9"), (t("19:00"), t("21:00")));
        assert_eq!(range_of("12 to 1"), (t("12:00"), t("13:00")));
        assert_eq!(range_of("9am-10:30am"), (t("09:00"), t("10:30")));
        assert_eq!(range_of("9-10:30am"), (t("09:00"), t("10:30")));
        assert_eq!(range_of("11 to 1pm"), (t("11:00"), t("13:00")));
        assert_eq!(range_of("11am-1"), (t("11:00"), t("13:00")));
        assert_eq!(range_of("10pm-2"), (t("22:00"), t("02:00")));
        assert_eq!(range_of("from 2 until 4pm"), (t("14:00"), t("16:00")));
        assert_eq!(range_of("13:00 – 14:30"), (t("13:00"), t("14:30")));
    }

    #[test]
    fn between_ranges() {
        let resolution = first("range_between", "between 1 and 3").unwrap();
        assert_eq!(resolution.start, Some(t("13:00")));
        assert_eq!(resolution.end, Some(t("15:00")));
        assert_eq!(resolution.duration_minutes, Some(120));
    }

    #[test]
    fn duration_phrases() {
        let minutes = |text: &str| {
            first("bare_duration", text)
                .and_then(|r| r.duration_minutes)
                .unwrap_or_else(|| panic!("{text:?} is a duration"))
        };
        assert_eq!(minutes("half an hour"), 30);
        assert_eq!(minutes("a quarter of an hour"), 15);
        assert_eq!(minutes("about 20 minutes"), 20);
        assert_eq!(minutes("~45 min"), 45);
        assert_eq!(minutes("an hour and a half"), 90);
        assert_eq!(minutes("2 and a half hours"), 150);
        assert_eq!(minutes("1.5 hours"), 90);
        assert_eq!(minutes("a couple of hours"), 120);
        assert_eq!(minutes("a few minutes"), 3);
        assert_eq!(minutes("forty five minutes"), 45);
        assert_eq!(minutes("1h30m"), 90);
        assert_eq!(minutes("2 hours and 15 minutes"), 135);
        assert_eq!(minutes("90min"), 90);
    }

    #[test]
    fn single_letter_units_need_digits() {
        assert!(first("bare_duration", "I am tired").is_none());
        assert!(first("bare_duration", "a m").is_none());
        assert!(first("bare_duration", "an h").is_none());
        assert_eq!(first("bare_duration", "45 m").unwrap().duration_minutes, Some(45));
        assert_eq!(first("bare_duration", "2h").unwrap().duration_minutes, Some(120));
    }

    #[test]
    fn durations_longer_than_a_day_are_rejected() {
        assert!(first("bare_duration", "30 hours").is_none());
    }

    #[test]
    fn relative_durations_default_to_one_unit() {
        let minutes = |text: &str| first("relative_duration", text).and_then(|r| r.duration_minutes);
        assert_eq!(minutes("the last hour"), Some(60));
        assert_eq!(minutes("for the past 2 hours"), Some(120));
        assert_eq!(minutes("last 30 minutes"), Some(30));
        assert_eq!(minutes("the last half hour"), Some(30));
        assert_eq!(minutes("last night"), None);
    }

    #[test]
    fn day_keywords() {
        assert_eq!(first("day_keyword", "at noon").unwrap().start, Some(ClockTime::NOON));
        assert_eq!(
            first("day_keyword", "until midnight").unwrap().end,
            Some(ClockTime::MIDNIGHT)
        );
    }

    #[test]
    fn parts_of_day() {
        let start = |text: &str| first("part_of_day", text).and_then(|r| r.start);
        assert_eq!(start("this morning"), Some(t("09:00")));
        assert_eq!(start("early this morning"), Some(t("07:00")));
        assert_eq!(start("in the late afternoon"), Some(t("16:00")));
        assert_eq!(start("this evening"), Some(t("18:00")));
        assert_eq!(start("tonight"), Some(t("20:00")));
        assert_eq!(start("last night"), Some(t("21:00")));
        assert_eq!(start("late night"), Some(t("23:00")));
        assert_eq!(start("night shift"), None);
    }

    #[test]
    fn meals() {
        let lunch = first("meal", "lunch").unwrap();
        assert_eq!(lunch.kind, ExpressionKind::Range);
        assert_eq!((lunch.start, lunch.end), (Some(t("12:00")), Some(t("13:00"))));

        let after = first("meal_relative", "after lunch").unwrap();
        assert_eq!(after.start, Some(t("13:00")));
        let before = first("meal_relative", "pre-dinner").unwrap();
        assert_eq!(before.end, Some(t("18:00")));
    }

    #[test]
    fn quantity_words() {
        assert_eq!(quantity_value("a couple of"), Some(2.0));
        assert_eq!(quantity_value("An"), Some(1.0));
        assert_eq!(quantity_value("2.5"), Some(2.5));
        assert_eq!(quantity_value("lots"), None);
    }
}
