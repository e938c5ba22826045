//! Wall-clock time of day on a 24-hour dial.
//!
//! Every time the extractor and the placement engine deal with is a time of
//! day without a date. Arithmetic wraps modulo 24 hours; there is no date
//! rollover.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors constructing a [`ClockTime`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Hour outside `0..=24`.
    #[error("hour must be between 0 and 24, got {hour}")]
    HourOutOfRange { hour: u32 },

    /// Minute outside `0..=59`.
    #[error("minute must be between 0 and 59, got {minute}")]
    MinuteOutOfRange { minute: u32 },

    /// `24:MM` with a nonzero minute.
    #[error("24:{minute:02} is past the end of the day")]
    PastEndOfDay { minute: u32 },

    /// Not an `HH:MM` string.
    #[error("invalid time of day {value:?}, expected HH:MM")]
    Malformed { value: String },
}

/// A time of day stored as minutes since midnight.
///
/// Valid values are `00:00` through `24:00`; `24:00` is the end-of-day
/// boundary and is only produced by parsing or by clamping a placement to the
/// end of the day. Wrapping arithmetic never yields it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// `00:00`.
    pub const MIDNIGHT: Self = Self(0);

    /// `12:00`.
    pub const NOON: Self = Self(12 * 60);

    /// `24:00`, the end of the day.
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a time from an hour and minute.
    pub const fn new(hour: u32, minute: u32) -> Result<Self, ClockError> {
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange { minute });
        }
        if hour > 24 {
            return Err(ClockError::HourOutOfRange { hour });
        }
        if hour == 24 && minute > 0 {
            return Err(ClockError::PastEndOfDay { minute });
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Creates a time from minutes since midnight.
    pub const fn from_minutes(minutes: u32) -> Result<Self, ClockError> {
        if minutes > MINUTES_PER_DAY {
            return Err(ClockError::HourOutOfRange {
                hour: minutes / 60,
            });
        }
        Ok(Self(minutes))
    }

    /// Creates a time from minutes since midnight, clamping to `24:00`.
    pub const fn saturating_from_minutes(minutes: u32) -> Self {
        if minutes > MINUTES_PER_DAY {
            Self::END_OF_DAY
        } else {
            Self(minutes)
        }
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u32 {
        self.0
    }

    pub const fn hour(self) -> u32 {
        self.0 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Adds (or with a negative delta, subtracts) minutes, wrapping around
    /// midnight.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub const fn add_minutes(self, delta: i64) -> Self {
        // rem_euclid keeps the value in 0..1440, so the casts are lossless
        let wrapped = (self.0 as i64 + delta).rem_euclid(MINUTES_PER_DAY as i64);
        Self(wrapped as u32)
    }

    /// Subtracts minutes, wrapping around midnight.
    #[must_use]
    pub const fn sub_minutes(self, delta: i64) -> Self {
        self.add_minutes(-delta)
    }

    /// Forward distance in minutes from `self` to `later` on the 24-hour dial.
    ///
    /// `22:00` to `01:00` is 180 minutes.
    pub const fn minutes_until(self, later: Self) -> u32 {
        let from = self.0 % MINUTES_PER_DAY;
        let to = later.0 % MINUTES_PER_DAY;
        (to + MINUTES_PER_DAY - from) % MINUTES_PER_DAY
    }

    /// Converts to a `chrono` time. `24:00` has no `NaiveTime` equivalent.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
    }
}

impl From<NaiveTime> for ClockTime {
    /// Seconds are truncated.
    fn from(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockError::Malformed {
            value: s.to_string(),
        };

        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if hour.len() > 2 || minute.len() != 2 || !all_digits(hour) || !all_digits(minute) {
            return Err(malformed());
        }

        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().expect("valid clock time")
    }

    #[test]
    fn parses_and_displays_hh_mm() {
        assert_eq!(t("09:05").minutes(), 9 * 60 + 5);
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("24:00"), ClockTime::END_OF_DAY);
        assert_eq!(ClockTime::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "9", "9:5", "09:60", "25:00", "24:01", "ab:cd", "123:00", "-1:00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn constructor_reports_which_field_is_wrong() {
        assert_eq!(
            ClockTime::new(25, 0),
            Err(ClockError::HourOutOfRange { hour: 25 })
        );
        assert_eq!(
            ClockTime::new(10, 75),
            Err(ClockError::MinuteOutOfRange { minute: 75 })
        );
        assert_eq!(
            ClockTime::new(24, 30),
            Err(ClockError::PastEndOfDay { minute: 30 })
        );
    }

    #[test]
    fn arithmetic_wraps_around_midnight() {
        assert_eq!(t("23:30").add_minutes(45), t("00:15"));
        assert_eq!(t("00:30").sub_minutes(60), t("23:30"));
        assert_eq!(t("13:00").sub_minutes(120), t("11:00"));
        assert_eq!(ClockTime::END_OF_DAY.add_minutes(0), ClockTime::MIDNIGHT);
        assert_eq!(t("10:00").add_minutes(3 * 1440 + 5), t("10:05"));
    }

    #[test]
    fn minutes_until_is_forward_distance() {
        assert_eq!(t("09:00").minutes_until(t("10:30")), 90);
        assert_eq!(t("22:00").minutes_until(t("01:00")), 180);
        assert_eq!(t("08:00").minutes_until(t("08:00")), 0);
    }

    #[test]
    fn saturating_from_minutes_clamps() {
        assert_eq!(ClockTime::saturating_from_minutes(2000), ClockTime::END_OF_DAY);
        assert_eq!(ClockTime::saturating_from_minutes(61), t("01:01"));
        assert!(ClockTime::from_minutes(1441).is_err());
    }

    #[test]
    fn naive_time_conversion() {
        let naive = NaiveTime::from_hms_opt(14, 45, 59).unwrap();
        assert_eq!(ClockTime::from(naive), t("14:45"));
        assert_eq!(
            t("14:45").to_naive_time(),
            NaiveTime::from_hms_opt(14, 45, 0)
        );
        assert_eq!(ClockTime::END_OF_DAY.to_naive_time(), None);
    }

    #[test]
    fn serde_uses_hh_mm_strings() {
        let json = serde_json::to_string(&t("07:30")).unwrap();
        assert_eq!(json, "\"07:30\"");
        let parsed: ClockTime = serde_json::from_str("\"18:00\"").unwrap();
        assert_eq!(parsed, t("18:00"));
        assert!(serde_json::from_str::<ClockTime>("\"18h\"").is_err());
    }
}
