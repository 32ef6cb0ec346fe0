use std::{fmt, time::Duration};

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use thiserror::Error;

use crate::TimeOfDay;

/// the 12-hour formats accepted for `--at`, the first one is what we show in the help text
const TWELVE_HOUR_FORMATS: [&str; 2] = ["%I:%M%p", "%I:%M %p"];

/// when the alarm should ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpec {
    /// a wall clock time (hour and minute only), resolved to today or tomorrow
    Absolute(NaiveTime),
    /// an offset from now
    Relative(Duration),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("`{0}` is not a time like 3:04PM, 15:04 or 15")]
    Unrecognized(String),

    #[error("hours must be in the range [0..23], got {0}")]
    HourOutOfRange(u32),

    #[error("minutes must be in the range [0..59], got {0}")]
    MinuteOutOfRange(u32),

    #[error("`{input}` is not a duration like 90s or 1h15m: {reason}")]
    Duration { input: String, reason: String },
}

impl TimeSpec {
    /// an absolute time from a 24-hour clock hour and minute
    pub fn absolute(hour: u32, minute: u32) -> Result<Self, ParseError> {
        if hour > 23 {
            return Err(ParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ParseError::MinuteOutOfRange(minute));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self::Absolute)
            .ok_or_else(|| ParseError::Unrecognized(format!("{hour}:{minute:02}")))
    }

    /// Parses a time of day.
    ///
    /// Accepts the 12-hour form (`3:45PM`, `03:45pm`, `3:45 PM`) as well as a
    /// bare 24-hour `H` or `H:MM` (`15`, `15:04`, `9:5`).
    pub fn parse_absolute(s: &str) -> Result<Self, ParseError> {
        TWELVE_HOUR_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
            .map_or_else(
                || parse_twenty_four_hour(s),
                |time| Self::absolute(time.hour(), time.minute()),
            )
    }

    /// Parses a delay such as `90s`, `1h15m` or `1h 15m`.
    pub fn parse_relative(s: &str) -> Result<Self, ParseError> {
        humantime::parse_duration(s)
            .map(Self::Relative)
            .map_err(|e| ParseError::Duration {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }

    /// How long to wait from `now` until the alarm should ring.
    ///
    /// An absolute time that has already passed today (or is right now) rings
    /// tomorrow, so the wait for an absolute time is never zero.
    #[must_use]
    pub fn resolve(&self, now: NaiveDateTime) -> ResolvedWait {
        match *self {
            Self::Relative(wait) => ResolvedWait(wait),
            Self::Absolute(time) => {
                let mut at = now.date().and_time(time);
                if at <= now {
                    at += TimeDelta::days(1);
                }
                // at is strictly after now so this is always positive
                ResolvedWait((at - now).to_std().unwrap_or_default())
            }
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(time) => write!(f, "at {}", time.format("%-I:%M%p")),
            Self::Relative(wait) => write!(f, "in {}", humantime::format_duration(*wait)),
        }
    }
}

fn parse_twenty_four_hour(s: &str) -> Result<TimeSpec, ParseError> {
    let unrecognized = || ParseError::Unrecognized(s.to_string());
    // no minutes means on the hour
    let (hour, minute) = s.split_once(':').unwrap_or((s, "0"));
    let hour: u32 = hour.parse().map_err(|_| unrecognized())?;
    let minute: u32 = minute.parse().map_err(|_| unrecognized())?;
    // the 12-hour conversion only makes sense for real hours, minutes are checked by `absolute`
    if hour > 23 {
        return Err(ParseError::HourOutOfRange(hour));
    }
    let (hour, time_of_day) = to_twelve_hour(hour);
    TimeSpec::absolute(time_of_day.to_twenty_four_hour(hour), minute)
}

/// Converts a 24-hour clock hour into its 12-hour form.
///
/// Midnight (0) is 12 AM and noon (12) is 12 PM.
#[must_use]
pub const fn to_twelve_hour(hour: u32) -> (u32, TimeOfDay) {
    match hour {
        0 => (12, TimeOfDay::AM),
        12 => (12, TimeOfDay::PM),
        13.. => (hour - 12, TimeOfDay::PM),
        _ => (hour, TimeOfDay::AM),
    }
}

/// a non negative wait, computed once relative to a captured "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ResolvedWait(Duration);

impl ResolvedWait {
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    #[must_use]
    pub const fn is_immediate(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for ResolvedWait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }
}
