//! Time and cost utilities.
//!
//! Times are held at minute resolution; non-zero seconds are rejected.
//! A range whose end is not after its start crosses midnight; a
//! zero-length range is malformed.

use crate::{
    error::{PlanError, PlanResult},
    types::Hours,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

// Day-part boundaries, by start hour.
pub const MORNING_START_HOUR: u32 = 6;
pub const AFTERNOON_START_HOUR: u32 = 12;
pub const EVENING_START_HOUR: u32 = 17;
pub const NIGHT_START_HOUR: u32 = 21;

/// A wall-clock time, minutes since midnight. `24:00` is accepted as an end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub fn from_hm(hour: u32, minute: u32) -> PlanResult<Self> {
        if hour == 24 && minute == 0 {
            return Ok(Self::END_OF_DAY);
        }
        if hour > 23 || minute > 59 {
            return Err(invalid_time(&format!("{hour:02}:{minute:02}"), "out of range"));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Whole hour, saturating at 24:00.
    pub const fn at_hour(hour: u32) -> Self {
        let hour = if hour > 24 { 24 } else { hour };
        Self(hour * 60)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    fn to_naive(self) -> NaiveTime {
        // Only start times reach here, and 24:00 is never a start.
        NaiveTime::from_hms_opt(self.0 / 60 % 24, self.0 % 60, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for TimeOfDay {
    type Err = PlanError;

    fn from_str(s: &str) -> PlanResult<Self> {
        let trimmed = s.trim();
        if trimmed == "24:00" || trimmed == "24:00:00" {
            return Ok(Self::END_OF_DAY);
        }
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|e| invalid_time(s, &e.to_string()))?;
        if parsed.second() != 0 {
            return Err(invalid_time(s, "seconds must be zero"));
        }
        Ok(Self(parsed.hour() * 60 + parsed.minute()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlanError;

    fn try_from(value: String) -> PlanResult<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A `start-end` time slot such as `"08:00-16:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end:   TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> PlanResult<Self> {
        if start == TimeOfDay::END_OF_DAY {
            return Err(invalid_time(&start.to_string(), "24:00 is only valid as an end time"));
        }
        if start == end {
            return Err(invalid_time(&format!("{start}-{end}"), "zero-length time range"));
        }
        Ok(Self { start, end })
    }

    /// Length in minutes, wrapping past midnight when `end <= start`.
    pub fn span_minutes(&self) -> u32 {
        if self.end > self.start {
            self.end.minutes() - self.start.minutes()
        } else {
            self.end.minutes() + MINUTES_PER_DAY - self.start.minutes()
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.start.minutes() + self.span_minutes() > MINUTES_PER_DAY
    }

    /// Whether `other` lies entirely inside this range, both anchored on the same day.
    pub fn contains(&self, other: &TimeRange) -> bool {
        let own_start = self.start.minutes();
        let own_end = own_start + self.span_minutes();
        let other_start = other.start.minutes();
        let other_end = other_start + other.span_minutes();
        own_start <= other_start && other_end <= own_end
    }

    pub fn day_part(&self) -> DayPart {
        DayPart::from_hour(self.start.hour())
    }

    /// Absolute start when the range is worked on `date`.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start.to_naive())
    }

    /// Absolute end when the range is worked on `date`.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.start_on(date) + Duration::minutes(i64::from(self.span_minutes()))
    }
}

impl FromStr for TimeRange {
    type Err = PlanError;

    fn from_str(s: &str) -> PlanResult<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| invalid_time(s, "expected 'HH:MM-HH:MM'"))?;
        Self::new(start.parse()?, end.parse()?)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = PlanError;

    fn try_from(value: String) -> PlanResult<Self> {
        value.parse()
    }
}

impl From<TimeRange> for String {
    fn from(value: TimeRange) -> Self {
        value.to_string()
    }
}

/// Coarse label of a shift by its start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// [6,12) morning, [12,17) afternoon, [17,21) evening, everything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            h if (MORNING_START_HOUR..AFTERNOON_START_HOUR).contains(&h) => Self::Morning,
            h if (AFTERNOON_START_HOUR..EVENING_START_HOUR).contains(&h) => Self::Afternoon,
            h if (EVENING_START_HOUR..NIGHT_START_HOUR).contains(&h) => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning   => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening   => "evening",
            Self::Night     => "night",
        }
    }
}

/// Duration of a time slot in hours.
pub fn shift_hours(range: &TimeRange) -> Hours {
    f64::from(range.span_minutes()) / 60.0
}

/// Parse a `"HH:MM-HH:MM"` slot and return its duration in hours.
pub fn slot_hours(slot: &str) -> PlanResult<Hours> {
    Ok(shift_hours(&slot.parse()?))
}

pub fn labor_cost(hours: Hours, hourly_rate: f64) -> f64 {
    hours * hourly_rate
}

pub fn weekday_of(date: NaiveDate) -> Weekday {
    date.weekday()
}

/// Accepts chrono weekday names ("Mon", "monday") or 0..=6 with 0 = Sunday.
pub fn parse_weekday(value: &str) -> PlanResult<Weekday> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return match n {
            0 => Ok(Weekday::Sun),
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            _ => Err(invalid_weekday(value)),
        };
    }
    trimmed.parse::<Weekday>().map_err(|_| invalid_weekday(value))
}

fn invalid_weekday(value: &str) -> PlanError {
    PlanError::InvalidTime {
        value:  value.to_string(),
        reason: "unknown weekday".into(),
    }
}

fn invalid_time(value: &str, reason: &str) -> PlanError {
    PlanError::InvalidTime {
        value:  value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overnight_slot_wraps() {
        let range: TimeRange = "22:00-06:00".parse().unwrap();
        assert_eq!(range.span_minutes(), 8 * 60);
        assert!(range.crosses_midnight());
        assert_eq!(range.day_part(), DayPart::Night);
    }

    #[test]
    fn end_of_day_is_not_a_crossing() {
        let range: TimeRange = "16:00-24:00".parse().unwrap();
        assert_eq!(shift_hours(&range), 8.0);
        assert!(!range.crosses_midnight());
    }

    #[test]
    fn numeric_weekdays_start_on_sunday() {
        assert_eq!(parse_weekday("0").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday("1").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("6").unwrap(), Weekday::Sat);
        assert!(parse_weekday("7").is_err());
    }
}
