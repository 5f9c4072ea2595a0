use crate::error::{config_error, DisplayResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Where wall-clock times on the display are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local time zone
    #[default]
    Local,
    /// A fixed IANA zone, independent of the host
    Named(Tz),
}

impl DisplayZone {
    /// Parse the `TIMEZONE` setting: `Local` (any case) or an IANA name
    pub fn from_config(name: &str) -> DisplayResult<Self> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("local") {
            return Ok(DisplayZone::Local);
        }
        name.parse::<Tz>()
            .map(DisplayZone::Named)
            .map_err(|_| config_error(&format!("Unknown timezone: {}", name)))
    }

    /// Current time in this zone
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Local => Local::now().fixed_offset(),
            DisplayZone::Named(tz) => Utc::now().with_timezone(tz).fixed_offset(),
        }
    }

    /// Move an instant into this zone
    pub fn convert(&self, instant: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).fixed_offset(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }
}

/// A point in time as sent by the backend.
///
/// The calendar backend emits offset-less ISO timestamps and the weather
/// provider emits minute-precision ones, so both zoned and floating forms
/// are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// An RFC 3339 instant with an explicit offset
    Zoned(DateTime<FixedOffset>),
    /// A wall-clock time without zone information, shown as-is
    Floating(NaiveDateTime),
}

const FLOATING_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

impl Timestamp {
    /// Wall-clock reading of this timestamp on the display
    pub fn wall_clock(&self, zone: DisplayZone) -> NaiveDateTime {
        match self {
            Timestamp::Zoned(instant) => zone.convert(instant).naive_local(),
            Timestamp::Floating(naive) => *naive,
        }
    }
}

/// Error for strings that match none of the accepted timestamp layouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError(String);

impl fmt::Display for TimestampParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised timestamp '{}'", self.0)
    }
}

impl std::error::Error for TimestampParseError {}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Timestamp::Zoned(instant));
        }
        for format in FLOATING_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Timestamp::Floating(naive));
            }
        }
        // All-day events only carry a date
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Timestamp::Floating)
            .ok_or_else(|| TimestampParseError(raw.to_string()))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Clock face time, e.g. `09:05:03 AM`
pub fn format_clock_time(time: &NaiveDateTime) -> String {
    time.format("%I:%M:%S %p").to_string()
}

/// Clock date line, e.g. `Monday, January 15, 2024`
pub fn format_long_date(time: &NaiveDateTime) -> String {
    time.format("%A, %B %-d, %Y").to_string()
}

/// Short event day, e.g. `Mon, Jan 15`
pub fn format_short_date(time: &NaiveDateTime) -> String {
    time.format("%a, %b %-d").to_string()
}

/// Hour and minute, e.g. `10:00 AM`
pub fn format_short_time(time: &NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn clock_uses_twelve_hour_format() {
        assert_eq!(format_clock_time(&at(2024, 1, 15, 9, 5, 3)), "09:05:03 AM");
        assert_eq!(format_clock_time(&at(2024, 1, 15, 21, 45, 0)), "09:45:00 PM");
        assert_eq!(format_clock_time(&at(2024, 1, 15, 0, 0, 0)), "12:00:00 AM");
    }

    #[test]
    fn long_and_short_dates() {
        let time = at(2024, 1, 15, 10, 0, 0);
        assert_eq!(format_long_date(&time), "Monday, January 15, 2024");
        assert_eq!(format_short_date(&time), "Mon, Jan 15");
        assert_eq!(format_short_time(&time), "10:00 AM");
    }

    #[test]
    fn parses_floating_timestamps() {
        let expected = Timestamp::Floating(at(2024, 1, 15, 10, 30, 0));
        assert_eq!("2024-01-15T10:30:00".parse::<Timestamp>().unwrap(), expected);
        assert_eq!("2024-01-15T10:30".parse::<Timestamp>().unwrap(), expected);

        let fractional = "2024-01-15T10:30:00.123456".parse::<Timestamp>().unwrap();
        assert_eq!(fractional.wall_clock(DisplayZone::Local).format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn parses_all_day_dates_as_midnight() {
        let parsed = "2024-01-15".parse::<Timestamp>().unwrap();
        assert_eq!(parsed, Timestamp::Floating(at(2024, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn zoned_timestamps_convert_into_display_zone() {
        let parsed = "2024-01-15T10:00:00Z".parse::<Timestamp>().unwrap();
        let zone = DisplayZone::from_config("Europe/Helsinki").unwrap();
        assert_eq!(parsed.wall_clock(zone), at(2024, 1, 15, 12, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!("next tuesday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn display_zone_from_config() {
        assert_eq!(DisplayZone::from_config("Local").unwrap(), DisplayZone::Local);
        assert_eq!(DisplayZone::from_config("").unwrap(), DisplayZone::Local);
        assert_eq!(
            DisplayZone::from_config("America/New_York").unwrap(),
            DisplayZone::Named(chrono_tz::America::New_York)
        );
        assert!(DisplayZone::from_config("Mars/Olympus_Mons").is_err());
    }
}
