//! Timestamp parsing and locale-aware date display.
//!
//! Source data carries timestamps as free-form strings. Dates are shown
//! date-only, in the viewer's locale and timezone.

use chrono::{DateTime, Local, Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Text shown for timestamps that can't be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// A parsed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// A point in time with a known offset.
    Instant(DateTime<Utc>),
    /// A wall-clock time without offset, read in the viewer's timezone.
    Wall(NaiveDateTime),
}

const WALL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string.
///
/// Accepts RFC 3339, RFC 2822, offset-less date-times (wall clock) and bare
/// `YYYY-MM-DD` dates, which are taken as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::Instant(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(Timestamp::Instant(dt.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_time(NaiveTime::MIN);
        return Some(Timestamp::Instant(Utc.from_utc_datetime(&midnight)));
    }

    WALL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(Timestamp::Wall)
}

/// Timezone used to decide which calendar day an instant falls on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayZone {
    /// The host's local timezone.
    Local,
    /// A named IANA timezone.
    Named(Tz),
}

impl DisplayZone {
    /// Parse an IANA timezone name such as `America/Chicago`.
    pub fn parse(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(Self::Named)
    }

    fn calendar_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }
}

/// Parse a locale name such as `en_US`, `de_DE.UTF-8` or `C`.
pub fn parse_locale(name: &str) -> Option<Locale> {
    let base = name.split(['.', '@']).next().unwrap_or_default().trim();
    match base {
        "" => None,
        "C" | "POSIX" => Some(Locale::POSIX),
        other => Locale::try_from(other.replace('-', "_").as_str()).ok(),
    }
}

/// Locale from the environment (`LC_ALL`, `LC_TIME`, then `LANG`).
pub fn locale_from_env() -> Option<Locale> {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| parse_locale(&value))
}

/// Formats timestamps as date-only strings for a locale and timezone.
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    locale: Locale,
    zone: DisplayZone,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            locale: locale_from_env().unwrap_or(Locale::en_US),
            zone: DisplayZone::Local,
        }
    }
}

impl DateFormatter {
    pub fn new(locale: Locale, zone: DisplayZone) -> Self {
        Self { locale, zone }
    }

    /// Calendar day a timestamp falls on in the display timezone.
    pub fn calendar_date(&self, timestamp: &Timestamp) -> NaiveDate {
        match timestamp {
            Timestamp::Instant(instant) => self.zone.calendar_date(instant),
            Timestamp::Wall(wall) => wall.date(),
        }
    }

    /// Format a raw timestamp using the locale's date representation.
    pub fn format_date(&self, raw: &str) -> String {
        match parse_timestamp(raw) {
            Some(timestamp) => {
                let day = self.calendar_date(&timestamp).and_time(NaiveTime::MIN);
                Utc.from_utc_datetime(&day)
                    .format_localized("%x", self.locale)
                    .to_string()
            }
            None => INVALID_DATE.to_string(),
        }
    }
}
