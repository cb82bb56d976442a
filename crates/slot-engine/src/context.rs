//! Immutable timezone/format context threaded through every call.
//!
//! `timezone` is the zone naive input is parsed in and the zone recurring
//! templates and day grouping are evaluated in. `display_timezone` and
//! `date_format` only affect how instants are rendered on the way out.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::dst::{resolve_local, DstPolicy};
use crate::error::{Result, ValidationError};

/// chrono strftime equivalent of `YYYY-MM-DDTHH:mm:ssZ`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TimeContext {
    pub timezone: Tz,
    pub display_timezone: Tz,
    pub date_format: String,
    pub dst_policy: DstPolicy,
}

impl Default for TimeContext {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            display_timezone: Tz::UTC,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            dst_policy: DstPolicy::default(),
        }
    }
}

impl TimeContext {
    /// Build a context from IANA zone names and a strftime pattern.
    ///
    /// # Errors
    /// `InvalidTimezone` for unknown zones, `InvalidDateFormat` for patterns
    /// chrono cannot render.
    pub fn new(timezone: &str, display_timezone: &str, date_format: &str) -> Result<Self> {
        Ok(Self {
            timezone: parse_timezone(timezone)?,
            display_timezone: parse_timezone(display_timezone)?,
            date_format: check_date_format(date_format)?,
            dst_policy: DstPolicy::default(),
        })
    }

    /// Context that parses, evaluates and renders in one zone.
    pub fn in_timezone(tz: Tz) -> Self {
        Self {
            timezone: tz,
            display_timezone: tz,
            ..Self::default()
        }
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    /// Parse an ISO 8601 date or date-time.
    ///
    /// Strings with an offset are absolute. Strings without one (including a
    /// bare `YYYY-MM-DD`, read as midnight) are wall-clock times in
    /// `self.timezone`.
    pub fn parse_instant(&self, s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return self.resolve(naive);
            }
        }
        let date = parse_date(s)?;
        self.anchor(date, NaiveTime::MIN)
    }

    /// The instant at wall-clock `time` on local `date`.
    pub fn anchor(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.resolve(date.and_time(time))
    }

    fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        resolve_local(&self.timezone, naive, self.dst_policy)
    }

    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    /// Render an instant in the display zone with the configured pattern.
    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.display_timezone)
            .format(&self.date_format)
            .to_string()
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| ValidationError::InvalidTimezone(name.to_string()))
}

fn check_date_format(pattern: &str) -> Result<String> {
    if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ValidationError::InvalidDateFormat(pattern.to_string()));
    }
    Ok(pattern.to_string())
}

/// Parse a wall-clock time written `HH:mm` (seconds optional).
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
