//! The schedule sources a caller can supply, and their conversion into
//! concrete interval layers ready for precedence merging.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::conflict::resolve_layers;
use crate::context::TimeContext;
use crate::expander::{self, Schedule};
use crate::interval::Interval;
use crate::timetable::{DayTemplate, Timetable};

/// A pre-booked slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub from: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl Allocation {
    pub fn new(from: DateTime<Utc>, duration_minutes: u32) -> Self {
        Self {
            from,
            duration_minutes,
        }
    }

    /// The booked range, or `None` for a zero-length booking.
    pub fn to_interval(&self) -> Option<Interval> {
        let to = self.from + Duration::minutes(self.duration_minutes as i64);
        (self.from < to).then(|| Interval::new(self.from, to))
    }
}

/// A wall-clock window pinned to one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    pub date: NaiveDate,
    pub from: NaiveTime,
    pub to: NaiveTime,
    pub reference: Option<String>,
}

impl DateWindow {
    pub fn new(date: NaiveDate, from: NaiveTime, to: NaiveTime) -> Self {
        Self {
            date,
            from,
            to,
            reference: None,
        }
    }

    /// The window on its date in the context zone; `None` if it is empty or
    /// falls entirely into a skipped DST gap.
    pub fn to_interval(&self, ctx: &TimeContext) -> Option<Interval> {
        let from = ctx.anchor(self.date, self.from)?;
        let to = ctx.anchor(self.date, self.to)?;
        (from < to).then(|| Interval {
            from,
            to,
            reference: self.reference.clone(),
        })
    }
}

/// An unavailability entry: either an absolute interval or a window on a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailability {
    Interval(Interval),
    Date(DateWindow),
}

impl Unavailability {
    pub fn to_interval(&self, ctx: &TimeContext) -> Option<Interval> {
        match self {
            Self::Interval(i) => (!i.is_empty()).then(|| i.clone()),
            Self::Date(d) => d.to_interval(ctx),
        }
    }
}

/// One input to the availability pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSource {
    /// Template applied to every Monday–Friday.
    Weekly(DayTemplate),
    /// Per-weekday templates.
    Daily(Timetable),
    /// Explicit absolute availability.
    Availability(Vec<Interval>),
    /// Explicit unavailability.
    Unavailability(Vec<Unavailability>),
    /// Date-specific availability overriding the templates.
    Custom(Vec<DateWindow>),
    /// Existing bookings.
    Allocated(Vec<Allocation>),
}

/// Sources converted to intervals over one range, grouped by precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers {
    pub weekly: Schedule,
    pub daily: Schedule,
    pub availability: Vec<Interval>,
    pub custom: Vec<Interval>,
    pub unavailability: Vec<Interval>,
    pub allocated: Vec<Interval>,
}

impl Layers {
    /// Convert every source, concatenating sources of the same kind in input
    /// order.
    pub fn from_sources(sources: &[ScheduleSource], range: &Interval, ctx: &TimeContext) -> Self {
        let mut layers = Self::default();
        for source in sources {
            match source {
                ScheduleSource::Weekly(template) => {
                    let table = Timetable::weekdays(template.clone());
                    append(&mut layers.weekly, expander::expand(&table, range, ctx));
                }
                ScheduleSource::Daily(table) => {
                    append(&mut layers.daily, expander::expand(table, range, ctx));
                }
                ScheduleSource::Availability(intervals) => layers
                    .availability
                    .extend(intervals.iter().filter(|i| !i.is_empty()).cloned()),
                ScheduleSource::Unavailability(entries) => layers
                    .unavailability
                    .extend(entries.iter().filter_map(|u| u.to_interval(ctx))),
                ScheduleSource::Custom(windows) => layers
                    .custom
                    .extend(windows.iter().filter_map(|w| w.to_interval(ctx))),
                ScheduleSource::Allocated(bookings) => layers
                    .allocated
                    .extend(bookings.iter().filter_map(Allocation::to_interval)),
            }
        }
        layers
    }

    /// Merge the layers by precedence into one schedule.
    ///
    /// Availability: weekly < daily < explicit < custom. Unavailability:
    /// weekly < daily < explicit < allocations.
    pub fn merge(&self) -> Schedule {
        Schedule {
            availability: resolve_layers(&[
                &self.weekly.availability,
                &self.daily.availability,
                &self.availability,
                &self.custom,
            ]),
            unavailability: resolve_layers(&[
                &self.weekly.unavailability,
                &self.daily.unavailability,
                &self.unavailability,
                &self.allocated,
            ]),
        }
    }
}

fn append(into: &mut Schedule, from: Schedule) {
    into.availability.extend(from.availability);
    into.unavailability.extend(from.unavailability);
}
