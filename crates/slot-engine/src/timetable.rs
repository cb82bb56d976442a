//! Recurring time-of-day templates.
//!
//! A [`Timetable`] says, per weekday, which wall-clock window is available and
//! which sub-windows are not. It carries no dates; [`crate::expander`] anchors
//! it onto a concrete range.

use chrono::{NaiveTime, Weekday};

/// A wall-clock window. `to <= from` means the window runs past midnight and
/// ends on the following day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: NaiveTime,
    pub to: NaiveTime,
    pub reference: Option<String>,
}

impl TimeWindow {
    pub fn new(from: NaiveTime, to: NaiveTime) -> Self {
        Self {
            from,
            to,
            reference: None,
        }
    }

    pub fn wraps_midnight(&self) -> bool {
        self.to <= self.from
    }
}

/// What one day of a timetable looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayTemplate {
    /// The available window, if the day has one.
    pub window: Option<TimeWindow>,
    /// Windows blocked off on that day, whether or not `window` is set.
    pub unavailability: Vec<TimeWindow>,
}

impl DayTemplate {
    pub fn available(from: NaiveTime, to: NaiveTime) -> Self {
        Self {
            window: Some(TimeWindow::new(from, to)),
            unavailability: Vec::new(),
        }
    }

    pub fn with_unavailability(mut self, from: NaiveTime, to: NaiveTime) -> Self {
        self.unavailability.push(TimeWindow::new(from, to));
        self
    }
}

/// Per-weekday templates plus an optional Monday–Friday bucket. An entry for
/// a specific weekday always wins over the bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    days: [Option<DayTemplate>; 7],
    weekdays: Option<DayTemplate>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timetable with only the Monday–Friday bucket set.
    pub fn weekdays(template: DayTemplate) -> Self {
        Self {
            weekdays: Some(template),
            ..Self::default()
        }
    }

    pub fn with_day(mut self, day: Weekday, template: DayTemplate) -> Self {
        self.set_day(day, template);
        self
    }

    pub fn set_day(&mut self, day: Weekday, template: DayTemplate) {
        self.days[day.num_days_from_monday() as usize] = Some(template);
    }

    pub fn set_weekdays(&mut self, template: DayTemplate) {
        self.weekdays = Some(template);
    }

    pub fn is_empty(&self) -> bool {
        self.weekdays.is_none() && self.days.iter().all(Option::is_none)
    }

    /// The template that applies on `day`, if any.
    pub fn template_for(&self, day: Weekday) -> Option<&DayTemplate> {
        self.days[day.num_days_from_monday() as usize]
            .as_ref()
            .or_else(|| self.weekdays.as_ref().filter(|_| is_workday(day)))
    }
}

fn is_workday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}
