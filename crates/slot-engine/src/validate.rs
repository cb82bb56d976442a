//! Conversion of wire input into typed queries and schedule sources.
//!
//! Checks run in a fixed order and stop at the first failure: time context,
//! range, interval, duration, unavailability, allocations, per-day
//! timetables, the weekday bucket, custom dates, then explicit availability.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde_json::Value;

use crate::availability::Query;
use crate::context::{parse_date, parse_time_of_day, TimeContext, DEFAULT_DATE_FORMAT};
use crate::error::{Result, ValidationError};
use crate::interval::Interval;
use crate::request::{
    AllocationInput, DateWindowInput, IntervalInput, QueryInput, ScheduleInput, TemplateInput,
    TimeWindowInput, UnavailabilityInput,
};
use crate::source::{Allocation, DateWindow, ScheduleSource, Unavailability};
use crate::timetable::{DayTemplate, TimeWindow, Timetable};

/// Build the time context from the zone and format options.
pub fn context(input: &QueryInput) -> Result<TimeContext> {
    let timezone = input.parse_timezone.as_deref().unwrap_or("UTC");
    let display = input.display_timezone.as_deref().unwrap_or("UTC");
    let format = input.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
    let ctx = TimeContext::new(timezone, display, format)?;
    Ok(match input.dst_policy {
        Some(policy) => ctx.with_dst_policy(policy),
        None => ctx,
    })
}

/// Validate the range and slot options.
pub fn query(input: &QueryInput, ctx: &TimeContext) -> Result<Query> {
    let from = instant(&input.from, "from", "", ctx)?;
    let to = instant(&input.to, "to", "", ctx)?;
    if from >= to {
        return Err(ValidationError::range_order(""));
    }

    let interval = minutes(input.interval.as_ref(), "interval")?;
    let duration = minutes(input.duration.as_ref(), "duration")?;

    Ok(Query {
        range: Interval::new(from, to),
        interval_minutes: interval,
        duration_minutes: duration,
        normalize: input.normalize.unwrap_or(false),
        show_unavailable: input.show_unavailable.unwrap_or(false),
    })
}

/// Validate one schedule and convert it into sources.
pub fn schedule(input: &ScheduleInput, ctx: &TimeContext) -> Result<Vec<ScheduleSource>> {
    let mut sources = Vec::new();

    if !input.unavailability.is_empty() {
        let entries = input
            .unavailability
            .iter()
            .map(|entry| unavailability(entry, ctx))
            .collect::<Result<Vec<_>>>()?;
        sources.push(ScheduleSource::Unavailability(entries));
    }

    if !input.allocated.is_empty() {
        let bookings = input
            .allocated
            .iter()
            .map(|booking| allocation(booking, ctx))
            .collect::<Result<Vec<_>>>()?;
        sources.push(ScheduleSource::Allocated(bookings));
    }

    let mut daily = Timetable::new();
    for (day, name) in DAYS {
        if let Some(template) = day_input(input, day) {
            daily.set_day(day, day_template(template, name)?);
        }
    }
    if !daily.is_empty() {
        sources.push(ScheduleSource::Daily(daily));
    }

    if let Some(template) = &input.weekdays {
        sources.push(ScheduleSource::Weekly(day_template(template, "weekdays")?));
    }

    if !input.custom_schedule.is_empty() {
        let windows = input
            .custom_schedule
            .iter()
            .map(|window| date_window(window, "custom_schedule", ctx))
            .collect::<Result<Vec<_>>>()?;
        sources.push(ScheduleSource::Custom(windows));
    }

    if !input.availability.is_empty() {
        let intervals = input
            .availability
            .iter()
            .map(|i| interval(i, "availability", ctx))
            .collect::<Result<Vec<_>>>()?;
        sources.push(ScheduleSource::Availability(intervals));
    }

    Ok(sources)
}

const DAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "monday"),
    (Weekday::Tue, "tuesday"),
    (Weekday::Wed, "wednesday"),
    (Weekday::Thu, "thursday"),
    (Weekday::Fri, "friday"),
    (Weekday::Sat, "saturday"),
    (Weekday::Sun, "sunday"),
];

fn day_input(input: &ScheduleInput, day: Weekday) -> Option<&TemplateInput> {
    match day {
        Weekday::Mon => input.monday.as_ref(),
        Weekday::Tue => input.tuesday.as_ref(),
        Weekday::Wed => input.wednesday.as_ref(),
        Weekday::Thu => input.thursday.as_ref(),
        Weekday::Fri => input.friday.as_ref(),
        Weekday::Sat => input.saturday.as_ref(),
        Weekday::Sun => input.sunday.as_ref(),
    }
}

/// Bounds are only read when both are present; a day with blocked windows
/// but no bounds is valid. No ordering check: `to <= from` wraps midnight.
fn day_template(input: &TemplateInput, day: &str) -> Result<DayTemplate> {
    let context = format!("{day}:");
    let window = match (&input.from, &input.to) {
        (Some(from), Some(to)) => Some(TimeWindow {
            from: time(from, "from", &context)?,
            to: time(to, "to", &context)?,
            reference: input.reference.clone(),
        }),
        _ => None,
    };

    let blocked_context = format!("{day}: unavailability");
    let unavailability = input
        .unavailability
        .iter()
        .map(|w| time_window(w, &blocked_context))
        .collect::<Result<Vec<_>>>()?;

    Ok(DayTemplate {
        window,
        unavailability,
    })
}

fn time_window(input: &TimeWindowInput, context: &str) -> Result<TimeWindow> {
    Ok(TimeWindow {
        from: time(&input.from, "from", context)?,
        to: time(&input.to, "to", context)?,
        reference: input.reference.clone(),
    })
}

fn unavailability(input: &UnavailabilityInput, ctx: &TimeContext) -> Result<Unavailability> {
    match input {
        UnavailabilityInput::Date(window) => {
            date_window(window, "unavailability", ctx).map(Unavailability::Date)
        }
        UnavailabilityInput::Interval(i) => {
            interval(i, "unavailability", ctx).map(Unavailability::Interval)
        }
    }
}

fn allocation(input: &AllocationInput, ctx: &TimeContext) -> Result<Allocation> {
    Ok(Allocation {
        from: instant(&input.from, "allocated.from", "", ctx)?,
        duration_minutes: minutes(Some(&input.duration), "allocated.duration")?,
    })
}

fn interval(input: &IntervalInput, context: &str, ctx: &TimeContext) -> Result<Interval> {
    let from = instant(&input.from, "from", context, ctx)?;
    let to = instant(&input.to, "to", context, ctx)?;
    if from >= to {
        return Err(ValidationError::range_order(context));
    }
    Ok(Interval {
        from,
        to,
        reference: input.reference.clone(),
    })
}

fn date_window(input: &DateWindowInput, context: &str, ctx: &TimeContext) -> Result<DateWindow> {
    let date = date(&input.date, context, ctx)?;
    let from = time(&input.from, "from", context)?;
    let to = time(&input.to, "to", context)?;
    if from >= to {
        return Err(ValidationError::range_order(context));
    }
    Ok(DateWindow {
        date,
        from,
        to,
        reference: input.reference.clone(),
    })
}

fn instant(s: &str, field: &str, context: &str, ctx: &TimeContext) -> Result<DateTime<Utc>> {
    ctx.parse_instant(s)
        .ok_or_else(|| ValidationError::date_time(context, field))
}

/// A plain `YYYY-MM-DD`, or the local date of a full date-time.
fn date(s: &str, context: &str, ctx: &TimeContext) -> Result<NaiveDate> {
    parse_date(s)
        .or_else(|| ctx.parse_instant(s).map(|instant| ctx.local_date(instant)))
        .ok_or_else(|| ValidationError::date_time(context, "date"))
}

fn time(s: &str, field: &str, context: &str) -> Result<NaiveTime> {
    parse_time_of_day(s).ok_or_else(|| ValidationError::time(context, field))
}

/// A non-negative whole number of minutes; absent means zero. Integral
/// floats such as `30.0` are accepted.
fn minutes(value: Option<&Value>, field: &str) -> Result<u32> {
    let Some(value) = value else {
        return Ok(0);
    };
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u64)
    });
    whole
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| ValidationError::not_positive(field))
}
