//! Slicing free intervals into bookable slots, and grouping slot starts by
//! calendar day.

use chrono::{Duration, Timelike};
use indexmap::{IndexMap, IndexSet};

use crate::context::TimeContext;
use crate::error::{Result, ValidationError};
use crate::interval::{self, Interval};

/// Slot start times (`HH:mm`) keyed by local day (`YYYY-MM-DD`), both in
/// first-seen order.
pub type DaySlots = IndexMap<String, Vec<String>>;

/// A slice length must split an hour evenly (5, 10, 15, 20, 30, 60, ...).
/// Whole multiples of an hour are accepted as well.
pub fn check_slice(slice_minutes: u32) -> Result<()> {
    let within_hour = slice_minutes % 60;
    if within_hour == 0 || 60 % within_hour == 0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlice(slice_minutes))
    }
}

/// Break every interval into slots of `duration` minutes whose starts are
/// `slice_minutes` apart and aligned to clock multiples of `slice_minutes`.
///
/// A zero `slice_minutes` disables partitioning and returns the input sorted.
/// A zero `duration` yields zero-length markers at every aligned start.
///
/// # Errors
/// `InvalidSlice` when `slice_minutes` does not divide an hour.
pub fn partition(
    intervals: &[Interval],
    slice_minutes: u32,
    duration: u32,
    ctx: &TimeContext,
) -> Result<Vec<Interval>> {
    let sorted = interval::sort(intervals, false);
    if slice_minutes == 0 {
        return Ok(sorted);
    }
    check_slice(slice_minutes)?;

    Ok(sorted
        .iter()
        .flat_map(|i| partition_one(i, slice_minutes as i64, duration as i64, ctx))
        .collect())
}

fn partition_one(interval: &Interval, slice: i64, duration: i64, ctx: &TimeContext) -> Vec<Interval> {
    let minute = ctx.local(interval.from).minute() as i64;
    let aligned = (minute + slice - 1) / slice * slice;
    let start = interval.from + Duration::minutes(aligned - minute);

    let total = (interval.to - start).num_minutes();
    let span = (total - duration + slice).min(total);
    let count = (span / slice).max(0);

    let mut slots: Vec<Interval> = (0..count)
        .map(|k| {
            let from = start + Duration::minutes(k * slice);
            interval.span(from, from + Duration::minutes(duration))
        })
        .collect();

    // A fractional count leaves a tail past the last full step; it becomes
    // one more slot only if it is at least `duration` long.
    if span % slice != 0 {
        let tail_from = start + Duration::minutes(count * slice + duration);
        if (interval.to - tail_from).num_minutes() >= duration {
            slots.push(interval.span(tail_from, interval.to));
        }
    }

    slots
}

/// Group interval start times by local calendar day in the context zone.
/// Repeated times within a day are listed once.
pub fn by_day(intervals: &[Interval], ctx: &TimeContext) -> DaySlots {
    group_starts(intervals, ctx)
        .into_iter()
        .map(|(day, times)| (day, times.into_iter().collect()))
        .collect()
}

/// Distinct local `HH:mm` starts per local `YYYY-MM-DD`, in first-seen order.
pub(crate) fn group_starts(
    intervals: &[Interval],
    ctx: &TimeContext,
) -> IndexMap<String, IndexSet<String>> {
    let mut days: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for interval in intervals {
        let local = ctx.local(interval.from);
        days.entry(local.format("%Y-%m-%d").to_string())
            .or_default()
            .insert(local.format("%H:%M").to_string());
    }
    days
}
