//! The availability pipeline: schedule sources in, bookable slots out.
//!
//! Sources are expanded over the query range, merged by precedence, reduced
//! to free time, partitioned into slots, and finally rendered in one of three
//! output shapes chosen by the query flags.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::TimeContext;
use crate::error::{Result, ValidationError};
use crate::freebusy::free_time;
use crate::interval::Interval;
use crate::partition::{by_day, check_slice, group_starts, partition, DaySlots};
use crate::source::{Layers, ScheduleSource};

/// What to compute and how to shape the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The window to search in.
    pub range: Interval,
    /// Slot step and alignment in minutes. Zero disables partitioning.
    pub interval_minutes: u32,
    /// Length of each slot in minutes.
    pub duration_minutes: u32,
    /// Group slot start times by day instead of listing intervals.
    pub normalize: bool,
    /// Report every candidate slot in the range, flagged free or not.
    /// Takes precedence over `normalize`.
    pub show_unavailable: bool,
}

impl Query {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            range: Interval::new(from, to),
            interval_minutes: 0,
            duration_minutes: 0,
            normalize: false,
            show_unavailable: false,
        }
    }

    /// Slots of `duration` minutes starting every `interval` minutes.
    pub fn slots(mut self, interval: u32, duration: u32) -> Self {
        self.interval_minutes = interval;
        self.duration_minutes = duration;
        self
    }

    pub fn normalized(mut self) -> Self {
        self.normalize = true;
        self
    }

    pub fn with_unavailable(mut self) -> Self {
        self.show_unavailable = true;
        self
    }
}

/// One candidate slot start in flag mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFlag {
    pub time: String,
    pub available: bool,
}

/// Candidate slot starts keyed by local day, each flagged free or not.
pub type DayFlags = IndexMap<String, Vec<TimeFlag>>;

/// Pipeline result, shaped by the query flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Slots(Vec<Interval>),
    ByDay(DaySlots),
    Flags(DayFlags),
}

impl Availability {
    /// An empty result of the shape `query` asks for.
    pub fn empty(query: &Query) -> Self {
        if query.show_unavailable {
            Self::Flags(DayFlags::new())
        } else if query.normalize {
            Self::ByDay(DaySlots::new())
        } else {
            Self::Slots(Vec::new())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Slots(slots) => slots.is_empty(),
            Self::ByDay(days) => days.is_empty(),
            Self::Flags(days) => days.is_empty(),
        }
    }
}

/// Compute the bookable slots of one schedule.
///
/// # Errors
/// `RangeOrder` when the range is empty or inverted, `InvalidSlice` when the
/// interval does not divide an hour.
pub fn compute_availability(
    query: &Query,
    sources: &[ScheduleSource],
    ctx: &TimeContext,
) -> Result<Availability> {
    check_query(query)?;
    let slots = available_slots(query, sources, ctx)?;
    render(query, &slots, ctx)
}

pub(crate) fn check_query(query: &Query) -> Result<()> {
    if query.range.from >= query.range.to {
        return Err(ValidationError::range_order(""));
    }
    if query.interval_minutes != 0 {
        check_slice(query.interval_minutes)?;
    }
    Ok(())
}

/// Free slots of one schedule, before output shaping.
pub(crate) fn available_slots(
    query: &Query,
    sources: &[ScheduleSource],
    ctx: &TimeContext,
) -> Result<Vec<Interval>> {
    let schedule = Layers::from_sources(sources, &query.range, ctx).merge();

    // A free stretch shorter than one step cannot hold an aligned slot.
    let minimum = query.duration_minutes.max(query.interval_minutes);
    let free = free_time(
        &schedule.availability,
        &schedule.unavailability,
        &query.range,
        minimum,
    );
    let slots = partition(
        &free,
        query.interval_minutes,
        query.duration_minutes,
        ctx,
    )?;

    debug!(
        sources = sources.len(),
        available = schedule.availability.len(),
        unavailable = schedule.unavailability.len(),
        free = free.len(),
        slots = slots.len(),
        "computed availability"
    );
    Ok(slots)
}

pub(crate) fn render(query: &Query, slots: &[Interval], ctx: &TimeContext) -> Result<Availability> {
    if query.show_unavailable {
        return flags(query, slots, ctx).map(Availability::Flags);
    }
    if query.normalize {
        return Ok(Availability::ByDay(by_day(slots, ctx)));
    }
    Ok(Availability::Slots(slots.to_vec()))
}

/// Partition the whole range and flag each candidate by whether the same
/// local start appears among the free slots.
fn flags(query: &Query, slots: &[Interval], ctx: &TimeContext) -> Result<DayFlags> {
    let candidates = partition(
        std::slice::from_ref(&query.range),
        query.interval_minutes,
        query.duration_minutes,
        ctx,
    )?;
    let free = group_starts(slots, ctx);

    let mut days = DayFlags::new();
    for candidate in &candidates {
        let local = ctx.local(candidate.from);
        let date = local.format("%Y-%m-%d").to_string();
        let time = local.format("%H:%M").to_string();
        let available = free.get(&date).is_some_and(|times| times.contains(&time));
        days.entry(date)
            .or_default()
            .push(TimeFlag { time, available });
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 12, 17, h, m, 0).unwrap()
    }

    #[test]
    fn inverted_range_is_rejected() {
        let query = Query::new(at(10, 0), at(9, 0));
        let err = compute_availability(&query, &[], &TimeContext::default()).unwrap_err();
        assert_eq!(err.to_string(), "\"to\" must be greater than \"from\"");
    }

    #[test]
    fn empty_result_follows_query_shape() {
        let query = Query::new(at(9, 0), at(10, 0));
        assert_eq!(Availability::empty(&query), Availability::Slots(vec![]));
        assert!(matches!(
            Availability::empty(&query.clone().normalized()),
            Availability::ByDay(_)
        ));
        assert!(matches!(
            Availability::empty(&query.normalized().with_unavailable()),
            Availability::Flags(_)
        ));
    }
}
