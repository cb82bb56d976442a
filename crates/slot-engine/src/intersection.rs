//! Slots that are free in every one of several schedules.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::availability::{available_slots, check_query, render, Availability, Query};
use crate::context::TimeContext;
use crate::error::Result;
use crate::interval::Interval;
use crate::source::ScheduleSource;

/// Run the availability pipeline once per schedule and keep the first
/// schedule's slots whose start is free in all the others.
///
/// No schedules yields an empty result; a single schedule yields its own
/// availability.
pub fn compute_intersection(
    query: &Query,
    schedules: &[Vec<ScheduleSource>],
    ctx: &TimeContext,
) -> Result<Availability> {
    check_query(query)?;
    if schedules.is_empty() {
        return Ok(Availability::empty(query));
    }

    let per_schedule = schedules
        .iter()
        .map(|sources| available_slots(query, sources, ctx))
        .collect::<Result<Vec<_>>>()?;
    let slots = common_slots(per_schedule);

    debug!(
        schedules = schedules.len(),
        slots = slots.len(),
        "intersected schedules"
    );
    render(query, &slots, ctx)
}

/// Slots of the first set whose start instant occurs in every other set.
pub fn common_slots(sets: Vec<Vec<Interval>>) -> Vec<Interval> {
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Vec::new();
    };

    sets.fold(first, |kept, other| {
        let starts: HashSet<DateTime<Utc>> = other.iter().map(|slot| slot.from).collect();
        kept.into_iter()
            .filter(|slot| starts.contains(&slot.from))
            .collect()
    })
}
