//! Timetable expansion: anchors recurring wall-clock templates onto the
//! calendar days of a query range.
//!
//! Every day whose local date falls between the local dates of `range.from`
//! and `range.to` (inclusive) is visited in the context timezone. Windows are
//! anchored on that day (ending the next day when they wrap midnight), clipped
//! to the range, and dropped when nothing is left.

use chrono::Datelike;
use tracing::trace;

use crate::context::TimeContext;
use crate::interval::Interval;
use crate::timetable::{TimeWindow, Timetable};

/// Concrete availability and unavailability derived from schedule sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub availability: Vec<Interval>,
    pub unavailability: Vec<Interval>,
}

/// Expand `timetable` over `range`.
///
/// Every emitted interval lies within `[range.from, range.to]` and is
/// non-empty. Both lists are in day order.
pub fn expand(timetable: &Timetable, range: &Interval, ctx: &TimeContext) -> Schedule {
    let mut schedule = Schedule::default();
    if timetable.is_empty() {
        return schedule;
    }

    let first = ctx.local_date(range.from);
    let days = (ctx.local_date(range.to) - first).num_days() + 1;
    if days <= 0 {
        return schedule;
    }

    for date in first.iter_days().take(days as usize) {
        let Some(template) = timetable.template_for(date.weekday()) else {
            continue;
        };

        let available = template
            .window
            .as_ref()
            .and_then(|w| anchor(w, date, range, ctx));
        let blocked: Vec<Interval> = template
            .unavailability
            .iter()
            .filter_map(|w| anchor(w, date, range, ctx))
            .collect();

        trace!(
            %date,
            available = available.is_some(),
            blocked = blocked.len(),
            "expanded timetable day"
        );

        schedule.availability.extend(available);
        schedule.unavailability.extend(blocked);
    }

    schedule
}

/// Pin `window` to local `date` and clip it to `range`.
fn anchor(
    window: &TimeWindow,
    date: chrono::NaiveDate,
    range: &Interval,
    ctx: &TimeContext,
) -> Option<Interval> {
    let end_date = if window.wraps_midnight() {
        date.succ_opt()?
    } else {
        date
    };

    let from = ctx.anchor(date, window.from)?.max(range.from);
    let to = ctx.anchor(end_date, window.to)?.min(range.to);

    (from < to).then(|| Interval {
        from,
        to,
        reference: window.reference.clone(),
    })
}
