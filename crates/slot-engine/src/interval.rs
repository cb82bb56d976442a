//! The `Interval` value type, its comparison predicates, and range clipping.
//!
//! Intervals hold absolute instants. An interval with `from >= to` is
//! degenerate; every operation in this crate drops degenerate results instead
//! of returning them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An absolute time range with an optional opaque reference carried through
/// every derived interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Interval {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn duration(&self) -> Duration {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Copy of `self` spanning `[from, to)`, keeping the reference.
    pub(crate) fn span(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            reference: self.reference.clone(),
        }
    }
}

/// Stable sort by start, ascending unless `reverse`.
pub fn sort(intervals: &[Interval], reverse: bool) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    if reverse {
        sorted.sort_by(|a, b| b.from.cmp(&a.from));
    } else {
        sorted.sort_by_key(|i| i.from);
    }
    sorted
}

/// True when `a` contains `b`. Endpoints must differ unless `inclusive`.
pub fn is_between(a: &Interval, b: &Interval, inclusive: bool) -> bool {
    if inclusive {
        a.from <= b.from && a.to >= b.to
    } else {
        a.from < b.from && a.to > b.to
    }
}

/// Endpoint equality. Two absent intervals are equal; one absent is not.
pub fn is_equal(a: Option<&Interval>, b: Option<&Interval>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.from == b.from && a.to == b.to,
        (None, None) => true,
        _ => false,
    }
}

/// True when `a` lasts at least as many whole minutes as `b`.
///
/// Absent operands are asymmetric: an absent `a` is never greater, while a
/// present `a` compared to an absent `b` always is. Two absent operands
/// compare as not greater.
pub fn is_greater_or_equal(a: Option<&Interval>, b: Option<&Interval>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.duration().num_minutes() >= b.duration().num_minutes(),
        (a, _) => a.is_some(),
    }
}

/// True when `interval` lasts at least `minutes`.
pub fn is_greater_or_equal_minutes(minutes: u32, interval: &Interval) -> bool {
    interval.duration() >= Duration::minutes(minutes as i64)
}

/// True when the ranges share any time, including full containment either
/// way. Ranges that only touch at an endpoint do not intersect.
pub fn has_intersection(a: &Interval, b: &Interval) -> bool {
    is_between(a, b, false)
        || (a.from >= b.from && a.from < b.to)
        || (a.to > b.from && a.to <= b.to)
}

/// Clip every interval to `range`, dropping those left empty.
pub fn limit_by_range(intervals: &[Interval], range: &Interval) -> Vec<Interval> {
    intervals
        .iter()
        .map(|i| i.span(i.from.max(range.from), i.to.min(range.to)))
        .filter(|i| !i.is_empty())
        .collect()
}
