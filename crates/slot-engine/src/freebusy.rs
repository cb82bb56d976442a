//! Set operations over interval lists: intersection, subtraction, and the
//! free-time computation built from them.
//!
//! Both set operations sort their inputs by start first, so the result does
//! not depend on input order.

use std::cmp::Ordering;

use crate::interval::{self, has_intersection, is_between, Interval};

/// Geometric intersection of two interval lists.
///
/// Two-pointer sweep over both lists sorted by start. Each overlapping pair
/// yields `[max(from), min(to))`; the reference comes from `a` when it has
/// one, otherwise from `b`. Output is sorted by start, and swapping the
/// operands changes at most the references.
pub fn intersect(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let a = interval::sort(a, false);
    let b = interval::sort(b, false);

    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (left, right) = (&a[i], &b[j]);
        let from = left.from.max(right.from);
        let to = left.to.min(right.to);
        if from < to {
            result.push(Interval {
                from,
                to,
                reference: left.reference.clone().or_else(|| right.reference.clone()),
            });
        }

        // Whichever ends first cannot overlap anything further on the other
        // side. Equal ends retire both so the sweep is symmetric.
        match left.to.cmp(&right.to) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    result
}

/// Remove from every interval in `targets` the parts covered by `cutters`.
///
/// Targets are processed in start order. For each one, only the run of sorted
/// cutters that can reach it is folded in, always against the last remaining
/// fragment (cutters are sorted, so earlier fragments are already clear).
pub fn subtract(targets: &[Interval], cutters: &[Interval]) -> Vec<Interval> {
    let mut targets = interval::sort(targets, false);
    targets.retain(|t| !t.is_empty());
    if cutters.is_empty() {
        return targets;
    }
    let cutters = interval::sort(cutters, false);

    let mut result = Vec::with_capacity(targets.len());
    for target in &targets {
        let slice = overlapping_run(&cutters, target);
        let mut remainder = vec![target.clone()];
        for cutter in slice {
            if let Some(last) = remainder.pop() {
                remainder.extend(subtract_one(&last, cutter));
            }
        }
        result.extend(remainder);
    }

    result
}

/// The contiguous run of start-sorted `cutters` that may overlap `target`:
/// from the first cutter ending after the target starts, up to the last
/// cutter starting before the target ends.
fn overlapping_run<'a>(cutters: &'a [Interval], target: &Interval) -> &'a [Interval] {
    let end = cutters.partition_point(|c| c.from < target.to);
    let start = cutters[..end]
        .iter()
        .position(|c| c.to > target.from)
        .unwrap_or(end);
    &cutters[start..end]
}

/// Subtract one cutter from one fragment, yielding zero, one or two pieces.
fn subtract_one(a: &Interval, b: &Interval) -> Vec<Interval> {
    // The cutter covers the whole fragment.
    if is_between(b, a, true) {
        return Vec::new();
    }
    if !has_intersection(a, b) {
        return vec![a.clone()];
    }

    let pieces = if is_between(a, b, true) {
        vec![a.span(a.from, b.from), a.span(b.to, a.to)]
    } else {
        let from = if a.from < b.from { a.from } else { b.to };
        let to = if a.to > b.to { a.to } else { b.from };
        vec![a.span(from, to)]
    };

    pieces.into_iter().filter(|p| !p.is_empty()).collect()
}

/// Free time inside `range`: `availability` clipped to the range, minus
/// `unavailability`, keeping only pieces at least `minimum_minutes` long.
pub fn free_time(
    availability: &[Interval],
    unavailability: &[Interval],
    range: &Interval,
    minimum_minutes: u32,
) -> Vec<Interval> {
    subtract(&interval::limit_by_range(availability, range), unavailability)
        .into_iter()
        .filter(|i| interval::is_greater_or_equal_minutes(minimum_minutes, i))
        .collect()
}

