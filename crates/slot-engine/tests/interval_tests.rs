//! Tests for interval predicates and range clipping.

use slot_engine::interval::{
    has_intersection, is_between, is_equal, is_greater_or_equal, is_greater_or_equal_minutes,
    limit_by_range, sort, Interval,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn iv(from: &str, to: &str) -> Interval {
    Interval::new(from.parse().unwrap(), to.parse().unwrap())
}

fn at(hm: &str) -> String {
    format!("2018-12-14T{hm}:00Z")
}

fn day(from: &str, to: &str) -> Interval {
    iv(&at(from), &at(to))
}

// ── is_between ──────────────────────────────────────────────────────────────

#[test]
fn strict_containment_requires_distinct_endpoints() {
    let outer = day("12:00", "16:00");
    assert!(is_between(&outer, &day("13:00", "15:00"), false));
    assert!(!is_between(&outer, &day("12:00", "15:00"), false));
    assert!(!is_between(&outer, &outer, false));
}

#[test]
fn inclusive_containment_accepts_shared_endpoints() {
    let outer = day("12:00", "16:00");
    assert!(is_between(&outer, &day("12:00", "15:00"), true));
    assert!(is_between(&outer, &outer, true));
    assert!(!is_between(&outer, &day("11:00", "15:00"), true));
}

// ── is_equal / is_greater_or_equal ──────────────────────────────────────────

#[test]
fn equality_compares_endpoints_only() {
    let a = day("12:00", "13:00").with_reference("A");
    let b = day("12:00", "13:00").with_reference("B");
    assert!(is_equal(Some(&a), Some(&b)));
    assert!(!is_equal(Some(&a), Some(&day("12:00", "13:01"))));
    assert!(is_equal(None, None));
    assert!(!is_equal(Some(&a), None));
    assert!(!is_equal(None, Some(&a)));
}

#[test]
fn greater_or_equal_compares_whole_minutes() {
    let hour = day("12:00", "13:00");
    let half = day("12:00", "12:30");
    assert!(is_greater_or_equal(Some(&hour), Some(&half)));
    assert!(is_greater_or_equal(Some(&hour), Some(&day("15:00", "16:00"))));
    assert!(!is_greater_or_equal(Some(&half), Some(&hour)));
}

#[test]
fn greater_or_equal_with_absent_operands() {
    let hour = day("12:00", "13:00");
    assert!(is_greater_or_equal(Some(&hour), None));
    assert!(!is_greater_or_equal(None, Some(&hour)));
    assert!(!is_greater_or_equal(None, None));
}

#[test]
fn minimum_length_check_is_inclusive() {
    let half = day("12:00", "12:30");
    assert!(is_greater_or_equal_minutes(30, &half));
    assert!(is_greater_or_equal_minutes(0, &half));
    assert!(!is_greater_or_equal_minutes(31, &half));
}

// ── has_intersection ────────────────────────────────────────────────────────

#[test]
fn overlap_in_every_arrangement() {
    let a = day("12:00", "16:00");
    assert!(has_intersection(&a, &day("13:00", "19:00")), "tail overlap");
    assert!(has_intersection(&a, &day("10:00", "14:00")), "head overlap");
    assert!(has_intersection(&a, &day("13:00", "15:00")), "contains");
    assert!(has_intersection(&a, &day("10:00", "18:00")), "contained");
    assert!(has_intersection(&a, &a), "identical");
}

#[test]
fn touching_ranges_do_not_intersect() {
    let a = day("12:00", "16:00");
    assert!(!has_intersection(&a, &day("16:00", "18:00")));
    assert!(!has_intersection(&a, &day("10:00", "12:00")));
    assert!(!has_intersection(&a, &day("17:00", "18:00")));
}

// ── sort / limit_by_range ───────────────────────────────────────────────────

#[test]
fn sort_is_stable_and_reversible() {
    let a = day("12:00", "13:00").with_reference("A");
    let b = day("09:00", "10:00");
    let c = day("12:00", "14:00").with_reference("C");
    let sorted = sort(&[a.clone(), b.clone(), c.clone()], false);
    assert_eq!(sorted, vec![b.clone(), a.clone(), c.clone()]);

    let reversed = sort(&[a.clone(), b.clone(), c.clone()], true);
    assert_eq!(reversed[2], b);
    assert_eq!(reversed[0].reference.as_deref(), Some("A"));
}

#[test]
fn limit_clips_to_range_and_drops_outside() {
    let range = day("12:00", "18:00");
    let intervals = vec![
        day("10:00", "13:00").with_reference("A"),
        day("14:00", "15:00"),
        day("17:00", "20:00"),
        day("08:00", "09:00"),
        day("18:00", "19:00"),
    ];

    let limited = limit_by_range(&intervals, &range);

    assert_eq!(
        limited,
        vec![
            day("12:00", "13:00").with_reference("A"),
            day("14:00", "15:00"),
            day("17:00", "18:00"),
        ]
    );
}

#[test]
fn limit_with_range_across_offsets() {
    let range = iv("2018-12-14T10:00:00-02:00", "2018-12-14T14:00:00-02:00");
    let limited = limit_by_range(&[day("11:00", "15:00")], &range);
    assert_eq!(limited, vec![day("12:00", "15:00")]);
}
