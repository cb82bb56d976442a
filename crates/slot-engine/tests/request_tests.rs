//! Tests for the JSON request surface: validation messages, output
//! formatting and the legacy entry points.

use serde_json::{json, Value};
use slot_engine::compat::Scheduler;
use slot_engine::request::{
    get_availabilities, get_intersection, AvailabilityRequest, IntersectionRequest, Response,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn availability(body: Value) -> AvailabilityRequest {
    serde_json::from_value(body).unwrap()
}

fn intersection(body: Value) -> IntersectionRequest {
    serde_json::from_value(body).unwrap()
}

fn error_message(body: Value) -> String {
    get_availabilities(&availability(body))
        .unwrap_err()
        .to_string()
}

fn to_value(response: &Response) -> Value {
    serde_json::to_value(response).unwrap()
}

/// A request over Monday 2017-01-23 with the given schedule.
fn with_schedule(schedule: Value) -> Value {
    json!({
        "from": "2017-01-23",
        "to": "2017-01-24",
        "schedule": schedule,
        "interval": 30,
        "duration": 30
    })
}

/// Keep only the available times of a flagged response, dropping empty days.
fn available_times(response: &Value) -> Value {
    let mut days = serde_json::Map::new();
    for (day, flags) in response.as_object().unwrap() {
        let times: Vec<Value> = flags
            .as_array()
            .unwrap()
            .iter()
            .filter(|f| f["available"] == json!(true))
            .map(|f| f["time"].clone())
            .collect();
        if !times.is_empty() {
            days.insert(day.clone(), Value::Array(times));
        }
    }
    Value::Object(days)
}

// ── Range, interval, duration ───────────────────────────────────────────────

#[test]
fn range_bounds_must_parse_and_be_ordered() {
    assert_eq!(
        error_message(json!({"from": "test", "to": "2017-01-24", "schedule": {}, "interval": 30, "duration": 30})),
        "\"from\" must be a valid ISO 8601 string"
    );
    assert_eq!(
        error_message(json!({"from": "2017-01-23", "to": "test", "schedule": {}, "interval": 30, "duration": 30})),
        "\"to\" must be a valid ISO 8601 string"
    );
    assert_eq!(
        error_message(json!({"from": "2017-01-23", "to": "2017-01-23", "schedule": {}, "interval": 30, "duration": 30})),
        "\"to\" must be greater than \"from\""
    );
}

#[test]
fn missing_bounds_fail_validation_not_parsing() {
    assert_eq!(
        error_message(json!({"schedule": {}})),
        "\"from\" must be a valid ISO 8601 string"
    );
}

#[test]
fn interval_and_duration_must_be_whole_minutes() {
    let monday = json!({"monday": {"from": "09:00", "to": "17:00"}});
    for bad in [json!("test"), json!(-5)] {
        let mut body = with_schedule(monday.clone());
        body["interval"] = bad.clone();
        assert_eq!(error_message(body), "\"interval\" must be a positive integer");

        let mut body = with_schedule(monday.clone());
        body["duration"] = bad;
        assert_eq!(error_message(body), "\"duration\" must be a positive integer");
    }
}

// ── Schedule ────────────────────────────────────────────────────────────────

#[test]
fn day_bounds_must_be_clock_times() {
    assert_eq!(
        error_message(with_schedule(json!({"monday": {"from": "test", "to": "10:00"}}))),
        "monday: \"from\" must be a time in the format HH:mm"
    );
    assert_eq!(
        error_message(with_schedule(json!({"monday": {"from": "09:00", "to": "test"}}))),
        "monday: \"to\" must be a time in the format HH:mm"
    );
    assert_eq!(
        error_message(with_schedule(json!({"weekdays": {"from": "9am", "to": "17:00"}}))),
        "weekdays: \"from\" must be a time in the format HH:mm"
    );
}

#[test]
fn equal_day_bounds_are_accepted_as_a_wrap() {
    let body = with_schedule(json!({"monday": {"from": "09:00", "to": "09:00"}}));
    assert!(get_availabilities(&availability(body)).is_ok());
}

#[test]
fn day_unavailability_must_be_clock_times() {
    let schedule = |from: &str, to: &str| {
        json!({"monday": {"from": "09:00", "to": "17:00", "unavailability": [{"from": from, "to": to}]}})
    };
    assert_eq!(
        error_message(with_schedule(schedule("test", "13:00"))),
        "monday: unavailability \"from\" must be a time in the format HH:mm"
    );
    assert_eq!(
        error_message(with_schedule(schedule("12:00", "test"))),
        "monday: unavailability \"to\" must be a time in the format HH:mm"
    );
}

#[test]
fn absolute_unavailability_must_parse_and_be_ordered() {
    let schedule = |from: &str, to: &str| json!({"unavailability": [{"from": from, "to": to}]});
    assert_eq!(
        error_message(with_schedule(schedule("test", "2017-01-23 13:00"))),
        "unavailability \"from\" must be a valid ISO 8601 string"
    );
    assert_eq!(
        error_message(with_schedule(schedule("2017-01-23 10:00", "test"))),
        "unavailability \"to\" must be a valid ISO 8601 string"
    );
    assert_eq!(
        error_message(with_schedule(schedule("2017-01-23 10:00", "2017-01-23 09:00"))),
        "unavailability \"to\" must be greater than \"from\""
    );
}

#[test]
fn dated_unavailability_must_parse() {
    let schedule = |date: &str, from: &str, to: &str| {
        json!({"unavailability": [{"date": date, "from": from, "to": to}]})
    };
    assert_eq!(
        error_message(with_schedule(schedule("test", "12:00", "13:00"))),
        "unavailability \"date\" must be a valid ISO 8601 string"
    );
    assert_eq!(
        error_message(with_schedule(schedule("2017-01-23", "test", "13:00"))),
        "unavailability \"from\" must be a time in the format HH:mm"
    );
    assert_eq!(
        error_message(with_schedule(schedule("2017-01-23", "10:00", "test"))),
        "unavailability \"to\" must be a time in the format HH:mm"
    );
}

#[test]
fn allocations_must_parse() {
    let schedule = |from: &str, duration: i64| {
        json!({"monday": {"from": "09:00", "to": "17:00"}, "allocated": [{"from": from, "duration": duration}]})
    };
    assert_eq!(
        error_message(with_schedule(schedule("test", 60))),
        "\"allocated.from\" must be a valid ISO 8601 string"
    );
    assert_eq!(
        error_message(with_schedule(schedule("2017-01-23 10:00", -1))),
        "\"allocated.duration\" must be a positive integer"
    );
}

#[test]
fn custom_and_explicit_availability_are_validated() {
    assert_eq!(
        error_message(with_schedule(json!({
            "custom_schedule": [{"date": "2017-01-23", "from": "14:00", "to": "13:00"}]
        }))),
        "custom_schedule \"to\" must be greater than \"from\""
    );
    assert_eq!(
        error_message(with_schedule(json!({
            "availability": [{"from": "2017-01-23T10:00:00Z", "to": "nope"}]
        }))),
        "availability \"to\" must be a valid ISO 8601 string"
    );
}

#[test]
fn unknown_zone_and_bad_format_are_rejected() {
    let mut body = with_schedule(json!({}));
    body["parseTimezone"] = json!("Mars/Olympus");
    assert_eq!(error_message(body), "Invalid timezone: Mars/Olympus");

    let mut body = with_schedule(json!({}));
    body["dateFormat"] = json!("%Q");
    assert_eq!(error_message(body), "Invalid date format: %Q");
}

// ── Output ──────────────────────────────────────────────────────────────────

#[test]
fn plain_output_formats_instants() {
    let body = with_schedule(json!({"monday": {"from": "09:00", "to": "10:00"}}));
    let response = get_availabilities(&availability(body)).unwrap();
    assert_eq!(
        to_value(&response),
        json!([
            {"from": "2017-01-23T09:00:00+00:00", "to": "2017-01-23T09:30:00+00:00"},
            {"from": "2017-01-23T09:30:00+00:00", "to": "2017-01-23T10:00:00+00:00"}
        ])
    );
}

#[test]
fn display_zone_and_format_apply_to_output_only() {
    let mut body = with_schedule(json!({"monday": {"from": "09:00", "to": "09:30"}}));
    body["parseTimezone"] = json!("America/New_York");
    body["from"] = json!("2017-01-23T00:00");
    body["to"] = json!("2017-01-24T00:00");
    body["displayTimezone"] = json!("Europe/Paris");
    body["dateFormat"] = json!("%Y-%m-%d %H:%M");

    let response = get_availabilities(&availability(body)).unwrap();
    assert_eq!(
        to_value(&response),
        json!([{"from": "2017-01-23 15:00", "to": "2017-01-23 15:30"}])
    );
}

#[test]
fn references_reach_the_output() {
    let body = with_schedule(json!({
        "availability": [{"from": "2017-01-23T09:00:00Z", "to": "2017-01-23T09:30:00Z", "reference": "room-1"}]
    }));
    let response = get_availabilities(&availability(body)).unwrap();
    assert_eq!(to_value(&response)[0]["reference"], json!("room-1"));
}

#[test]
fn grouped_output_is_a_day_map() {
    let mut body = with_schedule(json!({
        "Monday": {"from": "09:00", "to": "10:00"}
    }));
    body["normalize"] = json!(true);
    let response = get_availabilities(&availability(body)).unwrap();
    assert_eq!(to_value(&response), json!({"2017-01-23": ["09:00", "09:30"]}));
}

#[test]
fn intersection_request_end_to_end() {
    let body = json!({
        "from": "2017-01-23",
        "to": "2017-01-24",
        "interval": 30,
        "duration": 30,
        "normalize": true,
        "schedules": [
            {"monday": {"from": "09:00", "to": "12:00"}},
            {"monday": {"from": "10:00", "to": "13:00"}, "allocated": [{"from": "2017-01-23T10:30:00Z", "duration": 30}]}
        ]
    });
    let response = get_intersection(&intersection(body)).unwrap();
    assert_eq!(
        to_value(&response),
        json!({"2017-01-23": ["10:00", "11:00", "11:30"]})
    );
}

#[test]
fn intersection_validates_every_schedule() {
    let body = json!({
        "from": "2017-01-23",
        "to": "2017-01-24",
        "schedules": [
            {"monday": {"from": "09:00", "to": "12:00"}},
            {"tuesday": {"from": "bad", "to": "12:00"}}
        ]
    });
    let err = get_intersection(&intersection(body)).unwrap_err();
    assert_eq!(err.to_string(), "tuesday: \"from\" must be a time in the format HH:mm");
}

#[test]
fn malformed_json_is_a_request_error() {
    let err = AvailabilityRequest::from_json("{not json").unwrap_err();
    assert!(err.to_string().starts_with("Invalid request JSON"));
}

// ── Legacy surface ──────────────────────────────────────────────────────────

#[test]
fn legacy_availability_defaults_to_flags() {
    let body = with_schedule(json!({
        "monday": {"from": "09:00", "to": "10:30", "unavailability": [{"from": "09:30", "to": "10:00"}]}
    }));
    let response = Scheduler::new().get_availability(availability(body)).unwrap();
    let value = to_value(&response);

    assert_eq!(value["2017-01-23"].as_array().unwrap().len(), 48);
    assert_eq!(
        available_times(&value),
        json!({"2017-01-23": ["09:00", "10:00"]})
    );
}

#[test]
fn legacy_defaults_yield_to_explicit_flags() {
    let mut body = with_schedule(json!({"monday": {"from": "09:00", "to": "10:00"}}));
    body["normalize"] = json!(false);
    body["showUnavailable"] = json!(false);
    let response = Scheduler::new().get_availability(availability(body)).unwrap();
    assert!(matches!(response, Response::Slots(ref slots) if slots.len() == 2));
}

#[test]
fn legacy_intersection_defaults_to_grouped() {
    let body = json!({
        "from": "2017-01-23",
        "to": "2017-01-24",
        "interval": 60,
        "duration": 60,
        "schedules": [
            {"weekdays": {"from": "09:00", "to": "12:00"}},
            {"monday": {"from": "11:00", "to": "17:00"}}
        ]
    });
    let response = Scheduler::new().get_intersection(intersection(body)).unwrap();
    assert_eq!(to_value(&response), json!({"2017-01-23": ["11:00"]}));
}
