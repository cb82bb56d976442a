//! JSON wire format: loosely typed requests, rendered responses, and the two
//! request-level entry points.
//!
//! Request fields stay as strings (and raw JSON numbers) so that
//! [`crate::validate`] can reject bad input with field-specific messages
//! instead of a generic deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::availability::{compute_availability, Availability, DayFlags};
use crate::context::TimeContext;
use crate::dst::DstPolicy;
use crate::error::Result;
use crate::intersection::compute_intersection;
use crate::interval::Interval;
use crate::partition::DaySlots;
use crate::validate;

/// Range, slotting and formatting options shared by both request kinds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub interval: Option<Value>,
    pub duration: Option<Value>,
    pub normalize: Option<bool>,
    pub show_unavailable: Option<bool>,
    pub date_format: Option<String>,
    pub parse_timezone: Option<String>,
    pub display_timezone: Option<String>,
    pub dst_policy: Option<DstPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityRequest {
    #[serde(flatten)]
    pub query: QueryInput,
    #[serde(default)]
    pub schedule: ScheduleInput,
}

impl AvailabilityRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntersectionRequest {
    #[serde(flatten)]
    pub query: QueryInput,
    #[serde(default)]
    pub schedules: Vec<ScheduleInput>,
}

impl IntersectionRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One schedule as it appears on the wire. Every part is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleInput {
    pub weekdays: Option<TemplateInput>,
    #[serde(alias = "Monday")]
    pub monday: Option<TemplateInput>,
    #[serde(alias = "Tuesday")]
    pub tuesday: Option<TemplateInput>,
    #[serde(alias = "Wednesday")]
    pub wednesday: Option<TemplateInput>,
    #[serde(alias = "Thursday")]
    pub thursday: Option<TemplateInput>,
    #[serde(alias = "Friday")]
    pub friday: Option<TemplateInput>,
    #[serde(alias = "Saturday")]
    pub saturday: Option<TemplateInput>,
    #[serde(alias = "Sunday")]
    pub sunday: Option<TemplateInput>,
    #[serde(default)]
    pub availability: Vec<IntervalInput>,
    #[serde(default)]
    pub unavailability: Vec<UnavailabilityInput>,
    #[serde(default)]
    pub allocated: Vec<AllocationInput>,
    #[serde(default)]
    pub custom_schedule: Vec<DateWindowInput>,
}

/// A day template: `HH:mm` bounds plus blocked sub-windows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateInput {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub unavailability: Vec<TimeWindowInput>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeWindowInput {
    pub from: String,
    pub to: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalInput {
    pub from: String,
    pub to: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateWindowInput {
    pub date: String,
    pub from: String,
    pub to: String,
    pub reference: Option<String>,
}

/// Entries carrying a `date` are date windows; anything else is absolute.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UnavailabilityInput {
    Date(DateWindowInput),
    Interval(IntervalInput),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationInput {
    pub from: String,
    pub duration: Value,
}

/// A rendered interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalOutput {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl IntervalOutput {
    pub fn render(interval: &Interval, ctx: &TimeContext) -> Self {
        Self {
            from: ctx.format_instant(interval.from),
            to: ctx.format_instant(interval.to),
            reference: interval.reference.clone(),
        }
    }
}

/// A response body. Serializes to a bare list or a bare day map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Slots(Vec<IntervalOutput>),
    ByDay(DaySlots),
    Flags(DayFlags),
}

impl Response {
    pub fn render(availability: Availability, ctx: &TimeContext) -> Self {
        match availability {
            Availability::Slots(slots) => Self::Slots(
                slots
                    .iter()
                    .map(|slot| IntervalOutput::render(slot, ctx))
                    .collect(),
            ),
            Availability::ByDay(days) => Self::ByDay(days),
            Availability::Flags(days) => Self::Flags(days),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Slots(slots) => slots.is_empty(),
            Self::ByDay(days) => days.is_empty(),
            Self::Flags(days) => days.is_empty(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validate and run a single-schedule request.
///
/// # Errors
/// The first validation failure, with a message naming the offending field.
pub fn get_availabilities(request: &AvailabilityRequest) -> Result<Response> {
    let ctx = validate::context(&request.query)?;
    let query = validate::query(&request.query, &ctx)?;
    let sources = validate::schedule(&request.schedule, &ctx)?;
    let availability = compute_availability(&query, &sources, &ctx)?;
    Ok(Response::render(availability, &ctx))
}

/// Validate and run a multi-schedule request.
///
/// # Errors
/// The first validation failure across the query and every schedule.
pub fn get_intersection(request: &IntersectionRequest) -> Result<Response> {
    let ctx = validate::context(&request.query)?;
    let query = validate::query(&request.query, &ctx)?;
    let schedules = request
        .schedules
        .iter()
        .map(|schedule| validate::schedule(schedule, &ctx))
        .collect::<Result<Vec<_>>>()?;
    let availability = compute_intersection(&query, &schedules, &ctx)?;
    Ok(Response::render(availability, &ctx))
}
