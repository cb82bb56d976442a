//! # slot-engine
//!
//! Deterministic bookable-slot availability for scheduling agents.
//!
//! Recurring weekly or per-day timetables, date-specific overrides, explicit
//! availability, unavailability and existing bookings are combined over a
//! query range, reduced to free time, and cut into aligned slots of a fixed
//! duration. Every call takes an explicit [`TimeContext`]; nothing reads a
//! process-wide timezone.
//!
//! ## Modules
//!
//! - [`interval`]: the `Interval` type, predicates and range clipping
//! - [`freebusy`]: interval intersection, subtraction and free time
//! - [`partition`]: slicing free time into slots, grouping by day
//! - [`timetable`] / [`expander`]: recurring templates and their expansion
//! - [`source`] / [`conflict`]: schedule sources and precedence merging
//! - [`availability`] / [`intersection`]: the end-to-end pipelines
//! - [`request`] / [`validate`]: JSON wire format and input validation
//! - [`compat`]: legacy entry points with older output defaults
//! - [`context`] / [`dst`]: timezone handling
//! - [`error`]: Error types

pub mod availability;
pub mod compat;
pub mod conflict;
pub mod context;
pub mod dst;
pub mod error;
pub mod expander;
pub mod freebusy;
pub mod intersection;
pub mod interval;
pub mod partition;
pub mod request;
pub mod source;
pub mod timetable;
pub mod validate;

pub use availability::{compute_availability, Availability, DayFlags, Query, TimeFlag};
pub use compat::Scheduler;
pub use context::TimeContext;
pub use dst::DstPolicy;
pub use error::{Result, ValidationError};
pub use intersection::compute_intersection;
pub use interval::Interval;
pub use partition::DaySlots;
pub use request::{
    get_availabilities, get_intersection, AvailabilityRequest, IntersectionRequest, Response,
};
pub use source::{Allocation, DateWindow, ScheduleSource, Unavailability};
pub use timetable::{DayTemplate, TimeWindow, Timetable};
