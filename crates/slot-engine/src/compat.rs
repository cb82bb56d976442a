//! Legacy call surface with the older output defaults.
//!
//! Older callers expect per-day output without asking for it: availability
//! defaults to the flagged per-day view and intersection to grouped start
//! times. Explicit flags in the request still win.

use crate::error::Result;
use crate::request::{
    get_availabilities, get_intersection, AvailabilityRequest, IntersectionRequest, Response,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Self
    }

    /// Availability with `normalize` and `showUnavailable` defaulting to on.
    pub fn get_availability(&self, mut request: AvailabilityRequest) -> Result<Response> {
        request.query.normalize.get_or_insert(true);
        request.query.show_unavailable.get_or_insert(true);
        get_availabilities(&request)
    }

    /// Intersection with `normalize` defaulting to on.
    pub fn get_intersection(&self, mut request: IntersectionRequest) -> Result<Response> {
        request.query.normalize.get_or_insert(true);
        get_intersection(&request)
    }
}
