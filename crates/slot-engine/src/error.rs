//! Error types for slot-engine operations.
//!
//! Every failure is a validation failure: input is rejected before the
//! pipeline produces anything, so callers never see partial results.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    /// A date-time string could not be parsed. `prefix` carries the context
    /// (e.g. `"unavailability "`) and is empty for top-level fields.
    #[error("{prefix}\"{field}\" must be a valid ISO 8601 string")]
    InvalidDateTime { prefix: String, field: String },

    #[error("{prefix}\"{field}\" must be a time in the format HH:mm")]
    InvalidTime { prefix: String, field: String },

    #[error("{prefix}\"to\" must be greater than \"from\"")]
    RangeOrder { prefix: String },

    #[error("\"{field}\" must be a positive integer")]
    NotPositiveInteger { field: String },

    #[error("interval should evenly partition an hour (got {0} minutes)")]
    InvalidSlice(u32),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid request JSON: {0}")]
    Request(#[from] serde_json::Error),
}

impl ValidationError {
    pub(crate) fn date_time(context: &str, field: &str) -> Self {
        Self::InvalidDateTime {
            prefix: prefix(context),
            field: field.to_string(),
        }
    }

    pub(crate) fn time(context: &str, field: &str) -> Self {
        Self::InvalidTime {
            prefix: prefix(context),
            field: field.to_string(),
        }
    }

    pub(crate) fn range_order(context: &str) -> Self {
        Self::RangeOrder {
            prefix: prefix(context),
        }
    }

    pub(crate) fn not_positive(field: &str) -> Self {
        Self::NotPositiveInteger {
            field: field.to_string(),
        }
    }
}

fn prefix(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("{context} ")
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
