//! DST transition policies for anchoring wall-clock times to instants.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Policy for local times that fall into a DST gap (e.g. 02:30 on the night
/// clocks spring forward). Ambiguous times (fall back) always resolve to the
/// earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop the occurrence entirely.
    Skip,
    /// Keep the offset in force before the gap, which lands the instant
    /// after the gap by the gap's length (02:30 becomes 03:30).
    #[default]
    ShiftForward,
}

/// Resolve a naive local datetime in `tz` to a UTC instant.
///
/// Returns `None` only for gap times under [`DstPolicy::Skip`].
pub fn resolve_local(tz: &Tz, naive: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => {
                // Gaps never exceed a few hours; three hours back is safely
                // on the pre-transition side.
                let before = tz
                    .from_local_datetime(&(naive - Duration::hours(3)))
                    .earliest()?;
                let offset_secs = before.offset().fix().local_minus_utc();
                let utc = naive.checked_sub_signed(Duration::seconds(offset_secs as i64))?;
                Some(Utc.from_utc_datetime(&utc))
            }
        },
    }
}
