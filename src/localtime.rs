//! India Standard Time conversions.
//!
//! Operational tables store creation times as epoch milliseconds; the
//! dashboard stores calendar dates/timestamps local to the deployment
//! timezone (IST, UTC+05:30, no DST).

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn ist() -> FixedOffset {
    // UTC+05:30 is always within FixedOffset's valid range.
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is valid")
}

/// Current wall-clock time in IST, as stored in `createdtime`.
pub fn ist_now() -> NaiveDateTime {
    Utc::now().with_timezone(&ist()).naive_local()
}

/// Convert an epoch-millisecond value into an IST-local date/time.
///
/// Returns `None` for out-of-range values rather than erroring; callers
/// treat that the same as a missing metric.
pub fn ist_from_epoch_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&ist()).naive_local())
}
