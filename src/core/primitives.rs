use chrono::{DateTime, Utc};

use crate::core::Timestamp;
use crate::error::{ChartError, ChartResult};

pub const MILLIS_PER_MINUTE: f64 = 60_000.0;
pub const HALF_DAY_MILLIS: f64 = 12.0 * 60.0 * MILLIS_PER_MINUTE;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> Timestamp {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(time: Timestamp) -> ChartResult<DateTime<Utc>> {
    if !time.is_finite() {
        return Err(ChartError::InvalidData("timestamp must be finite".to_owned()));
    }
    DateTime::<Utc>::from_timestamp_millis(time.round() as i64).ok_or_else(|| {
        ChartError::InvalidData(format!("timestamp {time} is out of the supported range"))
    })
}
