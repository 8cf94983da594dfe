//! Aggregation periods: parsing and timestamp alignment.

use crate::utils::config::PERIOD_ANCHOR_OFFSET_SECS;
use crate::utils::error::GasError;
use chrono::DateTime;
use std::time::Duration;

/// Parse a human readable period such as `1week`, `7days` or `1d 12h`
pub fn parse_period(value: &str) -> Result<Duration, GasError> {
    let period = humantime::parse_duration(value.trim())
        .map_err(|e| GasError::InvalidInput(format!("Invalid period value '{}': {}", value, e)))?;

    period_secs(period)?;
    Ok(period)
}

/// Whole seconds of a period; zero and fractional periods are rejected
pub fn period_secs(period: Duration) -> Result<i64, GasError> {
    if period.as_secs() == 0 || period.subsec_nanos() != 0 {
        return Err(GasError::InvalidInput(format!(
            "period must be a positive whole number of seconds, got {:?}",
            period
        )));
    }

    i64::try_from(period.as_secs())
        .map_err(|_| GasError::InvalidInput(format!("period too large: {:?}", period)))
}

/// Start of the period containing `ts`.
///
/// Periods are anchored at `-PERIOD_ANCHOR_OFFSET_SECS`, so weekly periods
/// start on Sunday 23:00 UTC regardless of the first timestamp.
pub fn round_ts(ts: i64, period_secs: i64) -> i64 {
    ts - (ts + PERIOD_ANCHOR_OFFSET_SECS).rem_euclid(period_secs)
}

/// Render a Unix timestamp as an RFC 3339 UTC date
pub fn format_ts(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}
