use chrono::{DateTime, Utc};
use eyre::{eyre, Result};

use super::strings::strip_hex_prefix;

/// Parses a unix timestamp string into a UTC [`DateTime`].
///
/// Block explorers return timestamps either in base 10 or as `0x`-prefixed base 16, so both
/// are accepted and the same number yields the same instant.
///
/// ```
/// use etheroll_common::utils::time::parse_timestamp;
///
/// let decimal = parse_timestamp("1566645978").expect("valid timestamp");
/// let hexadecimal = parse_timestamp("0x5d611eda").expect("valid timestamp");
/// assert_eq!(decimal, hexadecimal);
/// assert_eq!(decimal.to_rfc3339(), "2019-08-24T11:26:18+00:00");
/// ```
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    let trimmed = timestamp.trim();
    let seconds = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        i64::from_str_radix(strip_hex_prefix(trimmed), 16)
    } else {
        trimmed.parse::<i64>()
    }
    .map_err(|e| eyre!("invalid timestamp '{}': {}", timestamp, e))?;

    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| eyre!("timestamp '{}' is out of range", timestamp))
}

/// Formats a [`DateTime`] the way records are displayed, e.g. `2018-04-07 00:23:46`.
///
/// ```
/// use etheroll_common::utils::time::{format_datetime, parse_timestamp};
///
/// let dt = parse_timestamp("1523060626").expect("valid timestamp");
/// assert_eq!(format_datetime(&dt), "2018-04-07 00:23:46");
/// ```
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}
