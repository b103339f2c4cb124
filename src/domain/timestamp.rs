use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::TimestampError;

/// Parse an authoring date of the form `"1700000000 -0500"` into an instant.
///
/// The offset is subtracted from the epoch instant, so `-0500` moves the
/// result five hours later. That is a local-time style computation and
/// probably unintentional; reports depend on the exact values, so keep it.
pub fn parse_author_date(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let mut parts = raw.split_whitespace();
    let (epoch, offset) = match (parts.next(), parts.next(), parts.next()) {
        (Some(e), Some(o), None) => (e, o),
        _ => return Err(TimestampError::Shape(raw.to_string())),
    };

    let seconds: i64 = epoch
        .parse()
        .map_err(|_| TimestampError::Epoch(epoch.to_string()))?;
    let offset = parse_offset(offset)?;

    let instant = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| TimestampError::OutOfRange(raw.to_string()))?;

    instant
        .checked_sub_signed(offset)
        .ok_or_else(|| TimestampError::OutOfRange(raw.to_string()))
}

/// `+HHMM` / `-HHMM` to a signed duration. The sign applies to both fields.
fn parse_offset(raw: &str) -> Result<Duration, TimestampError> {
    let bad = || TimestampError::Offset(raw.to_string());

    let bytes = raw.as_bytes();
    if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
        return Err(bad());
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(bad()),
    };

    let hours: i64 = raw[1..3].parse().map_err(|_| bad())?;
    let minutes: i64 = raw[3..5].parse().map_err(|_| bad())?;
    Ok(Duration::hours(sign * hours) + Duration::minutes(sign * minutes))
}
