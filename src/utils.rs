use chrono::{DateTime, Utc};

pub fn fmt_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn fmt_time(dt: DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}

/// First `n` characters of a content-addressed id.
pub fn short_id(id: &str, n: usize) -> &str {
    id.char_indices().nth(n).map_or(id, |(i, _)| &id[..i])
}
