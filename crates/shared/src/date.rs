use time::OffsetDateTime;

/// Current time as unix seconds.
pub fn now_timestamp() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp().max(0) as u64
}

/// Formats unix seconds as `YYYY-MM-DD HH:MM` in UTC, falling back to the raw number
/// when the value is out of range.
pub fn format_timestamp(timestamp: u64) -> String {
    let Ok(date) = OffsetDateTime::from_unix_timestamp(timestamp as i64) else {
        return timestamp.to_string();
    };

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        date.year(),
        date.month() as u8,
        date.day(),
        date.hour(),
        date.minute()
    )
}
