use chrono::DateTime;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Format an x-axis timestamp according to the visible time span, in UTC.
///
/// - `span < 2 days` -> `HH:MM`
/// - `span < 1 year` -> `DD.MM`
/// - otherwise -> `MM.YYYY`
pub fn format_time_label(timestamp_ms: i64, span_ms: i64) -> String {
    let Some(date) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    if span_ms < 2 * DAY_MS {
        date.format("%H:%M").to_string()
    } else if span_ms < 365 * DAY_MS {
        date.format("%d.%m").to_string()
    } else {
        date.format("%m.%Y").to_string()
    }
}

/// Full UTC timestamp for log lines
pub fn format_log_time(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(date) => date.format("%Y-%m-%d %H:%M:%S,%3f").to_string(),
        None => timestamp_ms.to_string(),
    }
}
