//! Clock and text helpers shared by pages and auth

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns current Unix time in whole seconds.
///
/// Clocks set before the epoch report zero rather than failing.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

/// Converts a filesystem timestamp to Unix seconds.
pub fn system_time_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

/// Formats Unix timestamp as human readable relative time
///
/// Converts Unix epoch seconds to relative time strings like "5 min ago"
/// or "2 weeks ago", measured against `now`. Timestamps after `now` are
/// treated as "just now".
///
/// # Arguments
///
/// * `seconds`: Unix timestamp in seconds since epoch
/// * `now`: Reference time in seconds since epoch
pub fn format_relative(seconds: u64, now: u64) -> String {
    let secs = now.saturating_sub(seconds);
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Shortens text to at most `max_chars` characters, appending an ellipsis
/// when anything was cut.
///
/// Cuts on a word boundary when one exists in the kept prefix.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let kept = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };

    format!("{}…", kept.trim_end())
}
