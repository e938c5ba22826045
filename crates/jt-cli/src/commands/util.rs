//! Shared utilities for CLI commands.

use jt_core::ClockTime;

/// Formats minutes as duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
pub fn format_duration(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats a start/end pair as `HH:MM-HH:MM`.
pub fn format_span(start: ClockTime, end: ClockTime) -> String {
    format!("{start}-{end}")
}
