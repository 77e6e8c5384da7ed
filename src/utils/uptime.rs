//! Human-readable process uptime.

use std::time::Duration;

/// Format a duration as `"{d} days, {h} hours, {m} minutes, and {s} seconds"`.
///
/// Sub-second precision is dropped.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, remainder) = (total / 3600, total % 3600);
    let (minutes, seconds) = (remainder / 60, remainder % 60);
    let (days, hours) = (hours / 24, hours % 24);

    format!(
        "{} days, {} hours, {} minutes, and {} seconds",
        days, hours, minutes, seconds
    )
}
