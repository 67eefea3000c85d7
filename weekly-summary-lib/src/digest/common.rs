//! Small formatting helpers shared by the section renderers.

use chrono::{DateTime, Utc};

const ROBOT_PREFIX: &str = "🤖";

/// Pick the singular noun for exactly one item, the plural otherwise.
pub const fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Format a date the way the digest shows it, e.g. `March 1, 2024`.
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// Strip a leading robot emoji, and the whitespace after it, from a commit subject.
pub fn clean_subject(subject: &str) -> &str {
    subject.strip_prefix(ROBOT_PREFIX).map_or(subject, str::trim_start)
}

/// Treat blank text the same as missing text.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
