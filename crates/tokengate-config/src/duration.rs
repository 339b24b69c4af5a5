//! Token lifetime parsing.
//!
//! Lifetimes are humantime strings such as `30s`, `15m`, `1h`, `7d` or
//! `1h 30m`. A bare number is read as seconds.

/// Parses a lifetime into whole seconds.
///
/// Returns `None` for empty or unparseable input, for lifetimes shorter than
/// one second, and for values that do not fit in an `i64`.
pub fn parse_duration_secs(value: &str) -> Option<i64> {
    let value = value.trim();

    if let Ok(secs) = value.parse::<i64>() {
        return Some(secs).filter(|secs| *secs > 0);
    }

    let duration = humantime::parse_duration(value).ok()?;
    i64::try_from(duration.as_secs())
        .ok()
        .filter(|secs| *secs > 0)
}
