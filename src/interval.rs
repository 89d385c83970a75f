use regex::Regex;
use std::{sync::LazyLock, time::Duration};

use crate::errors::{Error, Result};

// 一个时长片段：数值 + 单位，例如 `1.5h`、`30m`、`250ms`
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|μs|ms|s|m|h)")
        .expect("Invalid duration component pattern")
});

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

fn unit_nanos(unit: &str) -> f64 {
    match unit {
        "ns" => 1.0,
        "us" | "µs" | "μs" => 1_000.0,
        "ms" => 1_000_000.0,
        "s" => NANOS_PER_SEC,
        "m" => 60.0 * NANOS_PER_SEC,
        // 正则只允许上述单位
        _ => 3600.0 * NANOS_PER_SEC,
    }
}

/// Parses a duration written as a sequence of decimal numbers with unit
/// suffixes, such as `300ms`, `1.5h` or `2h45m`. A bare `0` is accepted.
///
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let unsigned = match input.strip_prefix('-') {
        Some(_) => return Err(Error::invalid_interval(input, "negative durations are not allowed")),
        None => input.strip_prefix('+').unwrap_or(input),
    };

    if unsigned == "0" {
        return Ok(Duration::ZERO);
    }
    if unsigned.is_empty() {
        return Err(Error::invalid_interval(input, "empty duration"));
    }

    let mut rest = unsigned;
    let mut total_nanos = 0.0;
    while !rest.is_empty() {
        let Some(caps) = COMPONENT.captures(rest) else {
            let reason = if rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                format!("missing or unknown unit in '{rest}'")
            } else {
                format!("unexpected '{rest}'")
            };
            return Err(Error::invalid_interval(input, reason));
        };

        let value: f64 = caps[1]
            .parse()
            .map_err(|e| Error::invalid_interval(input, format!("{e}")))?;
        total_nanos += value * unit_nanos(&caps[2]);
        rest = &rest[caps[0].len()..];
    }

    if total_nanos > u64::MAX as f64 {
        return Err(Error::invalid_interval(input, "duration out of range"));
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

/// Like [`parse_duration`], but a scheduling interval must also be positive.
pub fn parse_interval(input: &str) -> Result<Duration> {
    let interval = parse_duration(input)?;
    if interval.is_zero() {
        return Err(Error::invalid_interval(input, "interval must be positive"));
    }

    Ok(interval)
}

/// Formats a duration the same way it is accepted, e.g. `1h30m0s` or `500ms`.
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        return match duration.as_millis() {
            0 => format!("{}ns", duration.as_nanos()),
            millis => format!("{millis}ms"),
        };
    }

    let total_secs = duration.as_secs();
    let (hours, minutes, secs) = (total_secs / 3600, total_secs % 3600 / 60, total_secs % 60);
    let secs = match duration.subsec_millis() {
        0 => secs.to_string(),
        millis => format!("{secs}.{millis:03}").trim_end_matches('0').to_string(),
    };

    if hours > 0 {
        format!("{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{minutes}m{secs}s")
    } else {
        format!("{secs}s")
    }
}
