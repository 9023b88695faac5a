use crate::types::TimeSettings;

/// Parses a `GTIME` value: `<main time>-<overtime seconds>-<overtime periods>`.
///
/// Returns `None` unless the value has exactly three integer parts.
pub fn parse_time_settings(raw: &str) -> Option<TimeSettings> {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    let [time_limit, overtime, periods] = parts.as_slice() else {
        return None;
    };

    Some(TimeSettings {
        time_limit_seconds: parse_u32(time_limit)?,
        overtime_seconds: parse_u32(overtime)?,
        overtime_periods: parse_u32(periods)?,
    })
}

fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}
