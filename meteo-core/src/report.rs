//! Plain-text rendering of a [`WeatherSnapshot`].

use std::fmt::Write;

use crate::model::{DayNight, WeatherSnapshot, describe_code};

const MISSING: &str = "n/a";

/// Positional label of a forecast day: today, tomorrow, then "N days later".
pub fn day_label(index: usize) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("{n} days later"),
    }
}

pub fn render_current(location_name: &str, snapshot: &WeatherSnapshot) -> String {
    let Some(current) = snapshot.current.as_ref().filter(|c| !c.is_empty()) else {
        return "Result: No temperature information is found.\n".to_string();
    };

    let day_night = current
        .is_day
        .and_then(DayNight::from_flag)
        .map(|d| d.as_str())
        .unwrap_or("Unknown");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Current temperature in {location_name}: {}°C",
        fmt_value(current.temperature_c)
    );
    let _ = writeln!(out, "Feels like: {}°C", fmt_value(current.apparent_temperature_c));
    let _ = writeln!(out, "Relative humidity: {}%", fmt_value(current.humidity_pct));
    let _ = writeln!(out, "Day or night: {day_night}");
    out
}

pub fn render_daily(snapshot: &WeatherSnapshot) -> String {
    let Some(daily) = snapshot.daily.as_ref().filter(|d| !d.is_empty()) else {
        return "Result: No weather information is found.\n".to_string();
    };

    let rule = "-".repeat(10);
    let mut out = String::new();
    let _ = writeln!(out, "{rule} Weekly Report {rule}");

    for (i, (code, date)) in daily.days().enumerate() {
        let _ = writeln!(out, "{} ({date}): {}", day_label(i), describe_code(code));
    }
    out
}

fn fmt_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}
