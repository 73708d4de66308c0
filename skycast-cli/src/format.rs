//! Label formatting and the category-to-glyph tables.

use chrono::{DateTime, Datelike, Utc};

/// Three-letter weekday labels, indexed by days since Sunday.
const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Zero-padded "MM / DD" label for a forecast timestamp.
pub fn month_day(ts: DateTime<Utc>) -> String {
    format!("{:02} / {:02}", ts.month(), ts.day())
}

/// Three-letter weekday abbreviation.
pub fn weekday(ts: DateTime<Utc>) -> &'static str {
    WEEKDAYS[ts.weekday().num_days_from_sunday() as usize]
}

/// Rounded daytime temperature with the degree-Celsius suffix.
pub fn temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// Primary icon table: the common forecast categories.
pub fn primary_icon(category: &str) -> Option<&'static str> {
    match category {
        "Clear" => Some("☀"),
        "Rain" => Some("🌧"),
        "Clouds" => Some("☁"),
        "Thunderstorm" => Some("⛈"),
        "Drizzle" => Some("🌦"),
        "Snow" => Some("❄"),
        "Squall" => Some("🌧"),
        _ => None,
    }
}

/// Secondary icon table: the atmospheric categories, consulted only
/// when the primary table has no entry.
pub fn secondary_icon(category: &str) -> Option<&'static str> {
    match category {
        "Mist" | "Haze" | "Fog" => Some("🌫"),
        "Smoke" | "Dust" | "Sand" | "Ash" => Some("😷"),
        "Tornado" => Some("🌪"),
        _ => None,
    }
}

/// Glyph for a category: primary table first, then secondary. A
/// category listed in neither renders blank.
pub fn icon(category: &str) -> &'static str {
    primary_icon(category)
        .or_else(|| secondary_icon(category))
        .unwrap_or(" ")
}
