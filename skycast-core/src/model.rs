use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One coordinate reading for the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One day of the fetched forecast.
///
/// Carries exactly what the board renders: the day's timestamp, the
/// daytime temperature, and the leading weather descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub timestamp: DateTime<Utc>,
    pub temp_day_c: f64,
    pub category: String,
    pub description: String,
}
