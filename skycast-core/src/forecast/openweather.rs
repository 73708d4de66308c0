use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinates, DailyForecast};

use super::ForecastProvider;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: OPENWEATHER_URL.to_string(),
        }
    }

    /// Point the provider at a different host. Used by tests.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    day: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwDaily {
    dt: i64,
    temp: OwDailyTemp,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    daily: Vec<OwDaily>,
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn daily_forecast(&self, coords: &Coordinates) -> Result<Vec<DailyForecast>> {
        let url = format!("{}/data/2.5/onecall", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (one call)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwOneCallResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather JSON")?;

        let days = parsed
            .daily
            .into_iter()
            .map(daily_from_wire)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("fetched {} daily entries", days.len());
        Ok(days)
    }
}

fn daily_from_wire(entry: OwDaily) -> Result<DailyForecast> {
    let timestamp = unix_to_utc(entry.dt)
        .ok_or_else(|| anyhow!("Daily entry carried out-of-range timestamp {}", entry.dt))?;

    let (category, description) = entry
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), "unknown".to_string()));

    Ok(DailyForecast {
        timestamp,
        temp_day_c: entry.temp.day,
        category,
        description,
    })
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
