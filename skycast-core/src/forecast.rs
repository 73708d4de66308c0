use crate::{
    Config,
    model::{Coordinates, DailyForecast},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the multi-day forecast for the given coordinates.
    async fn daily_forecast(&self, coords: &Coordinates) -> anyhow::Result<Vec<DailyForecast>>;
}

/// Construct the forecast provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeatherMap API key."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}
