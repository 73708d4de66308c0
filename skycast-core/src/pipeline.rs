//! The once-per-launch fetch pipeline.
//!
//! Runs off the UI thread; results cross back as [`BoardEvent`]s over
//! an mpsc channel that the board drains between frames.

use std::sync::mpsc::Sender;

use anyhow::Result;

use crate::config::Config;
use crate::forecast::{ForecastProvider, provider_from_config};
use crate::location::{IpLocator, Permission, ReverseGeocoder};
use crate::model::DailyForecast;

/// Messages sent from the pipeline back to the board.
#[derive(Debug)]
pub enum BoardEvent {
    /// The reverse geocoder resolved a city name.
    City(String),
    /// The forecast arrived. Sent at most once per launch.
    Forecast(Vec<DailyForecast>),
    /// Some step after the consent gate failed.
    Failed(String),
}

/// The external services one pipeline pass talks to, in call order.
pub struct Services {
    pub locator: IpLocator,
    pub geocoder: ReverseGeocoder,
    pub provider: Box<dyn ForecastProvider>,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            locator: IpLocator::new(),
            geocoder: ReverseGeocoder::new()?,
            provider: provider_from_config(config)?,
        })
    }
}

/// One pipeline pass: gate, position, geocode, fetch.
///
/// A denied gate returns before any service is touched, so denied runs
/// perform no network activity at all. Failures after the gate collapse
/// into a single `Failed` event.
pub async fn run(permission: Permission, services: &Services, events: &Sender<BoardEvent>) {
    if !permission.granted() {
        return;
    }

    if let Err(err) = fetch_board(services, events).await {
        tracing::warn!("pipeline failed: {err:#}");
        let _ = events.send(BoardEvent::Failed(format!("{err:#}")));
    }
}

async fn fetch_board(services: &Services, events: &Sender<BoardEvent>) -> Result<()> {
    let coords = services.locator.current_position().await?;
    let city = services.geocoder.city_name(&coords).await?;
    let _ = events.send(BoardEvent::City(city));

    let days = services.provider.daily_forecast(&coords).await?;
    let _ = events.send(BoardEvent::Forecast(days));

    Ok(())
}
