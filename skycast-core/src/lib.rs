//! Core library for the `skycast` forecast board.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location resolution (consent gate, position lookup, reverse geocoding)
//! - The OpenWeatherMap daily-forecast provider
//! - The once-per-launch pipeline that feeds the board
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod forecast;
pub mod location;
pub mod model;
pub mod pipeline;

pub use config::Config;
pub use forecast::{ForecastProvider, provider_from_config};
pub use location::{LocationError, Permission};
pub use model::{Coordinates, DailyForecast};
pub use pipeline::{BoardEvent, Services};
