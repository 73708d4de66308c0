//! Position lookup via the ip-api.com JSON endpoint.
//!
//! The board treats IP geolocation as the machine's location service:
//! city-level accuracy, no key required. One reading per launch.

use reqwest::Client;
use serde::Deserialize;

use crate::location::LocationError;
use crate::model::Coordinates;

const IP_API_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_base_url(IP_API_URL)
    }

    /// Point the locator at a different endpoint. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// One position reading.
    ///
    /// ip-api.com answers 200 even on failure; the in-body `status`
    /// field is the real verdict.
    pub async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await?;

        let parsed: IpApiResponse = res.json().await?;

        if parsed.status != "success" {
            return Err(LocationError::Service(
                parsed
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::debug!("position: {latitude}, {longitude}");
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => Err(LocationError::Service(
                "response missing coordinates".to_string(),
            )),
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}
