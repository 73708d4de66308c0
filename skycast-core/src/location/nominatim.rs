//! Reverse geocoding: coordinates to a human-readable city name.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use reqwest::Client;
use serde::Deserialize;

use crate::location::LocationError;
use crate::model::Coordinates;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = "skycast/0.1 (terminal forecast board)";

#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

impl ReverseGeocoder {
    pub fn new() -> Result<Self, LocationError> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Point the geocoder at a different endpoint. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LocationError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// City name for the given coordinates.
    ///
    /// Nominatim reports smaller places under different keys, so the
    /// lookup falls back through city, town, village, municipality.
    pub async fn city_name(&self, coords: &Coordinates) -> Result<String, LocationError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await?;

        let parsed: NominatimResponse = res.json().await?;

        let address = parsed.address.ok_or(LocationError::NoPlace)?;

        let city = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.municipality)
            .ok_or(LocationError::NoPlace)?;

        tracing::info!("reverse geocoded to {city}");
        Ok(city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_fallback_chain_prefers_city() {
        let body = r#"{"address":{"city":"Kyiv","town":"Irrelevant"}}"#;
        let parsed: NominatimResponse = serde_json::from_str(body).expect("parse must succeed");
        let address = parsed.address.expect("address must be present");

        let name = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.municipality);

        assert_eq!(name.as_deref(), Some("Kyiv"));
    }

    #[test]
    fn address_fallback_chain_reaches_village() {
        let body = r#"{"address":{"village":"Staryi Solotvyn"}}"#;
        let parsed: NominatimResponse = serde_json::from_str(body).expect("parse must succeed");
        let address = parsed.address.expect("address must be present");

        let name = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.municipality);

        assert_eq!(name.as_deref(), Some("Staryi Solotvyn"));
    }
}
