//! Open-Meteo HTTP client: geocoding search and hourly temperature forecast.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{
    CityCoordinates, ForecastResponse, GeocodingMatch, GeocodingResponse, HourlyTemperatures,
};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const USER_AGENT: &str = "hourcast/0.1.0";

/// Base URLs of the two Open-Meteo endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    endpoints: Endpoints,
}

impl WeatherProvider {
    /// Build a provider. `timeout` of `None` leaves requests unbounded.
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Look up a city by name and return the first match's coordinates.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, name: &str) -> Result<CityCoordinates, WeatherError> {
        let response = self
            .client
            .get(&self.endpoints.geocoding_url)
            .query(&[("name", name)])
            .send()
            .await?;

        let body: GeocodingResponse = handle_response(response).await?;
        let first: GeocodingMatch = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NoResults(name.to_string()))?;

        let timezone = first
            .timezone
            .filter(|tz| !tz.is_empty())
            .ok_or_else(|| WeatherError::Parse(format!("geocoding result for {} has no timezone", name)))?;

        Ok(CityCoordinates {
            latitude: first.latitude,
            longitude: first.longitude,
            timezone,
        })
    }

    /// Fetch hourly Fahrenheit temperatures for the given coordinates.
    #[instrument(skip(self), level = "debug")]
    pub async fn hourly_temperatures(
        &self,
        coordinates: &CityCoordinates,
    ) -> Result<HourlyTemperatures, WeatherError> {
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        let response = self
            .client
            .get(&self.endpoints.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", "temperature_2m"),
                ("temperature_unit", "fahrenheit"),
                ("timezone", coordinates.timezone.as_str()),
            ])
            .send()
            .await?;

        let body: ForecastResponse = handle_response(response).await?;
        Ok(HourlyTemperatures {
            temperatures: body.hourly.temperature_2m,
            utc_offset_seconds: body.utc_offset_seconds,
        })
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Open-Meteo returned status {}", status);
        return Err(WeatherError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))
}
