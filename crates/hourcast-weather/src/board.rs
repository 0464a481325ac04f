//! Forecast board: the session state behind the front end.
//!
//! Owns the coordinate resolver (and its cache), the windower, the city list,
//! the forecast currently on display and the single error message. Every
//! trigger goes resolve -> window; the two halves can also be driven
//! separately so the forecast fetch runs off the front end's task.

use crate::cities::CityList;
use crate::error::{BoardError, WeatherError};
use crate::resolver::CoordinateResolver;
use crate::types::{CityCoordinates, ForecastEntry};
use crate::window::ForecastWindower;

/// Sequence number of a forecast request. Only the latest one may update the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A resolved city waiting for its forecast
#[derive(Debug, Clone, PartialEq)]
pub struct PendingForecast {
    pub token: RequestToken,
    pub city: String,
    pub coordinates: CityCoordinates,
}

impl PendingForecast {
    /// Run the forecast request without borrowing the board.
    pub async fn fetch(self, windower: &ForecastWindower) -> ForecastReply {
        let result = windower.build_window(&self.coordinates).await;
        ForecastReply {
            pending: self,
            result,
        }
    }
}

/// Outcome of a forecast request, applied with [`ForecastBoard::complete`]
#[derive(Debug)]
pub struct ForecastReply {
    pub pending: PendingForecast,
    pub result: Result<Vec<ForecastEntry>, WeatherError>,
}

/// The forecast currently on display
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedForecast {
    pub city: String,
    pub entries: Vec<ForecastEntry>,
}

pub struct ForecastBoard {
    resolver: CoordinateResolver,
    windower: ForecastWindower,
    cities: CityList,
    initial_city: String,
    forecast: Option<DisplayedForecast>,
    error: Option<String>,
    latest_token: RequestToken,
}

impl ForecastBoard {
    pub fn new(
        resolver: CoordinateResolver,
        windower: ForecastWindower,
        cities: CityList,
        initial_city: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            windower,
            cities,
            initial_city: initial_city.into(),
            forecast: None,
            error: None,
            latest_token: RequestToken(0),
        }
    }

    pub fn cities(&self) -> &CityList {
        &self.cities
    }

    pub fn forecast(&self) -> Option<&DisplayedForecast> {
        self.forecast.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Coordinates cached for `city`, if it has been resolved this session
    pub fn cached(&self, city: &str) -> Option<&CityCoordinates> {
        self.resolver.cache().get(city)
    }

    pub fn windower(&self) -> &ForecastWindower {
        &self.windower
    }

    pub fn initial_city(&self) -> &str {
        &self.initial_city
    }

    /// Show the initial city, as on first start.
    pub async fn load_initial(&mut self) -> Result<(), BoardError> {
        let city = self.initial_city.clone();
        self.show_city(&city).await
    }

    /// Resolve `city` and replace the displayed forecast with its window.
    pub async fn show_city(&mut self, city: &str) -> Result<(), BoardError> {
        let pending = self.prepare_city(city).await?;
        let reply = pending.fetch(&self.windower).await;
        self.complete(reply).map(|_| ())
    }

    /// Add a city to the list and show its forecast.
    ///
    /// The list is only extended once the city resolves.
    pub async fn add_city(&mut self, name: &str) -> Result<(), BoardError> {
        let pending = self.prepare_add(name).await?;
        let reply = pending.fetch(&self.windower).await;
        self.complete(reply).map(|_| ())
    }

    /// First half of [`ForecastBoard::show_city`]: resolve and issue a token.
    pub async fn prepare_city(&mut self, city: &str) -> Result<PendingForecast, BoardError> {
        let coordinates = self.resolve(city).await?;
        Ok(self.begin(city.to_string(), coordinates))
    }

    /// First half of [`ForecastBoard::add_city`]: validate, resolve, append.
    pub async fn prepare_add(&mut self, name: &str) -> Result<PendingForecast, BoardError> {
        let name = match self.cities.check_new(name) {
            Ok(name) => name,
            Err(e) => return Err(self.fail(e)),
        };

        let coordinates = self.resolve(&name).await?;
        self.cities.push(name.clone());
        tracing::info!("Added city {}", name);

        Ok(self.begin(name, coordinates))
    }

    /// Apply a forecast reply. Returns `Ok(false)` when the reply was
    /// superseded by a newer request and therefore ignored.
    pub fn complete(&mut self, reply: ForecastReply) -> Result<bool, BoardError> {
        let ForecastReply { pending, result } = reply;

        if pending.token != self.latest_token {
            tracing::debug!(
                "Discarding superseded forecast for {} ({:?}, latest {:?})",
                pending.city,
                pending.token,
                self.latest_token
            );
            return Ok(false);
        }

        match result {
            Ok(entries) => {
                tracing::info!("Showing {}-hour forecast for {}", entries.len(), pending.city);
                self.forecast = Some(DisplayedForecast {
                    city: pending.city,
                    entries,
                });
                Ok(true)
            }
            Err(e) => Err(self.fail(BoardError::Forecast(e))),
        }
    }

    async fn resolve(&mut self, city: &str) -> Result<CityCoordinates, BoardError> {
        match self.resolver.resolve(city).await {
            Ok(coordinates) => Ok(coordinates),
            Err(source) => Err(self.fail(BoardError::Resolution {
                city: city.to_string(),
                source,
            })),
        }
    }

    /// Start a forecast attempt: clears the error and issues the next token.
    fn begin(&mut self, city: String, coordinates: CityCoordinates) -> PendingForecast {
        self.latest_token = RequestToken(self.latest_token.0 + 1);
        self.error = None;
        PendingForecast {
            token: self.latest_token,
            city,
            coordinates,
        }
    }

    fn fail(&mut self, err: BoardError) -> BoardError {
        tracing::warn!("{}", err);
        self.error = Some(err.user_message());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Endpoints, WeatherProvider};
    use crate::window::FixedClock;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn board_for(server: &MockServer) -> ForecastBoard {
        let endpoints = Endpoints {
            geocoding_url: format!("{}/v1/search", server.uri()),
            forecast_url: format!("{}/v1/forecast", server.uri()),
        };
        let provider = WeatherProvider::new(endpoints, None).unwrap();
        let windower = ForecastWindower::with_clock(provider.clone(), 5, Arc::new(FixedClock(9)));
        ForecastBoard::new(
            CoordinateResolver::new(provider),
            windower,
            CityList::default(),
            "Austin",
        )
    }

    async fn mount_city(server: &MockServer, name: &str, lat: f64, lon: f64) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", name))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"name": name, "latitude": lat, "longitude": lon, "timezone": "America/Chicago"}]
            })))
            .mount(server)
            .await;
    }

    async fn mount_forecast(server: &MockServer) {
        let temps: Vec<f64> = (0..48).map(|i| 60.0 + i as f64 / 2.0).collect();
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "utc_offset_seconds": -18000,
                "hourly": { "temperature_2m": temps }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_superseded_reply_is_discarded() {
        let mock_server = MockServer::start().await;
        mount_city(&mock_server, "Austin", 30.27, -97.74).await;
        mount_city(&mock_server, "Dallas", 32.78, -96.81).await;
        mount_forecast(&mock_server).await;

        let mut board = board_for(&mock_server);
        let first = board.prepare_city("Austin").await.unwrap();
        let second = board.prepare_city("Dallas").await.unwrap();
        assert!(second.token > first.token);

        let windower = board.windower().clone();
        let second_reply = second.fetch(&windower).await;
        let first_reply = first.fetch(&windower).await;

        assert!(board.complete(second_reply).unwrap());
        assert!(!board.complete(first_reply).unwrap());
        assert_eq!(board.forecast().map(|f| f.city.as_str()), Some("Dallas"));
    }

    #[tokio::test]
    async fn test_superseded_failure_sets_no_error() {
        let mock_server = MockServer::start().await;
        mount_city(&mock_server, "Austin", 30.27, -97.74).await;

        let mut board = board_for(&mock_server);
        let stale = board.prepare_city("Austin").await.unwrap();
        let _latest = board.prepare_city("Austin").await.unwrap();

        let reply = ForecastReply {
            pending: stale,
            result: Err(WeatherError::Parse("late".into())),
        };
        assert!(!board.complete(reply).unwrap());
        assert!(board.error().is_none());
    }

    #[tokio::test]
    async fn test_error_cleared_when_fetch_starts() {
        let mock_server = MockServer::start().await;
        mount_city(&mock_server, "Austin", 30.27, -97.74).await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Zzzzz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
            .mount(&mock_server)
            .await;

        let mut board = board_for(&mock_server);
        assert!(board.prepare_city("Zzzzz").await.is_err());
        assert_eq!(board.error(), Some("Could not find weather for Zzzzz"));

        board.prepare_city("Austin").await.unwrap();
        assert!(board.error().is_none());
    }
}
