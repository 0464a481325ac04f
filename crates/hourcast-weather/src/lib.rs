//! Hourly temperature forecasts for a list of named cities.
//!
//! Resolves city names through the Open-Meteo geocoding API, caches the
//! coordinates for the session and turns raw hourly forecasts into a
//! 12-hour display window.

pub mod board;
pub mod cache;
pub mod cities;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod types;
pub mod window;

pub use board::{DisplayedForecast, ForecastBoard, ForecastReply, PendingForecast, RequestToken};
pub use cache::CoordinateCache;
pub use cities::CityList;
pub use error::{BoardError, WeatherError};
pub use provider::{Endpoints, WeatherProvider};
pub use resolver::CoordinateResolver;
pub use types::*;
pub use window::{Clock, FixedClock, ForecastWindower, SystemClock};
