//! Forecast windowing: turns the raw hourly series into the 12 rows shown
//! to the viewer, starting at the viewer's current hour shifted into the
//! city's local time.

use chrono::Timelike;
use std::sync::Arc;

use crate::error::WeatherError;
use crate::provider::WeatherProvider;
use crate::types::{CityCoordinates, ForecastEntry, HourlyTemperatures};

/// Number of hourly rows in a window
pub const WINDOW_HOURS: i64 = 12;

/// Source of the viewer's current wall-clock hour (0-23)
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u32;
}

/// Local machine clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Clock pinned to one hour
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_hour(&self) -> u32 {
        self.0
    }
}

/// Label for absolute hour index `hour`, e.g. "3:00PM".
///
/// Index 24 is labeled AM explicitly, matching how the window has always
/// treated the first hour of the next day.
pub fn hour_label(hour: i64) -> String {
    let ampm = if hour.rem_euclid(24) < 12 || hour == 24 {
        "AM"
    } else {
        "PM"
    };
    let display_hour = match hour.rem_euclid(12) {
        0 => 12,
        h => h,
    };
    format!("{}:00{}", display_hour, ampm)
}

/// Round half up (toward positive infinity). Non-finite input has no value.
pub fn round_temperature(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some((value + 0.5).floor() as i64)
}

/// Whole-hour UTC offset. Fractional zones (e.g. +5:30) floor to the hour.
pub fn offset_hours(utc_offset_seconds: i64) -> i64 {
    utc_offset_seconds.div_euclid(3600)
}

/// Build the 12-entry window from a raw hourly series.
///
/// Indices are not wrapped: hours past the end of the series (or before its
/// start) come back with no temperature.
pub fn build_window(
    hourly: &HourlyTemperatures,
    reference_offset_hours: i64,
    current_hour: u32,
) -> Vec<ForecastEntry> {
    let effective_offset = reference_offset_hours + offset_hours(hourly.utc_offset_seconds);
    let start_hour = i64::from(current_hour) + effective_offset;

    (start_hour..start_hour + WINDOW_HOURS)
        .map(|hour| {
            let temperature = usize::try_from(hour)
                .ok()
                .and_then(|idx| hourly.temperatures.get(idx).copied().flatten())
                .and_then(round_temperature);
            ForecastEntry {
                label: hour_label(hour),
                temperature,
            }
        })
        .collect()
}

/// Fetches hourly forecasts and windows them against the viewer's clock.
#[derive(Clone)]
pub struct ForecastWindower {
    provider: WeatherProvider,
    reference_offset_hours: i64,
    clock: Arc<dyn Clock>,
}

impl ForecastWindower {
    pub fn new(provider: WeatherProvider, reference_offset_hours: i64) -> Self {
        Self::with_clock(provider, reference_offset_hours, Arc::new(SystemClock))
    }

    pub fn with_clock(
        provider: WeatherProvider,
        reference_offset_hours: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            reference_offset_hours,
            clock,
        }
    }

    pub fn reference_offset_hours(&self) -> i64 {
        self.reference_offset_hours
    }

    /// Fetch the forecast for `coordinates` and return the next 12 hours.
    pub async fn build_window(
        &self,
        coordinates: &CityCoordinates,
    ) -> Result<Vec<ForecastEntry>, WeatherError> {
        let hourly = self.provider.hourly_temperatures(coordinates).await?;
        let current_hour = self.clock.current_hour();

        if hourly.temperatures.is_empty() {
            tracing::warn!("Forecast for {} returned no hourly values", coordinates.timezone);
        }

        Ok(build_window(&hourly, self.reference_offset_hours, current_hour))
    }
}

impl std::fmt::Debug for ForecastWindower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastWindower")
            .field("provider", &self.provider)
            .field("reference_offset_hours", &self.reference_offset_hours)
            .finish_non_exhaustive()
    }
}
