//! Error types for the weather crate.

use thiserror::Error;

/// Transport and decoding failures talking to Open-Meteo
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No geocoding results for {0}")]
    NoResults(String),
}

/// Failures surfaced to the user by the forecast board.
///
/// `user_message()` is the single line shown in the error slot; `Display`
/// keeps the underlying cause for logs.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Blank city name")]
    BlankInput,

    #[error("City already in list: {0}")]
    AlreadyExists(String),

    #[error("Could not resolve {city}: {source}")]
    Resolution {
        city: String,
        #[source]
        source: WeatherError,
    },

    #[error("Forecast fetch failed: {0}")]
    Forecast(#[source] WeatherError),
}

impl BoardError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::BlankInput => "Enter a city name first.".to_string(),
            Self::AlreadyExists(_) => "City is already added!".to_string(),
            Self::Resolution { city, .. } => format!("Could not find weather for {}", city),
            Self::Forecast(_) => "Error fetching weather forecast.".to_string(),
        }
    }
}
