use serde::{Deserialize, Serialize};

/// Resolved location of a named city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name, e.g. "America/Chicago"
    pub timezone: String,
}

/// One row of the displayed forecast window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Hour label such as "3:00PM"
    pub label: String,
    /// Rounded Fahrenheit temperature; `None` when the forecast did not cover this hour
    pub temperature: Option<i64>,
}

impl ForecastEntry {
    /// Temperature cell text, e.g. "69 F", or "--" when missing
    pub fn temperature_text(&self) -> String {
        match self.temperature {
            Some(t) => format!("{} F", t),
            None => "--".to_string(),
        }
    }
}

/// Raw hourly forecast as returned by the forecast endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyTemperatures {
    /// Index 0 is local midnight of the response timezone
    pub temperatures: Vec<Option<f64>>,
    pub utc_offset_seconds: i64,
}

/// Geocoding API response body
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingMatch>>,
}

/// Single geocoding candidate
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodingMatch {
    #[allow(dead_code)]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

/// Forecast API response body
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub hourly: HourlySeries,
    pub utc_offset_seconds: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HourlySeries {
    pub temperature_2m: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_text() {
        let entry = ForecastEntry {
            label: "3:00PM".to_string(),
            temperature: Some(69),
        };
        assert_eq!(entry.temperature_text(), "69 F");

        let missing = ForecastEntry {
            label: "4:00PM".to_string(),
            temperature: None,
        };
        assert_eq!(missing.temperature_text(), "--");
    }

    #[test]
    fn test_geocoding_response_without_results() {
        let body: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(body.results.is_none());
    }

    #[test]
    fn test_forecast_response_with_nulls() {
        let body: ForecastResponse = serde_json::from_str(
            r#"{"utc_offset_seconds":-18000,"hourly":{"time":["2026-10-19T00:00"],"temperature_2m":[68.6,null]}}"#,
        )
        .unwrap();
        assert_eq!(body.utc_offset_seconds, -18000);
        assert_eq!(body.hourly.temperature_2m, vec![Some(68.6), None]);
    }
}
