//! Plain-text rendering of the board for the terminal.

use std::fmt::Write;

use hourcast_weather::{CityList, DisplayedForecast, ForecastBoard};

pub fn cities(list: &CityList) -> String {
    let mut out = String::new();
    for (i, name) in list.names().iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, name);
    }
    out
}

pub fn forecast(forecast: &DisplayedForecast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", forecast.city);
    let _ = writeln!(out, "  {:<9} {}", "Time", "Temperature");
    for entry in &forecast.entries {
        let _ = writeln!(out, "  {:<9} {}", entry.label, entry.temperature_text());
    }
    out
}

/// Error line (if any) followed by the current forecast table (if any)
pub fn board(board: &ForecastBoard) -> String {
    let mut out = String::new();
    if let Some(error) = board.error() {
        let _ = writeln!(out, "! {}", error);
    }
    if let Some(current) = board.forecast() {
        out.push_str(&forecast(current));
    }
    out
}
