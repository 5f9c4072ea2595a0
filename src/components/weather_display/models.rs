use crate::utils::time::Timestamp;
use serde::Deserialize;

/// Current conditions as served by `/api/weather/current`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, 0-100
    pub humidity: f64,
    pub description: String,
    pub last_updated: Timestamp,
    #[serde(default)]
    pub location: Option<String>,
    /// WMO weather interpretation code
    #[serde(default)]
    pub weather_code: Option<u16>,
}

/// Response envelope; `weather` is null when the backend's provider failed
#[derive(Debug, Deserialize)]
pub(super) struct WeatherResponse {
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
}
