pub mod icon;
pub mod models;

pub use icon::WeatherIcon;
pub use models::WeatherSnapshot;

use super::feed::{DisplayState, Feed, FeedWidget};
use super::panel::{Panel, PanelEntry};
use crate::config::Config;
use crate::error::{DisplayResult, FetchError};
use crate::utils::time::{format_short_time, DisplayZone};
use async_trait::async_trait;
use models::WeatherResponse;
use rust_i18n::t;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// Endpoint path relative to the API base
pub const WEATHER_PATH: &str = "api/weather/current";

/// The current conditions endpoint
pub struct WeatherFeed {
    url: Url,
}

impl WeatherFeed {
    /// Endpoint for `base`, with optional coordinates forwarded as `lat`/`lon`
    pub fn new(base: &Url, latitude: Option<f64>, longitude: Option<f64>) -> DisplayResult<Self> {
        let mut url = base.join(WEATHER_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(lat) = latitude {
                query.append_pair("lat", &lat.to_string());
            }
            if let Some(lon) = longitude {
                query.append_pair("lon", &lon.to_string());
            }
        }
        // An empty serializer still leaves a trailing '?'
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(Self { url })
    }
}

impl Feed for WeatherFeed {
    type Payload = Option<WeatherSnapshot>;

    fn name(&self) -> &'static str {
        "weather_display"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn extract(&self, body: &str) -> Result<Self::Payload, FetchError> {
        let response: WeatherResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(response.weather)
    }
}

/// Current weather widget
pub struct WeatherDisplay {
    widget: FeedWidget<WeatherFeed>,
    zone: DisplayZone,
}

impl WeatherDisplay {
    /// Create the widget for the configured backend
    pub fn new(config: &Config) -> DisplayResult<Self> {
        let feed = WeatherFeed::new(
            &config.api_base()?,
            config.weather_latitude,
            config.weather_longitude,
        )?;
        Ok(Self {
            widget: FeedWidget::new(feed),
            zone: DisplayZone::from_config(&config.timezone)?,
        })
    }

    pub fn widget(&self) -> &FeedWidget<WeatherFeed> {
        &self.widget
    }
}

#[async_trait]
impl super::Component for WeatherDisplay {
    fn name(&self) -> &'static str {
        "weather_display"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> DisplayResult<()> {
        let period = config.read().await.weather_refresh();
        self.widget.mount(period).await;
        Ok(())
    }

    async fn shutdown(&self) -> DisplayResult<()> {
        self.widget.teardown().await;
        Ok(())
    }

    fn render(&self) -> Panel {
        render_weather(&self.widget.state(), self.zone)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Build the weather panel for a display state
pub fn render_weather(state: &DisplayState<Option<WeatherSnapshot>>, zone: DisplayZone) -> Panel {
    let title = t!("weather_title");

    match state {
        DisplayState::Loading => Panel::loading(title),
        DisplayState::Failed(message) => {
            Panel::notice(title, t!("weather_error"), Some(message.clone()))
        }
        DisplayState::Ready(None) => Panel::notice(title, t!("weather_unavailable"), None),
        DisplayState::Ready(Some(weather)) => Panel::entries(title, vec![weather_entry(weather, zone)]),
    }
}

fn weather_entry(weather: &WeatherSnapshot, zone: DisplayZone) -> PanelEntry {
    let icon = WeatherIcon::for_description(&weather.description);
    let temperature = format_temperature(weather.temperature);
    let humidity = format!("{}%", weather.humidity);
    let time = format_short_time(&weather.last_updated.wall_clock(zone));

    let mut entry = PanelEntry::new(format!("{} {}", icon.glyph(), temperature))
        .with_detail(capitalize_words(&weather.description))
        .with_detail(t!("weather_readings", temperature = temperature, humidity = humidity));

    if let Some(location) = weather.location.as_deref().filter(|l| !l.trim().is_empty()) {
        entry = entry.with_detail(location);
    }

    entry.with_detail(t!("weather_last_updated", time = time))
}

/// Temperature in Celsius without a trailing `.0`
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", celsius)
}

/// Upper-case the first letter of every word
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::panel::PanelBody;

    fn base() -> Url {
        Url::parse("http://localhost:5000/").unwrap()
    }

    fn snapshot(description: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 18.0,
            humidity: 72.0,
            description: description.to_string(),
            last_updated: "2024-01-15T10:00".parse().unwrap(),
            location: Some("Lat: 60.17, Lon: 24.94".to_string()),
            weather_code: Some(2),
        }
    }

    #[test]
    fn url_without_coordinates_has_no_query() {
        let feed = WeatherFeed::new(&base(), None, None).unwrap();
        assert_eq!(feed.url().as_str(), "http://localhost:5000/api/weather/current");
    }

    #[test]
    fn url_forwards_coordinates() {
        let feed = WeatherFeed::new(&base(), Some(60.17), Some(24.94)).unwrap();
        assert_eq!(
            feed.url().as_str(),
            "http://localhost:5000/api/weather/current?lat=60.17&lon=24.94"
        );
    }

    #[test]
    fn extracts_weather_object() {
        let feed = WeatherFeed::new(&base(), None, None).unwrap();
        let body = r#"{
            "weather": {
                "temperature": 18,
                "humidity": 72,
                "description": "Partly cloudy",
                "weather_code": 2,
                "location": "Lat: 60.17, Lon: 24.94",
                "last_updated": "2024-01-15T10:00"
            },
            "status": "success"
        }"#;

        let weather = feed.extract(body).unwrap().expect("weather present");
        assert_eq!(weather.temperature, 18.0);
        assert_eq!(weather.description, "Partly cloudy");
        assert_eq!(weather.weather_code, Some(2));
    }

    #[test]
    fn null_weather_is_an_absent_payload() {
        let feed = WeatherFeed::new(&base(), None, None).unwrap();
        assert_eq!(feed.extract(r#"{"weather": null}"#).unwrap(), None);
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let feed = WeatherFeed::new(&base(), None, None).unwrap();
        let err = feed
            .extract(r#"{"weather": {"temperature": "warm"}}"#)
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn renders_conditions() {
        let panel = render_weather(
            &DisplayState::Ready(Some(snapshot("partly cloudy"))),
            DisplayZone::Local,
        );

        let entries = panel.entry_list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].heading, "☁ 18°C");
        assert_eq!(
            entries[0].details,
            vec![
                "Partly Cloudy".to_string(),
                "Temperature: 18°C · Humidity: 72%".to_string(),
                "Lat: 60.17, Lon: 24.94".to_string(),
                "Last updated: 10:00 AM".to_string(),
            ]
        );
    }

    #[test]
    fn absent_weather_renders_unavailable() {
        let panel = render_weather(&DisplayState::Ready(None), DisplayZone::Local);
        assert_eq!(
            panel.body,
            PanelBody::Notice {
                headline: "Weather data unavailable".to_string(),
                detail: None
            }
        );
    }

    #[test]
    fn failure_renders_fallback_message() {
        let panel = render_weather(
            &DisplayState::Failed("connection refused".to_string()),
            DisplayZone::Local,
        );
        assert!(panel.entry_list().is_empty());
        assert_eq!(
            panel.body,
            PanelBody::Notice {
                headline: "Unable to load weather".to_string(),
                detail: Some("connection refused".to_string())
            }
        );
    }

    #[test]
    fn temperature_drops_trailing_zero() {
        assert_eq!(format_temperature(21.0), "21°C");
        assert_eq!(format_temperature(-3.5), "-3.5°C");
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("light rain showers"), "Light Rain Showers");
        assert_eq!(capitalize_words("clear  sky"), "Clear  Sky");
    }
}
