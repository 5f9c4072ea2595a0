use crate::error::{config_error, env_error, DisplayResult};
use dotenvy::dotenv;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Default backend origin (the Flask development server)
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default calendar poll period in seconds
pub const DEFAULT_CALENDAR_REFRESH_SECS: u64 = 5 * 60;

/// Default weather poll period in seconds
pub const DEFAULT_WEATHER_REFRESH_SECS: u64 = 10 * 60;

/// Default file with per-component enable flags
pub const COMPONENTS_FILE: &str = "config/components.toml";

/// Component names understood by the components file
pub const COMPONENT_NAMES: [&str; 3] = ["clock", "calendar_events", "weather_display"];

/// Main configuration structure for the display
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, optionally with a path prefix
    pub api_base_url: String,
    /// Calendar poll period in seconds
    pub calendar_refresh_secs: u64,
    /// Weather poll period in seconds
    pub weather_refresh_secs: u64,
    /// Latitude forwarded to the weather endpoint
    pub weather_latitude: Option<f64>,
    /// Longitude forwarded to the weather endpoint
    pub weather_longitude: Option<f64>,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
    /// `Local` or an IANA time zone name
    pub timezone: String,
    /// Locale for widget labels
    pub locale: String,
    /// Directory for the log file
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            calendar_refresh_secs: DEFAULT_CALENDAR_REFRESH_SECS,
            weather_refresh_secs: DEFAULT_WEATHER_REFRESH_SECS,
            weather_latitude: None,
            weather_longitude: None,
            components: default_components(),
            timezone: String::from("Local"),
            locale: String::from("en"),
            log_dir: String::from("logs"),
        }
    }
}

fn default_components() -> HashMap<String, bool> {
    COMPONENT_NAMES
        .iter()
        .map(|name| (name.to_string(), true))
        .collect()
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> DisplayResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_vars(|key| env::var(key).ok())?;
        config.merge_components_file(COMPONENTS_FILE)?;

        Ok(config)
    }

    /// Build a configuration from a variable lookup, applying defaults
    pub fn from_vars<F>(lookup: F) -> DisplayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL").unwrap_or(defaults.api_base_url);

        let calendar_refresh_secs = parse_var(&lookup, "CALENDAR_REFRESH_SECS")?
            .unwrap_or(defaults.calendar_refresh_secs);
        let weather_refresh_secs = parse_var(&lookup, "WEATHER_REFRESH_SECS")?
            .unwrap_or(defaults.weather_refresh_secs);

        let weather_latitude = parse_var(&lookup, "WEATHER_LATITUDE")?;
        let weather_longitude = parse_var(&lookup, "WEATHER_LONGITUDE")?;

        let timezone = lookup("TIMEZONE").unwrap_or(defaults.timezone);
        let locale = lookup("DISPLAY_LOCALE").unwrap_or(defaults.locale);
        let log_dir = lookup("LOG_DIR").unwrap_or(defaults.log_dir);

        let config = Config {
            api_base_url,
            calendar_refresh_secs,
            weather_refresh_secs,
            weather_latitude,
            weather_longitude,
            components: defaults.components,
            timezone,
            locale,
            log_dir,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would only fail later at runtime
    pub fn validate(&self) -> DisplayResult<()> {
        if self.calendar_refresh_secs == 0 {
            return Err(config_error("CALENDAR_REFRESH_SECS must be greater than zero"));
        }
        if self.weather_refresh_secs == 0 {
            return Err(config_error("WEATHER_REFRESH_SECS must be greater than zero"));
        }
        self.api_base()?;
        Ok(())
    }

    /// Merge enable flags from a TOML file over the defaults, if it exists
    pub fn merge_components_file(&mut self, path: impl AsRef<Path>) -> DisplayResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        let file_components = toml::from_str::<HashMap<String, bool>>(&content)?;
        for (key, value) in file_components {
            if !COMPONENT_NAMES.contains(&key.as_str()) {
                tracing::warn!("Ignoring unknown component '{}' in {}", key, path.display());
                continue;
            }
            self.components.insert(key, value);
        }

        Ok(())
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Backend origin as a URL that relative endpoint paths can be joined onto
    pub fn api_base(&self) -> DisplayResult<Url> {
        let mut base = Url::parse(&self.api_base_url)?;
        if base.cannot_be_a_base() {
            return Err(config_error(&format!(
                "API_BASE_URL cannot be used as a base: {}",
                self.api_base_url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base)
    }

    pub fn calendar_refresh(&self) -> Duration {
        Duration::from_secs(self.calendar_refresh_secs)
    }

    pub fn weather_refresh(&self) -> Duration {
        Duration::from_secs(self.weather_refresh_secs)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> DisplayResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| env_error(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.calendar_refresh(), Duration::from_secs(300));
        assert_eq!(config.weather_refresh(), Duration::from_secs(600));
        assert!(config.weather_latitude.is_none());
        assert!(COMPONENT_NAMES.iter().all(|name| config.is_component_enabled(name)));
    }

    #[test]
    fn reads_overrides_from_variables() {
        let config = Config::from_vars(vars(&[
            ("API_BASE_URL", "http://display.local:8080/office"),
            ("CALENDAR_REFRESH_SECS", "60"),
            ("WEATHER_LATITUDE", "60.17"),
            ("WEATHER_LONGITUDE", "24.94"),
            ("TIMEZONE", "Europe/Helsinki"),
            ("DISPLAY_LOCALE", "fi"),
        ]))
        .unwrap();

        assert_eq!(config.calendar_refresh_secs, 60);
        assert_eq!(config.weather_refresh_secs, DEFAULT_WEATHER_REFRESH_SECS);
        assert_eq!(config.weather_latitude, Some(60.17));
        assert_eq!(config.weather_longitude, Some(24.94));
        assert_eq!(config.timezone, "Europe/Helsinki");
        assert_eq!(config.locale, "fi");
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = Config::from_vars(vars(&[("WEATHER_REFRESH_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("WEATHER_REFRESH_SECS"));
    }

    #[test]
    fn rejects_zero_refresh_period() {
        let err = Config::from_vars(vars(&[("CALENDAR_REFRESH_SECS", "0")])).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }

    #[test]
    fn api_base_keeps_path_prefix() {
        let config = Config {
            api_base_url: "http://display.local/office".to_string(),
            ..Config::default()
        };
        let base = config.api_base().unwrap();
        assert_eq!(
            base.join("api/weather/current").unwrap().as_str(),
            "http://display.local/office/api/weather/current"
        );
    }

    #[test]
    fn components_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weather_display = false\nunknown = true").unwrap();

        let mut config = Config::default();
        config.merge_components_file(file.path()).unwrap();

        assert!(!config.is_component_enabled("weather_display"));
        assert!(config.is_component_enabled("calendar_events"));
        assert!(!config.is_component_enabled("unknown"));
    }

    #[test]
    fn missing_components_file_is_not_an_error() {
        let mut config = Config::default();
        assert!(config.merge_components_file("does/not/exist.toml").is_ok());
    }
}
