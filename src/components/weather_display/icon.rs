/// Icon shown next to the current temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Rain,
    Cloud,
    Sun,
    /// Anything the description does not identify
    Generic,
}

impl WeatherIcon {
    /// Pick an icon from a free-text description.
    ///
    /// Matching is by lowercase substring, first match wins:
    /// rain/shower/drizzle, then cloud/overcast, then clear/sunny.
    pub fn for_description(description: &str) -> Self {
        let desc = description.to_lowercase();

        if mentions(&desc, &["rain", "shower", "drizzle"]) {
            WeatherIcon::Rain
        } else if mentions(&desc, &["cloud", "overcast"]) {
            WeatherIcon::Cloud
        } else if mentions(&desc, &["clear", "sunny"]) {
            WeatherIcon::Sun
        } else {
            WeatherIcon::Generic
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Sun => "☀",
            WeatherIcon::Generic => "🌥",
        }
    }
}

fn mentions(desc: &str, words: &[&str]) -> bool {
    words.iter().any(|word| desc.contains(word))
}
