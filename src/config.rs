use std::time::Duration;

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Placeholder key so the app works out of the box; the upstream API rejects
/// it and the planner falls back to baseline conditions.
pub const DEMO_API_KEY: &str = "demo-key-for-development";

/// Upstream weather API settings.
#[derive(Clone, Debug)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl WeatherConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Reads `OPENWEATHER_API_KEY` and `VERTIGROW_WEATHER_URL`, falling back
    /// to the demo key and the public OpenWeather endpoint.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("OPENWEATHER_API_KEY").unwrap_or_else(|_| DEMO_API_KEY.to_string());
        let base_url =
            std::env::var("VERTIGROW_WEATHER_URL").unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string());
        Self::new(api_key, base_url)
    }

    pub fn has_real_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != DEMO_API_KEY
    }
}
