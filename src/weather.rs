//! Client for the OpenWeather current-conditions API plus the climate
//! advice derived from a reading.
//!
//! A missing or rejected API key, a network failure, or a malformed payload
//! all degrade to a baseline snapshot so planning still works offline. Only
//! an unknown location is surfaced to the caller as an error.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::WeatherConfig;

/// Current conditions for one location, either live or baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub country: String,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: i64,
    pub pressure: i64,
    pub weather: String,
    pub weather_main: String,
    pub wind_speed: f64,
    pub clouds: i64,
    pub visibility: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub timezone: i64,
    pub is_default: bool,
}

impl WeatherSnapshot {
    /// Baseline mild conditions used whenever the upstream API cannot be
    /// reached or rejects the request.
    pub fn fallback(location: &str) -> Self {
        Self {
            location: location.to_string(),
            country: "Unknown".to_string(),
            temp: 22.0,
            feels_like: 22.0,
            temp_min: 18.0,
            temp_max: 26.0,
            humidity: 65,
            pressure: 1013,
            weather: "clear sky".to_string(),
            weather_main: "Clear".to_string(),
            wind_speed: 3.5,
            clouds: 20,
            visibility: 10_000,
            sunrise: 1_692_681_600,
            sunset: 1_692_728_400,
            timezone: 0,
            is_default: true,
        }
    }

    fn from_api(data: ApiResponse) -> Option<Self> {
        let condition = data.weather.into_iter().next()?;
        Some(Self {
            location: data.name,
            country: data.sys.country,
            temp: data.main.temp,
            feels_like: data.main.feels_like,
            temp_min: data.main.temp_min,
            temp_max: data.main.temp_max,
            humidity: data.main.humidity,
            pressure: data.main.pressure,
            weather: condition.description,
            weather_main: condition.main,
            wind_speed: data.wind.speed,
            clouds: data.clouds.all,
            visibility: data.visibility,
            sunrise: data.sys.sunrise,
            sunset: data.sys.sunset,
            timezone: data.timezone,
            is_default: false,
        })
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("location '{0}' not found")]
    UnknownLocation(String),
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: String,
    sys: ApiSys,
    main: ApiMain,
    weather: Vec<ApiCondition>,
    #[serde(default)]
    wind: ApiWind,
    #[serde(default)]
    clouds: ApiClouds,
    #[serde(default = "default_visibility")]
    visibility: i64,
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i64,
    pressure: i64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    main: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiClouds {
    #[serde(default)]
    all: i64,
}

fn default_visibility() -> i64 {
    10_000
}

#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    config: WeatherConfig,
}

impl WeatherService {
    pub fn new(config: WeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Fetches current conditions for a location.
    ///
    /// Returns the baseline snapshot on any upstream failure except a 404,
    /// which means the location itself is wrong and the caller should tell
    /// the user.
    pub async fn current_weather(&self, location: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/weather", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!("Network error fetching weather for {}: {}", location, err);
                return Ok(WeatherSnapshot::fallback(location));
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<ApiResponse>().await {
                Ok(data) => match WeatherSnapshot::from_api(data) {
                    Some(snapshot) => {
                        info!("Weather data fetched for {}", location);
                        Ok(snapshot)
                    }
                    None => {
                        error!("Weather payload for {} had no conditions", location);
                        Ok(WeatherSnapshot::fallback(location))
                    }
                },
                Err(err) => {
                    error!("Could not decode weather payload for {}: {}", location, err);
                    Ok(WeatherSnapshot::fallback(location))
                }
            },
            StatusCode::UNAUTHORIZED => {
                error!("Weather API rejected the configured key");
                Ok(WeatherSnapshot::fallback(location))
            }
            StatusCode::NOT_FOUND => {
                warn!("Location '{}' not known to the weather API", location);
                Err(WeatherError::UnknownLocation(location.to_string()))
            }
            status => {
                error!("Weather API error: {}", status);
                Ok(WeatherSnapshot::fallback(location))
            }
        }
    }
}

/// What a facility operator should do about the current conditions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClimateReport {
    pub climate_suitability: String,
    pub growing_conditions: GrowingConditions,
    pub seasonal_advice: String,
    pub risk_factors: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrowingConditions {
    pub heating_needed: bool,
    pub cooling_needed: bool,
    pub dehumidification_needed: bool,
    pub humidification_needed: bool,
    pub ventilation_priority: String,
}

pub fn climate_advice(weather: &WeatherSnapshot) -> ClimateReport {
    let temp = weather.temp;
    let humidity = weather.humidity as f64;

    ClimateReport {
        climate_suitability: assess_suitability(temp, humidity).to_string(),
        growing_conditions: growing_conditions(temp, humidity),
        seasonal_advice: seasonal_advice(weather).to_string(),
        risk_factors: risk_factors(weather),
    }
}

fn assess_suitability(temp: f64, humidity: f64) -> &'static str {
    if (18.0..=26.0).contains(&temp) && (50.0..=70.0).contains(&humidity) {
        "Excellent"
    } else if (15.0..=30.0).contains(&temp) && (40.0..=80.0).contains(&humidity) {
        "Good"
    } else if (10.0..=35.0).contains(&temp) && (30.0..=90.0).contains(&humidity) {
        "Fair"
    } else {
        "Challenging"
    }
}

fn growing_conditions(temp: f64, humidity: f64) -> GrowingConditions {
    GrowingConditions {
        heating_needed: temp < 18.0,
        cooling_needed: temp > 26.0,
        dehumidification_needed: humidity > 70.0,
        humidification_needed: humidity < 50.0,
        ventilation_priority: if humidity > 75.0 || temp > 28.0 {
            "high".to_string()
        } else {
            "medium".to_string()
        },
    }
}

fn seasonal_advice(weather: &WeatherSnapshot) -> &'static str {
    let temp = weather.temp;
    let weather_main = weather.weather_main.to_lowercase();

    if temp < 15.0 {
        "Consider cold-hardy crops like lettuce, spinach, and kale. Increase heating systems."
    } else if temp > 30.0 {
        "Focus on heat-tolerant crops. Ensure adequate cooling and ventilation."
    } else if weather_main.contains("rain") {
        "Excellent conditions for leafy greens. Monitor humidity levels carefully."
    } else {
        "Ideal conditions for most vertical farming crops. Maintain current parameters."
    }
}

fn risk_factors(weather: &WeatherSnapshot) -> Vec<String> {
    let mut risks = Vec::new();
    let temp = weather.temp;
    let humidity = weather.humidity as f64;

    if temp > 35.0 {
        risks.push("Extreme heat - risk of crop stress and increased cooling costs".to_string());
    } else if temp < 5.0 {
        risks.push("Freezing temperatures - risk of crop damage and high heating costs".to_string());
    }

    if humidity > 85.0 {
        risks.push("Very high humidity - increased risk of fungal diseases".to_string());
    } else if humidity < 30.0 {
        risks.push("Low humidity - risk of plant dehydration".to_string());
    }

    if weather.wind_speed > 15.0 {
        risks.push("High winds - potential structural stress on facilities".to_string());
    }

    risks
}
