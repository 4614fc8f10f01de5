//! Weather sources
//!
//! [`OpenWeatherClient`] asks `OpenWeatherMap` for the current conditions at
//! the configured location. Failures never reach the scheduler: they are
//! logged and reported as [`WeatherCondition::Unknown`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::plan::config::GlobalConfig;
use crate::weather::condition::WeatherCondition;

/// Request timeout for the weather API
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can report the current weather condition
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current condition. Implementations degrade to `Unknown` instead of failing.
    async fn condition(&self) -> WeatherCondition;
}

/// A source that always reports the same condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWeather(pub WeatherCondition);

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn condition(&self) -> WeatherCondition {
        self.0
    }
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// No API key was configured
    #[error("OpenWeather API key not configured")]
    MissingApiKey,

    /// The API answered with a non-success status
    #[error("OpenWeather API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response listed no weather conditions
    #[error("OpenWeather response contained no weather conditions")]
    NoConditions,

    /// Network or decoding failure
    #[error("Weather API request failed: {0}")]
    Network(reqwest::Error),
}

// The request URL carries the API key in its query string
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

/// Current-weather response from `OpenWeatherMap`, reduced to what we use
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    /// Main weather group (e.g. "Rain", "Clouds")
    main: String,
}

impl CurrentWeatherResponse {
    fn condition(&self) -> Result<WeatherCondition, WeatherError> {
        self.weather
            .first()
            .map(|w| WeatherCondition::from_openweather_main(&w.main))
            .ok_or(WeatherError::NoConditions)
    }
}

/// Client for the `OpenWeatherMap` current-weather endpoint
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    location: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client for `location` using `api_key`.
    pub fn new(base_url: &str, location: &str, api_key: &str) -> Result<Self, WeatherError> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            location: location.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the current condition, surfacing any failure.
    pub async fn fetch(&self) -> Result<WeatherCondition, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        tracing::debug!("Fetching weather for {} from {url}", self.location);

        let response = self
            .client
            .get(&url)
            .query(&[("q", self.location.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }

        let body: CurrentWeatherResponse = response.json().await?;
        body.condition()
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn condition(&self) -> WeatherCondition {
        match self.fetch().await {
            Ok(condition) => condition,
            Err(err) => {
                tracing::error!("{err}");
                WeatherCondition::Unknown
            }
        }
    }
}

/// Pick the weather source for the configured settings.
///
/// Without an API key the demo source reports clear weather.
#[must_use]
pub fn source_from_config(global: &GlobalConfig) -> Box<dyn WeatherSource> {
    let Some(api_key) = global.weather_api_key() else {
        tracing::warn!("Using demo weather data - no API key provided");
        return Box::new(FixedWeather(WeatherCondition::Clear));
    };

    match OpenWeatherClient::new(&global.weather_base_url, &global.location, &api_key) {
        Ok(client) => Box::new(client),
        Err(err) => {
            tracing::error!("Could not create weather client: {err}");
            Box::new(FixedWeather(WeatherCondition::Unknown))
        }
    }
}
