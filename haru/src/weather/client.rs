use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::WeatherConfig;
use crate::error::{HaruError, Result};
use crate::models::WeatherRecord;

/// A source of current weather observations for the configured city.
#[async_trait]
pub trait CurrentWeather: Send + Sync {
    /// Fetch current conditions, normalized to a record dated today
    /// (local time). Never stores anything.
    async fn fetch_current(&self) -> Result<WeatherRecord>;
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
    icon: String,
}

/// Client for the OpenWeatherMap current-weather endpoint.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: Client,
    base_url: String,
    api_key: String,
    city: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HaruError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            city: config.city.clone(),
        })
    }
}

#[async_trait]
impl CurrentWeather for OpenWeatherMapClient {
    async fn fetch_current(&self) -> Result<WeatherRecord> {
        let url = format!(
            "{}/data/2.5/weather?q={}&appid={}",
            self.base_url, self.city, self.api_key
        );

        tracing::debug!(city = %self.city, "Fetching current weather");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        // Error responses take the same path: read the body, try to parse.
        // A provider error body lacks the weather fields and fails below.
        let body = response.text().await?;

        let parsed: ProviderResponse = serde_json::from_str(&body).map_err(|e| {
            HaruError::WeatherFetch(format!(
                "unusable provider payload (HTTP {status}): {e}"
            ))
        })?;

        let current = parsed.weather.first().ok_or_else(|| {
            HaruError::WeatherFetch("provider payload has no weather conditions".to_string())
        })?;

        Ok(WeatherRecord {
            id: None,
            date: Local::now().date_naive(),
            condition: current.main.clone(),
            icon: current.icon.clone(),
            temperature: parsed.main.temp,
        })
    }
}
