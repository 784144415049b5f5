use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Coordinates,
    error::FetchError,
    model::{CurrentConditions, DailyForecast, WeatherSnapshot},
};

use super::WeatherProvider;

/// Variables requested in the `current` block.
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,is_day";
/// Variables requested in the `daily` block.
pub const DAILY_FIELDS: &str = "weather_code";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    api_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(api_url: String) -> Self {
        Self::with_client(api_url, Client::new())
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_client(api_url: String, http: Client) -> Self {
        Self { api_url, http }
    }
}

/// Top-level shape of the forecast response; everything else is ignored.
#[derive(Debug, Deserialize)]
struct OmResponse {
    current: Option<CurrentConditions>,
    daily: Option<DailyForecast>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch(&self, coords: &Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();

        tracing::debug!(url = %self.api_url, %lat, %lon, "requesting forecast");

        let res = self
            .http
            .get(self.api_url.as_str())
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::from_reqwest)?;

        if !status.is_success() {
            return Err(FetchError::Http { status: status.as_u16(), body: truncate_body(&body) });
        }

        let parsed: OmResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::Request(format!("Failed to parse forecast JSON: {e}"))
        })?;

        match (parsed.current, parsed.daily) {
            (Some(current), Some(daily)) => Ok(WeatherSnapshot::new(current, daily)),
            (current, daily) => {
                tracing::warn!(
                    has_current = current.is_some(),
                    has_daily = daily.is_some(),
                    "forecast response is missing weather data"
                );
                Ok(WeatherSnapshot::empty())
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
