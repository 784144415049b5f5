use crate::{
    Config, WeatherSnapshot, config::Coordinates, error::FetchError,
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One request for current conditions and the daily forecast at `coords`.
    async fn fetch(&self, coords: &Coordinates) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the provider for the API configured in `config`.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::new(config.api_url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_uses_api_url() {
        let cfg = Config::new("http://example.invalid/v1/forecast");
        let provider = provider_from_config(&cfg);

        assert!(format!("{provider:?}").contains("http://example.invalid/v1/forecast"));
    }
}
