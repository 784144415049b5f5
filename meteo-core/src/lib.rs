//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - The JSON configuration file and the location registry built on it
//! - The weather provider abstraction and its Open-Meteo implementation
//! - Shared domain models and their plain-text rendering
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod registry;
pub mod report;

pub use config::{Config, Coordinates};
pub use error::{ConfigError, FetchError, RegistryError};
pub use model::{CurrentConditions, DailyForecast, Location, WeatherCode, WeatherSnapshot};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider, provider_from_config};
pub use registry::{AddOutcome, FavoriteOutcome, LocationRegistry};
pub use report::{render_current, render_daily};
