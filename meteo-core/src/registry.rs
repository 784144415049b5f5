//! Registered locations and favorites, backed by the JSON config file.
//!
//! Names keep the casing they were registered with (the canonical name).
//! Every lookup goes through a lowercase index, so `paris`, `PARIS` and
//! `Paris` all resolve to the same entry.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    config::{Config, Coordinates},
    error::{ConfigError, RegistryError},
    model::Location,
};

/// Result of a successful [`LocationRegistry::add_location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The name was already registered; its coordinates were replaced.
    Updated,
}

/// Result of a successful [`LocationRegistry::favorite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// Appended and persisted, carrying the canonical name.
    Added(String),
    AlreadyFavorite(String),
}

#[derive(Debug)]
pub struct LocationRegistry {
    config: Config,
    /// lowercase name -> canonical name
    index: HashMap<String, String>,
    path: PathBuf,
}

impl LocationRegistry {
    pub fn new(config: Config, path: impl Into<PathBuf>) -> Self {
        let index = config
            .default_locations
            .keys()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();

        Self { config, index, path: path.into() }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::load(path)?;
        Ok(Self::new(config, path))
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.config.default_locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.default_locations.is_empty()
    }

    /// All locations, ordered by canonical name.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.config
            .default_locations
            .iter()
            .map(|(name, coords)| Location::new(name.clone(), *coords))
    }

    pub fn favorites(&self) -> &[String] {
        &self.config.favorites
    }

    /// Canonical name for `name`, ignoring case and surrounding whitespace.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.index.get(&name.trim().to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    pub fn resolve(&self, name: &str) -> Option<Location> {
        let canonical = self.canonical_name(name)?;
        let coords = self.config.default_locations.get(canonical)?;
        Some(Location::new(canonical.to_string(), *coords))
    }

    /// Register `name` at the coordinates given as raw user input.
    ///
    /// Nothing changes unless both coordinates parse and are in range. A name
    /// that already exists keeps its canonical casing and gets the new
    /// coordinates. The change is only written to disk by the next [`save`].
    ///
    /// [`save`]: LocationRegistry::save
    pub fn add_location(
        &mut self,
        name: &str,
        lat: &str,
        lon: &str,
    ) -> Result<AddOutcome, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::Validation("City name must not be empty.".into()));
        }

        let coords = parse_coordinates(lat, lon)?;

        if let Some(canonical) = self.canonical_name(name).map(str::to_owned) {
            self.config.default_locations.insert(canonical.clone(), coords);
            tracing::debug!(name = %canonical, ?coords, "updated location");
            return Ok(AddOutcome::Updated);
        }

        self.config.default_locations.insert(name.to_string(), coords);
        self.index.insert(name.to_lowercase(), name.to_string());
        tracing::debug!(%name, ?coords, "added location");

        Ok(AddOutcome::Added)
    }

    /// Mark a registered location as favorite and persist the config.
    pub fn favorite(&mut self, name: &str) -> Result<FavoriteOutcome, RegistryError> {
        let canonical = self
            .canonical_name(name)
            .map(str::to_owned)
            .ok_or_else(|| RegistryError::NotFound(name.trim().to_string()))?;

        if self.config.favorites.contains(&canonical) {
            return Ok(FavoriteOutcome::AlreadyFavorite(canonical));
        }

        self.config.favorites.push(canonical.clone());
        if let Err(err) = self.save() {
            // Keep memory in step with the file so a retry saves again.
            self.config.favorites.pop();
            return Err(err.into());
        }

        Ok(FavoriteOutcome::Added(canonical))
    }

    /// Write the full configuration, locations and favorites included.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.config.save(&self.path)
    }
}

/// Parse latitude/longitude typed by the user.
pub fn parse_coordinates(lat: &str, lon: &str) -> Result<Coordinates, RegistryError> {
    let invalid = || {
        RegistryError::Validation(
            "Invalid input. Please enter numeric values for latitude and longitude.".into(),
        )
    };

    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !lat.is_finite() || !lon.is_finite() {
        return Err(invalid());
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(RegistryError::Validation(format!(
            "Latitude {lat} is out of range. It must be between -90 and 90."
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(RegistryError::Validation(format!(
            "Longitude {lon} is out of range. It must be between -180 and 180."
        )));
    }

    Ok(Coordinates { lat, lon })
}
