use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// File name looked up in the working directory and the platform config dir.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Geographic coordinates of a location, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Top-level configuration stored on disk.
///
/// Example JSON:
/// ```json
/// {
///     "api_url": "https://api.open-meteo.com/v1/forecast",
///     "default_locations": { "Paris": { "lat": 48.85, "lon": 2.35 } },
///     "favorites": ["Paris"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the forecast endpoint.
    pub api_url: String,

    /// Registered locations keyed by canonical name.
    pub default_locations: BTreeMap<String, Coordinates>,

    #[serde(default)]
    pub favorites: Vec<String>,

    /// Any other top-level keys, kept so a save does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            default_locations: BTreeMap::new(),
            favorites: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Load config from disk. A missing file is an error: there is no usable default.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        let cfg: Config = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        if let Some((first, second)) = cfg.case_duplicate() {
            return Err(ConfigError::DuplicateLocation { path: path.to_path_buf(), first, second });
        }

        tracing::debug!(
            path = %path.display(),
            locations = cfg.default_locations.len(),
            favorites = cfg.favorites.len(),
            "loaded configuration"
        );

        Ok(cfg)
    }

    /// First pair of location names that are equal ignoring case, if any.
    fn case_duplicate(&self) -> Option<(String, String)> {
        let mut seen: HashMap<String, &String> = HashMap::new();
        for name in self.default_locations.keys() {
            if let Some(first) = seen.insert(name.to_lowercase(), name) {
                return Some((first.clone(), name.clone()));
            }
        }
        None
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Write { path: parent.to_path_buf(), source })?;
        }

        let json = to_pretty_json(self)?;

        fs::write(path, json)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })?;

        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Pick the config file to use.
    ///
    /// An explicit path always wins. Otherwise `./config.json` is used when it
    /// exists, falling back to the platform config directory.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path);
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(local);
        }

        Self::platform_config_path()
    }

    /// Path to the config file inside the platform config directory.
    pub fn platform_config_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli").ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// Serialize with a four-space indent, the layout hand-edited config files use.
fn to_pretty_json(cfg: &Config) -> Result<String, ConfigError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    cfg.serialize(&mut ser).map_err(ConfigError::Serialize)?;

    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
