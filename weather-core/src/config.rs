use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{model::Coordinates, preferences::Units};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_IP_LOCATION_URL: &str = "http://ip-api.com/json";

/// Base URLs of the upstream HTTP services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_ip_location_url")]
    pub ip_location_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            ip_location_url: default_ip_location_url(),
        }
    }
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_ip_location_url() -> String {
    DEFAULT_IP_LOCATION_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("weather-cli/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Where the device location comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// IP-based lookup.
    #[default]
    Ip,
    /// Coordinates stored in this config.
    Fixed,
    /// No location capability on this host.
    None,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSource::Ip => "ip",
            LocationSource::Fixed => "fixed",
            LocationSource::None => "none",
        }
    }

    pub const fn all() -> &'static [LocationSource] {
        &[LocationSource::Ip, LocationSource::Fixed, LocationSource::None]
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    #[serde(default)]
    pub source: LocationSource,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [location]
/// source = "fixed"
/// lat = 52.37
/// lon = 4.89
///
/// [units]
/// temperature = "fahrenheit"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub units: Units,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            endpoints: Endpoints::default(),
            location: LocationConfig::default(),
            units: Units::default(),
        }
    }
}

impl Config {
    /// Coordinates for [`LocationSource::Fixed`].
    pub fn fixed_coordinates(&self) -> Result<Coordinates> {
        match (self.location.lat, self.location.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(anyhow!(
                "Location source is 'fixed' but no coordinates are configured.\n\
                 Hint: run `weather configure` and enter a latitude and longitude."
            )),
        }
    }

    /// Switch to a fixed location.
    pub fn set_fixed_location(&mut self, coords: Coordinates) {
        self.location.source = LocationSource::Fixed;
        self.location.lat = Some(coords.lat);
        self.location.lon = Some(coords.lon);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the persisted theme flag.
    pub fn theme_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("theme"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-task", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::TemperatureUnit;

    #[test]
    fn default_uses_public_endpoints_and_ip_location() {
        let cfg = Config::default();

        assert_eq!(cfg.endpoints.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.endpoints.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.location.source, LocationSource::Ip);
        assert!(cfg.user_agent.starts_with("weather-cli/"));
    }

    #[test]
    fn fixed_coordinates_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.fixed_coordinates().unwrap_err();

        assert!(err.to_string().contains("no coordinates are configured"));
    }

    #[test]
    fn set_fixed_location_switches_source() {
        let mut cfg = Config::default();
        cfg.set_fixed_location(Coordinates::new(52.37, 4.89));

        assert_eq!(cfg.location.source, LocationSource::Fixed);
        let coords = cfg.fixed_coordinates().expect("coordinates must exist");
        assert_eq!(coords, Coordinates::new(52.37, 4.89));
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[units]\ntemperature = \"fahrenheit\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.units.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(cfg.endpoints, Endpoints::default());
        assert_eq!(cfg.location.source, LocationSource::Ip);
    }

    #[test]
    fn save_then_load_preserves_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_fixed_location(Coordinates::new(-33.86, 151.21));
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "location = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
