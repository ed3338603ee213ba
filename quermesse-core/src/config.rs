//! Runtime configuration.
//!
//! Values are layered: `~/.config/quermesse/config.toml` first, then
//! `QUERMESSE_*` environment variables. The calendar API key is the one
//! value without a default; loading fails before any request is made when
//! it is missing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_CALENDAR_BASE_URL, DEFAULT_GEOCODER_BASE_URL, DEFAULT_MAP_CENTER_LAT,
    DEFAULT_MAP_CENTER_LON, DEFAULT_MAP_ZOOM, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_PREFIX,
};
use crate::error::{QuermesseError, QuermesseResult};
use crate::event::GeoCoordinate;

/// Settings as they appear in the file / environment, before validation.
#[derive(Deserialize)]
struct RawConfig {
    api_key: Option<String>,
    calendar_id: Option<String>,

    #[serde(default = "default_calendar_base_url")]
    calendar_base_url: String,

    #[serde(default = "default_geocoder_base_url")]
    geocoder_base_url: String,

    #[serde(default = "default_user_agent")]
    user_agent: String,

    #[serde(default = "default_map_center_lat")]
    map_center_lat: f64,

    #[serde(default = "default_map_center_lon")]
    map_center_lon: f64,

    #[serde(default = "default_map_zoom")]
    map_zoom: u8,

    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_calendar_base_url() -> String {
    DEFAULT_CALENDAR_BASE_URL.to_string()
}

fn default_geocoder_base_url() -> String {
    DEFAULT_GEOCODER_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_map_center_lat() -> f64 {
    DEFAULT_MAP_CENTER_LAT
}

fn default_map_center_lon() -> f64 {
    DEFAULT_MAP_CENTER_LON
}

fn default_map_zoom() -> u8 {
    DEFAULT_MAP_ZOOM
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Validated configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub calendar_id: String,
    pub calendar_base_url: String,
    pub geocoder_base_url: String,
    pub user_agent: String,
    pub map_center: GeoCoordinate,
    pub map_zoom: u8,
    pub timeout: Duration,
}

impl Config {
    /// Configuration with defaults for everything but the required values.
    pub fn new(api_key: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            calendar_id: calendar_id.into(),
            calendar_base_url: default_calendar_base_url(),
            geocoder_base_url: default_geocoder_base_url(),
            user_agent: default_user_agent(),
            map_center: GeoCoordinate::new(DEFAULT_MAP_CENTER_LAT, DEFAULT_MAP_CENTER_LON)
                .unwrap_or_else(|| unreachable!("default map center is in range")),
            map_zoom: DEFAULT_MAP_ZOOM,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Default config file location: ~/.config/quermesse/config.toml
    pub fn config_path() -> QuermesseResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| QuermesseError::Config("Could not determine config directory".into()))?
            .join("quermesse");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the config file (explicit `path` must exist, the default one may not)
    /// and `QUERMESSE_*` environment variables.
    pub fn load(path: Option<&Path>) -> QuermesseResult<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        let builder = config::Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::from_builder(builder)
    }

    /// Build and validate from an already assembled set of sources.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> QuermesseResult<Self> {
        let raw: RawConfig = builder
            .build()
            .map_err(|e| QuermesseError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| QuermesseError::Config(e.to_string()))?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> QuermesseResult<Self> {
        let api_key = required(raw.api_key).ok_or_else(|| {
            QuermesseError::Config(format!(
                "Missing calendar API key. Set {}_API_KEY or api_key in the config file",
                ENV_PREFIX
            ))
        })?;

        let calendar_id = required(raw.calendar_id).ok_or_else(|| {
            QuermesseError::Config(format!(
                "Missing calendar id. Set {}_CALENDAR_ID or calendar_id in the config file",
                ENV_PREFIX
            ))
        })?;

        let map_center = GeoCoordinate::new(raw.map_center_lat, raw.map_center_lon)
            .ok_or_else(|| {
                QuermesseError::Config(format!(
                    "Map center {},{} is not a valid coordinate",
                    raw.map_center_lat, raw.map_center_lon
                ))
            })?;

        if raw.timeout_secs == 0 {
            return Err(QuermesseError::Config("timeout_secs must be positive".into()));
        }

        Ok(Config {
            api_key,
            calendar_id,
            calendar_base_url: raw.calendar_base_url,
            geocoder_base_url: raw.geocoder_base_url,
            user_agent: raw.user_agent,
            map_center,
            map_zoom: raw.map_zoom,
            timeout: Duration::from_secs(raw.timeout_secs),
        })
    }

    /// API key safe for display: first four characters, rest hidden
    pub fn masked_api_key(&self) -> String {
        let visible: String = self.api_key.chars().take(4).collect();
        format!("{}{}", visible, "*".repeat(8))
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
