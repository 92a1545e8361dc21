//! Configuration management for wingdisplay
//!
//! Display settings live in a small TOML file:
//!
//! ```toml
//! name = "featherwing-3.5"
//! rotation = 90
//! brightness = 0.8
//! calibration = { x = [357, 3812], y = [390, 3555] }
//! ```
//!
//! [`DisplaySettings::load_layered`] additionally applies `WINGDISPLAY_*`
//! environment overrides (`WINGDISPLAY_NAME`, `WINGDISPLAY_ROTATION`, ...).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wingdisplay_hal::{AdapterOptions, Calibration, Profile, Rotation};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/wingdisplay";
pub const USER_CONFIG_DIR: &str = ".config/wingdisplay";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "WINGDISPLAY";

/// Display adapter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Profile key or description; empty selects the built-in display
    #[serde(default)]
    pub name: String,

    /// Rotation in degrees
    #[serde(default)]
    pub rotation: i32,

    /// Touch calibration, chip default if absent
    #[serde(default)]
    pub calibration: Option<Calibration>,

    /// Initial brightness, 0.0 to 1.0
    #[serde(default = "default_brightness")]
    pub brightness: f32,
}

fn default_brightness() -> f32 {
    1.0
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            rotation: 0,
            calibration: None,
            brightness: default_brightness(),
        }
    }
}

impl DisplaySettings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&contents)?;
        settings.validate()?;

        tracing::debug!("Loaded display settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // Try user config first, then system config
        if let Some(home) = std::env::var_os("HOME") {
            let user_config = Path::new(&home).join(USER_CONFIG_DIR).join("display.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        let system_config = Path::new(CONFIG_DIR).join("display.toml");
        if system_config.exists() {
            return Self::load(&system_config);
        }

        tracing::warn!("No display configuration found, using defaults");
        Ok(Self::default())
    }

    /// Load settings from an optional file, then apply `WINGDISPLAY_*`
    /// environment overrides on top.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("name", "")?
            .set_default("rotation", 0i64)?
            .set_default("brightness", f64::from(default_brightness()))?;

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Toml),
            );
        }

        let settings: Self = builder
            // Values stay strings so `name` is never reinterpreted as a number;
            // numeric fields are converted during deserialization
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(false))
            .build()?
            .try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check the settings can describe a real adapter
    pub fn validate(&self) -> Result<(), ConfigError> {
        Rotation::from_degrees(self.rotation).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !self.brightness.is_finite() || !(0.0..=1.0).contains(&self.brightness) {
            return Err(ConfigError::Invalid(format!(
                "brightness must be between 0.0 and 1.0, got {}",
                self.brightness
            )));
        }

        if let Some(cal) = &self.calibration {
            if cal.x.0 >= cal.x.1 || cal.y.0 >= cal.y.1 {
                return Err(ConfigError::Invalid(format!(
                    "calibration bounds must be (min, max), got x={:?} y={:?}",
                    cal.x, cal.y
                )));
            }
        }

        if Profile::from_name(&self.name).is_none() {
            // The host may still provide a built-in display, so this is not fatal here
            tracing::warn!("'{}' does not name a known display profile", self.name);
        }

        Ok(())
    }

    /// Adapter construction parameters for these settings
    pub fn to_options(&self) -> AdapterOptions {
        AdapterOptions {
            name: self.name.clone(),
            rotation: self.rotation,
            calibration: self.calibration,
            brightness: self.brightness,
        }
    }
}
