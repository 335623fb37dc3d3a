//! Configuration file handling.
//!
//! Reads from `~/.config/rental-desk/config.toml` unless an explicit path is
//! given. Every key is optional.

use crate::types::RentalError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the three collection files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,
    #[serde(default = "default_vehicles_file")]
    pub vehicles_file: String,
    #[serde(default = "default_rentals_file")]
    pub rentals_file: String,
    /// Directory vehicle image paths are resolved against.
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Shown when a vehicle's own image is missing.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_accounts_file() -> String {
    "users.csv".to_string()
}

fn default_vehicles_file() -> String {
    "vehicles.csv".to_string()
}

fn default_rentals_file() -> String {
    "rentals.csv".to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_placeholder_image() -> PathBuf {
    PathBuf::from("images/placeholder.png")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            accounts_file: default_accounts_file(),
            vehicles_file: default_vehicles_file(),
            rentals_file: default_rentals_file(),
            images_dir: default_images_dir(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file is
    /// used if present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, RentalError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            RentalError::config(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::parse(&contents).map_err(|e| {
            RentalError::config(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        tracing::info!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(&self.accounts_file)
    }

    pub fn vehicles_path(&self) -> PathBuf {
        self.data_dir.join(&self.vehicles_file)
    }

    pub fn rentals_path(&self) -> PathBuf {
        self.data_dir.join(&self.rentals_file)
    }

    /// Get the path to the per-user config file.
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rental-desk").join("config.toml"))
    }
}
