//! Application configuration loaded from a TOML file.
//!
//! Every key is optional; missing keys keep their defaults, so a file can
//! override just the values it cares about:
//!
//! ```toml
//! data_dir = "/var/lib/rocketsci"
//!
//! [launch]
//! specific_impulse_s = 450.0
//!
//! [ranges.thrust_kn]
//! min = 100.0
//! max = 1200.0
//! ```

use std::path::{Path, PathBuf};
use rocketsci_core::DesignRanges;
use rocketsci_lab::LaunchModel;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::error::Result;

/// Default directory for persisted state.
pub const DEFAULT_DATA_DIR: &str = ".rocketsci";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for persisted records
    pub data_dir: PathBuf,

    /// Launch model constants
    pub launch: LaunchModel,

    /// Accepted design parameter ranges
    pub ranges: DesignRanges,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            launch: LaunchModel::default(),
            ranges: DesignRanges::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Read configuration from `path` if given and present, else defaults.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if tokio::fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml_str(
            r#"
            data_dir = "/tmp/rs"

            [launch]
            specific_impulse_s = 500.0

            [ranges.thrust_kn]
            min = 10.0
            max = 2000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/rs"));
        assert_eq!(config.launch.specific_impulse_s, 500.0);
        assert_eq!(config.launch.structure_mass_kg, 500.0);
        assert_eq!(config.ranges.thrust_kn.max, 2000.0);
        assert_eq!(config.ranges.fuel_mass_kg, DesignRanges::default().fuel_mass_kg);
    }

    #[test]
    fn test_bad_type_is_config_error() {
        let err = AppConfig::from_toml_str("data_dir = 5").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = AppConfig::load_or_default(Some(path.as_path())).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocketsci.toml");
        tokio::fs::write(&path, "[launch]\ngravity = 9.81\n").await.unwrap();
        let config = AppConfig::load_or_default(Some(path.as_path())).await.unwrap();
        assert_eq!(config.launch.gravity, 9.81);
    }
}
