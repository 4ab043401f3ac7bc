//! Application configuration module
//!
//! Configuration is read from a TOML document with three optional sections.
//! Every field has a default, so a missing file or an empty document is the
//! same as [`AppConfig::default`].
//!
//! ```toml
//! [profile]
//! default_blood_pressure = "120/80"
//! default_heart_rate = "72"
//! list_delimiter = ","
//! list_join_separator = ", "
//!
//! [identity]
//! min_password_length = 6
//! max_failed_attempts = 5
//! bcrypt_cost = 12
//!
//! [store]
//! data_dir = "/var/lib/healthtrack/profiles"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `store.data_dir`
pub const ENV_DATA_DIR: &str = "HEALTHTRACK_DATA_DIR";
/// Environment variable overriding `identity.min_password_length`
pub const ENV_MIN_PASSWORD_LENGTH: &str = "HEALTHTRACK_MIN_PASSWORD_LENGTH";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileSettings,
    #[serde(default)]
    pub identity: IdentitySettings,
    #[serde(default)]
    pub store: StoreSettings,
}

/// Defaults and list encoding used when shaping profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// Shown when no blood pressure is stored
    pub default_blood_pressure: String,
    /// Shown when no heart rate is stored
    pub default_heart_rate: String,
    /// Separator used to split stored list fields
    pub list_delimiter: String,
    /// Separator used to join list fields before storing them
    pub list_join_separator: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            default_blood_pressure: "120/80".to_string(),
            default_heart_rate: "72".to_string(),
            list_delimiter: ",".to_string(),
            list_join_separator: ", ".to_string(),
        }
    }
}

/// Credential policy for the bundled identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    pub min_password_length: usize,
    /// Consecutive failed sign-ins before an email is rate limited
    pub max_failed_attempts: u32,
    pub bcrypt_cost: u32,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            max_failed_attempts: 5,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Location of the file-backed profile store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// `None` means the platform data directory (see [`StoreSettings::resolved_data_dir`])
    pub data_dir: Option<PathBuf>,
}

impl StoreSettings {
    /// The configured directory, or `<platform data dir>/healthtrack/profiles`
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("healthtrack").join("profiles")))
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse from a TOML string and validate
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!("[Config] Loaded {}", path.display());
                Self::from_toml(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[Config] {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    /// Apply `HEALTHTRACK_*` environment overrides
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            self.store.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(raw) = std::env::var(ENV_MIN_PASSWORD_LENGTH) {
            self.identity.min_password_length = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_MIN_PASSWORD_LENGTH, raw.clone()))?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile.list_delimiter.is_empty() {
            return Err(ConfigError::MissingValue("profile.list_delimiter"));
        }
        if self.identity.min_password_length == 0 {
            return Err(ConfigError::InvalidValue(
                "identity.min_password_length",
                "0".to_string(),
            ));
        }
        if !(4..=31).contains(&self.identity.bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "identity.bcrypt_cost",
                self.identity.bcrypt_cost.to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn default_blood_pressure(mut self, value: impl Into<String>) -> Self {
        self.config.profile.default_blood_pressure = value.into();
        self
    }

    pub fn default_heart_rate(mut self, value: impl Into<String>) -> Self {
        self.config.profile.default_heart_rate = value.into();
        self
    }

    pub fn min_password_length(mut self, length: usize) -> Self {
        self.config.identity.min_password_length = length;
        self
    }

    pub fn max_failed_attempts(mut self, attempts: u32) -> Self {
        self.config.identity.max_failed_attempts = attempts;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.identity.bcrypt_cost = cost;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.store.data_dir = Some(dir.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("failed to read configuration: {0}")]
    Io(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
