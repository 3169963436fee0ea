//! TOML Configuration File Support
//!
//! Loads the lion's settings from `~/.config/bible-lion/lion.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [pet]
//! name = "Judah"
//! streak = 0
//!
//! [pet.stats]
//! faith = 10
//! food = 90
//!
//! [timing]
//! needs_decay_secs = 30
//! inactivity_check_secs = 1
//! cue_expiry_ms = 100
//! lonely_hours = 12
//! abandoned_hours = 24
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mood::InactivityThresholds;
use crate::stats::{PetStats, Stat, STAT_MAX};

/// Environment variable naming an alternate config file
pub const ENV_CONFIG_PATH: &str = "LION_CONFIG";
/// Environment variable overriding the pet name
pub const ENV_NAME: &str = "LION_NAME";
/// Environment variable overriding the needs decay interval (seconds)
pub const ENV_NEEDS_DECAY_SECS: &str = "LION_NEEDS_DECAY_SECS";
/// Environment variable overriding the inactivity check interval (seconds)
pub const ENV_INACTIVITY_CHECK_SECS: &str = "LION_INACTIVITY_CHECK_SECS";

/// Longest accepted interval for any periodic task
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Starting stats; missing entries keep their defaults
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsToml {
    /// Faith
    pub faith: Option<u8>,
    /// Joy
    pub joy: Option<u8>,
    /// Love
    pub love: Option<u8>,
    /// Peace
    pub peace: Option<u8>,
    /// Food
    pub food: Option<u8>,
    /// Water
    pub water: Option<u8>,
}

impl StatsToml {
    fn value(&self, stat: Stat) -> Option<u8> {
        match stat {
            Stat::Faith => self.faith,
            Stat::Joy => self.joy,
            Stat::Love => self.love,
            Stat::Peace => self.peace,
            Stat::Food => self.food,
            Stat::Water => self.water,
        }
    }
}

/// Pet section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetToml {
    /// Pet name
    pub name: Option<String>,

    /// Starting devotional streak
    pub streak: Option<u32>,

    /// Starting stats
    pub stats: StatsToml,
}

/// Timing section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingToml {
    /// Seconds between food/water decay steps
    pub needs_decay_secs: Option<u64>,

    /// Seconds between inactivity checks
    pub inactivity_check_secs: Option<u64>,

    /// Milliseconds between animation-cue expiry checks
    pub cue_expiry_ms: Option<u64>,

    /// Hours without activity before the lion gets lonely
    pub lonely_hours: Option<u32>,

    /// Hours without activity before the lion feels abandoned
    pub abandoned_hours: Option<u32>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LionToml {
    /// Pet configuration section
    pub pet: PetToml,

    /// Timing configuration section
    pub timing: TimingToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for one companion session
#[derive(Clone, Debug)]
pub struct LionConfig {
    /// Pet name
    pub name: String,

    /// Starting stats
    pub initial_stats: PetStats,

    /// Starting devotional streak
    pub initial_streak: u32,

    /// Time between food/water decay steps
    pub needs_decay_interval: Duration,

    /// Time between inactivity checks
    pub inactivity_check_interval: Duration,

    /// Time between animation-cue expiry checks
    pub cue_expiry_interval: Duration,

    /// Inactivity thresholds
    pub thresholds: InactivityThresholds,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for LionConfig {
    fn default() -> Self {
        Self {
            name: "Leo".to_string(),
            initial_stats: PetStats::default(),
            initial_streak: 3,
            needs_decay_interval: Duration::from_secs(30),
            inactivity_check_interval: Duration::from_secs(1),
            cue_expiry_interval: Duration::from_millis(100),
            thresholds: InactivityThresholds::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl LionConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty name, an
    /// interval that is zero or longer than [`MAX_INTERVAL`], or a lonely
    /// threshold that is not below the abandoned one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "pet name must not be empty".to_string(),
            ));
        }
        for (label, interval) in [
            ("needs decay interval", self.needs_decay_interval),
            ("inactivity check interval", self.inactivity_check_interval),
            ("cue expiry interval", self.cue_expiry_interval),
        ] {
            if interval.is_zero() {
                return Err(ConfigError::ValidationError(format!(
                    "{label} must be greater than zero"
                )));
            }
            if interval > MAX_INTERVAL {
                return Err(ConfigError::ValidationError(format!(
                    "{label} must be at most {}s",
                    MAX_INTERVAL.as_secs()
                )));
            }
        }
        if self.thresholds.lonely >= self.thresholds.abandoned {
            return Err(ConfigError::ValidationError(format!(
                "lonely threshold ({}h) must be below abandoned threshold ({}h)",
                self.thresholds.lonely.num_hours(),
                self.thresholds.abandoned.num_hours()
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/bible-lion/lion.toml` or
/// `~/.config/bible-lion/lion.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bible-lion").join("lion.toml"))
}

/// Load configuration from all sources with proper priority
///
/// `LION_CONFIG`, when set, replaces the default file location.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resulting configuration is invalid. A missing config file is not an
/// error (defaults are used).
pub fn load_config() -> Result<LionConfig, ConfigError> {
    let path = std::env::var_os(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .or_else(default_config_path);
    load_config_from_path(path)
}

/// Load configuration from a specific path, then apply the environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if a value fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<LionConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<LionConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = LionConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: LionToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut LionConfig, toml: &LionToml) -> Result<(), ConfigError> {
    // Pet settings
    if let Some(ref name) = toml.pet.name {
        config.name = name.clone();
    }
    if let Some(streak) = toml.pet.streak {
        config.initial_streak = streak;
    }

    let mut values = [0u8; 6];
    for (slot, stat) in values.iter_mut().zip(Stat::ALL) {
        let value = toml.pet.stats.value(stat);
        if let Some(v) = value.filter(|&v| v > STAT_MAX) {
            return Err(ConfigError::ValidationError(format!(
                "stat '{}' is {v}, must be at most {STAT_MAX}",
                stat.label().to_lowercase()
            )));
        }
        *slot = value.unwrap_or_else(|| config.initial_stats.get(stat));
    }
    // Stat::ALL is food, water, faith, joy, love, peace
    let [food, water, faith, joy, love, peace] = values;
    config.initial_stats = PetStats::new(faith, joy, love, peace, food, water);

    // Timing settings
    if let Some(secs) = toml.timing.needs_decay_secs {
        config.needs_decay_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = toml.timing.inactivity_check_secs {
        config.inactivity_check_interval = Duration::from_secs(secs);
    }
    if let Some(ms) = toml.timing.cue_expiry_ms {
        config.cue_expiry_interval = Duration::from_millis(ms);
    }
    if let Some(hours) = toml.timing.lonely_hours {
        config.thresholds.lonely = chrono::Duration::hours(i64::from(hours));
    }
    if let Some(hours) = toml.timing.abandoned_hours {
        config.thresholds.abandoned = chrono::Duration::hours(i64::from(hours));
    }

    Ok(())
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut LionConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = env(ENV_NAME) {
        config.name = name;
        config.source = ConfigSource::Env;
    }
    if let Some(secs) = env(ENV_NEEDS_DECAY_SECS) {
        match secs.parse::<u64>() {
            Ok(s) => {
                config.needs_decay_interval = Duration::from_secs(s);
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %secs, "Ignoring invalid {ENV_NEEDS_DECAY_SECS}"),
        }
    }
    if let Some(secs) = env(ENV_INACTIVITY_CHECK_SECS) {
        match secs.parse::<u64>() {
            Ok(s) => {
                config.inactivity_check_interval = Duration::from_secs(s);
                config.source = ConfigSource::Env;
            }
            Err(_) => {
                tracing::warn!(value = %secs, "Ignoring invalid {ENV_INACTIVITY_CHECK_SECS}");
            }
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`], then call [`LionConfig::validate`].
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Pet name override
    pub name: Option<String>,

    /// Needs decay interval override (seconds)
    pub needs_decay_secs: Option<u64>,

    /// Inactivity check interval override (seconds)
    pub inactivity_check_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pet name override
    #[must_use]
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set needs decay interval override
    #[must_use]
    pub fn with_needs_decay_secs(mut self, secs: u64) -> Self {
        self.needs_decay_secs = Some(secs);
        self
    }

    /// Set inactivity check interval override
    #[must_use]
    pub fn with_inactivity_check_secs(mut self, secs: u64) -> Self {
        self.inactivity_check_secs = Some(secs);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut LionConfig) {
        if self.name.is_some()
            || self.needs_decay_secs.is_some()
            || self.inactivity_check_secs.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref name) = self.name {
            config.name = name.clone();
        }
        if let Some(secs) = self.needs_decay_secs {
            config.needs_decay_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.inactivity_check_secs {
            config.inactivity_check_interval = Duration::from_secs(secs);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = LionConfig::default();
        assert_eq!(config.name, "Leo");
        assert_eq!(config.initial_streak, 3);
        assert_eq!(config.initial_stats, PetStats::default());
        assert_eq!(config.needs_decay_interval, Duration::from_secs(30));
        assert_eq!(config.inactivity_check_interval, Duration::from_secs(1));
        assert_eq!(config.cue_expiry_interval, Duration::from_millis(100));
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.to_string_lossy().contains("bible-lion"));
            assert!(p.to_string_lossy().ends_with("lion.toml"));
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config_with_env(
            Some(PathBuf::from("/nonexistent/bible-lion/lion.toml")),
            no_env,
        )
        .unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_parse_valid_toml() {
        let file = write_toml(
            r#"
[pet]
name = "Judah"
streak = 0

[pet.stats]
faith = 10
food = 90

[timing]
needs_decay_secs = 60
lonely_hours = 6
abandoned_hours = 18
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.name, "Judah");
        assert_eq!(config.initial_streak, 0);
        assert_eq!(config.initial_stats.faith(), 10);
        assert_eq!(config.initial_stats.food(), 90);
        // Untouched stats keep defaults
        assert_eq!(config.initial_stats.joy(), 80);
        assert_eq!(config.initial_stats.water(), 50);
        assert_eq!(config.needs_decay_interval, Duration::from_secs(60));
        assert_eq!(config.inactivity_check_interval, Duration::from_secs(1));
        assert_eq!(config.thresholds.lonely, chrono::Duration::hours(6));
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_toml("[pet]\nname = \"Judah\"\n");
        let env: HashMap<&str, &str> = [(ENV_NAME, "Aslan"), (ENV_NEEDS_DECAY_SECS, "5")]
            .into_iter()
            .collect();

        let config = load_config_with_env(Some(file.path().to_path_buf()), |k| {
            env.get(k).map(|v| (*v).to_string())
        })
        .unwrap();

        assert_eq!(config.name, "Aslan");
        assert_eq!(config.needs_decay_interval, Duration::from_secs(5));
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_invalid_env_value_is_ignored() {
        let config = load_config_with_env(None, |k| {
            (k == ENV_INACTIVITY_CHECK_SECS).then(|| "soon".to_string())
        })
        .unwrap();
        assert_eq!(config.inactivity_check_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_stat_above_max_rejected() {
        let file = write_toml("[pet.stats]\nfaith = 150\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let file = write_toml("[timing]\nneeds_decay_secs = 0\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_oversized_interval_rejected() {
        let file = write_toml("[timing]\nneeds_decay_secs = 9000000000000\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let mut config = LionConfig::default();
        config.cue_expiry_interval = MAX_INTERVAL;
        assert!(config.validate().is_ok());
        config.cue_expiry_interval = MAX_INTERVAL + Duration::from_millis(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let file = write_toml("[timing]\nlonely_hours = 30\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_toml("[pet\nname = ");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LionConfig::default();
        ConfigOverrides::new()
            .with_name("Simba".to_string())
            .with_needs_decay_secs(2)
            .apply(&mut config);
        assert_eq!(config.name, "Simba");
        assert_eq!(config.needs_decay_interval, Duration::from_secs(2));
        assert_eq!(config.source(), ConfigSource::Cli);

        let mut untouched = LionConfig::default();
        ConfigOverrides::new().apply(&mut untouched);
        assert_eq!(untouched.source(), ConfigSource::Default);
    }
}
