//! Configuration module for `grad-planner`

use crate::core::graduation::GraduationPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$GRAD_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Rule-book TOML used when `--rules` is not given
    #[serde(default)]
    pub rules_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Graduation thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraduationConfig {
    /// Minimum total credit
    pub min_credit: f32,
    /// Minimum total activity units
    pub min_au: u32,
    /// Minimum GPA
    pub min_gpa: f32,
    /// Minimum GPA under early graduation
    pub early_graduation_min_gpa: f32,
    /// Credit cap on major/double-major shared courses
    pub double_count_cap: f32,
}

impl Default for GraduationConfig {
    fn default() -> Self {
        let policy = GraduationPolicy::default();
        Self {
            min_credit: policy.min_credit,
            min_au: policy.min_au,
            min_gpa: policy.min_gpa,
            early_graduation_min_gpa: policy.early_graduation_min_gpa,
            double_count_cap: policy.double_count_cap,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Graduation thresholds
    #[serde(default)]
    pub graduation: GraduationConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override rule-book path
    pub rules_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid numeric value for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$GRAD_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradplanner`
    /// - macOS: `~/Library/Application Support/gradplanner`
    /// - Windows: `%APPDATA%\gradplanner`
    #[must_use]
    pub fn get_gradplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled. Graduation thresholds are filled by serde defaults at parse time.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (field, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.rules_file, &defaults.paths.rules_file),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
        ] {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the configuration file is not modified.
    /// Only non-`None` values replace config values.
    ///
    /// # Arguments
    ///
    /// * `overrides` - A `ConfigOverrides` struct with optional override values
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(rules_file) = &overrides.rules_file {
            self.paths.rules_file.clone_from(rules_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Graduation thresholds as an engine policy
    #[must_use]
    pub const fn graduation_policy(&self) -> GraduationPolicy {
        GraduationPolicy {
            min_credit: self.graduation.min_credit,
            min_au: self.graduation.min_au,
            min_gpa: self.graduation.min_gpa,
            early_graduation_min_gpa: self.graduation.early_graduation_min_gpa,
            double_count_cap: self.graduation.double_count_cap,
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, in
    /// the directory returned by [`get_gradplanner_dir`].
    ///
    /// [`get_gradplanner_dir`]: Self::get_gradplanner_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GRAD_PLANNER` in a string to the config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gradplanner_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands any `$GRAD_PLANNER`
    /// variables in path values. Missing fields use their serde defaults.
    ///
    /// # Arguments
    ///
    /// * `toml_str` - A TOML-formatted configuration string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [logging]
    /// level = "info"
    /// file = "$GRAD_PLANNER/gradplanner.log"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.rules_file = Self::expand_variables(&config.paths.rules_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds use
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults, save if changed
    /// - On first run: create the config directory and save the defaults
    ///
    /// Falls back to defaults if the file exists but cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the config
    /// directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `rules_file`, `reports_dir`,
    /// `min_credit`, `min_au`, `min_gpa`, `early_graduation_min_gpa`,
    /// `double_count_cap` (dashes accepted in place of underscores).
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "rules_file" => Some(self.paths.rules_file.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            "min_credit" => Some(self.graduation.min_credit.to_string()),
            "min_au" => Some(self.graduation.min_au.to_string()),
            "min_gpa" => Some(self.graduation.min_gpa.to_string()),
            "early_graduation_min_gpa" => {
                Some(self.graduation.early_graduation_min_gpa.to_string())
            }
            "double_count_cap" => Some(self.graduation.double_count_cap.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed for that key (e.g., "maybe" for `verbose`, "x" for `min_credit`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "rules_file" => self.paths.rules_file = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "min_credit" => self.graduation.min_credit = parse_number(key, value)?,
            "min_au" => self.graduation.min_au = parse_number(key, value)?,
            "min_gpa" => self.graduation.min_gpa = parse_number(key, value)?,
            "early_graduation_min_gpa" => {
                self.graduation.early_graduation_min_gpa = parse_number(key, value)?;
            }
            "double_count_cap" => self.graduation.double_count_cap = parse_number(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Updates the in-memory config. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "rules_file" => self.paths.rules_file.clone_from(&defaults.paths.rules_file),
            "reports_dir" => self.paths.reports_dir.clone_from(&defaults.paths.reports_dir),
            "min_credit" => self.graduation.min_credit = defaults.graduation.min_credit,
            "min_au" => self.graduation.min_au = defaults.graduation.min_au,
            "min_gpa" => self.graduation.min_gpa = defaults.graduation.min_gpa,
            "early_graduation_min_gpa" => {
                self.graduation.early_graduation_min_gpa =
                    defaults.graduation.early_graduation_min_gpa;
            }
            "double_count_cap" => {
                self.graduation.double_count_cap = defaults.graduation.double_count_cap;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  rules_file = \"{}\"", self.paths.rules_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[graduation]")?;
        writeln!(f, "  min_credit = {}", self.graduation.min_credit)?;
        writeln!(f, "  min_au = {}", self.graduation.min_au)?;
        writeln!(f, "  min_gpa = {}", self.graduation.min_gpa)?;
        writeln!(
            f,
            "  early_graduation_min_gpa = {}",
            self.graduation.early_graduation_min_gpa
        )?;
        writeln!(f, "  double_count_cap = {}", self.graduation.double_count_cap)?;

        Ok(())
    }
}
