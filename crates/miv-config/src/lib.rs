//! Configuration management for miv.
//!
//! Parses `miv.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [scan]
//! exclude = ["target/**", "node_modules/**"]
//! hidden = false
//! respect_gitignore = true
//!
//! [languages]
//! extensions = { "es6" = "javascript" }
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use miv_core::Language;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config;
/// `exclude` patterns are appended to the configured ones.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override hidden file traversal.
    pub hidden: Option<bool>,
    /// Override `.gitignore` handling.
    pub respect_gitignore: Option<bool>,
    /// Additional exclude patterns.
    pub exclude: Vec<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "miv.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File walking configuration.
    pub scan: ScanConfig,
    /// Extension to language mapping.
    pub languages: LanguagesConfig,

    /// Compiled exclude patterns (set after loading).
    #[serde(skip)]
    exclude_resolved: Vec<Pattern>,
    /// Normalized extension overrides (set after loading).
    #[serde(skip)]
    extensions_resolved: HashMap<String, Language>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// File walking configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob patterns, relative to the scan root, of paths to skip.
    pub exclude: Vec<String>,
    /// Descend into hidden files and directories.
    pub hidden: bool,
    /// Skip paths ignored by `.gitignore` files.
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            hidden: false,
            respect_gitignore: true,
        }
    }
}

/// Extension to language mapping.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Extra extension mappings, e.g. `"es6" = "javascript"`.
    ///
    /// Take precedence over the built-in extension table.
    pub extensions: HashMap<String, String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Lowercase an extension and drop a leading dot.
fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `miv.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value (including CLI exclude patterns) is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.resolve()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(hidden) = settings.hidden {
            self.scan.hidden = hidden;
        }
        if let Some(respect_gitignore) = settings.respect_gitignore {
            self.scan.respect_gitignore = respect_gitignore;
        }
        self.scan.exclude.extend(settings.exclude.iter().cloned());
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values and build the lookup tables.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for malformed glob patterns, empty
    /// extension keys, and unknown language ids.
    pub fn resolve(&mut self) -> Result<(), ConfigError> {
        self.exclude_resolved = self.resolve_exclude()?;
        self.extensions_resolved = self.resolve_extensions()?;
        Ok(())
    }

    fn resolve_exclude(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.scan
            .exclude
            .iter()
            .map(|pattern| {
                require_non_empty(pattern, "scan.exclude pattern")?;
                Pattern::new(pattern).map_err(|e| {
                    ConfigError::Validation(format!(
                        "scan.exclude pattern '{pattern}' is invalid: {e}"
                    ))
                })
            })
            .collect()
    }

    fn resolve_extensions(&self) -> Result<HashMap<String, Language>, ConfigError> {
        let mut resolved = HashMap::with_capacity(self.languages.extensions.len());
        for (ext, id) in &self.languages.extensions {
            let key = normalize_extension(ext);
            require_non_empty(&key, "languages.extensions key")?;
            let language = id.parse::<Language>().map_err(|e| {
                ConfigError::Validation(format!("languages.extensions.{ext}: {e}"))
            })?;
            resolved.insert(key, language);
        }
        Ok(resolved)
    }

    /// Language for a file, judged by its extension.
    ///
    /// Configured mappings win over the built-in table.
    #[must_use]
    pub fn language_for_path(&self, path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        let key = normalize_extension(ext);
        self.extensions_resolved
            .get(&key)
            .copied()
            .or_else(|| Language::from_extension(&key))
    }

    /// Whether `relative` (a path below the scan root) matches an exclude
    /// pattern.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude_resolved
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }
}
