//! TOML-based configuration for ermap.
//!
//! Supports a config file (ermap.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [import]
//! dsn = "${DATABASE_URL}"
//! schema = "public"
//! tables = ["user", "pet", "user_pets"]
//!
//! [output]
//! format = "json"
//! path = "./schema.json"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// What to inspect.
    pub import: ImportSettings,

    /// Where and how to write the result.
    pub output: OutputSettings,
}

/// Inspection settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Connection string (supports ${ENV_VAR} expansion).
    pub dsn: Option<String>,

    /// Schema to inspect; derived from the DSN when unset.
    pub schema: Option<String>,

    /// Table allow-list. Empty means all tables.
    pub tables: Vec<String>,

    /// Read the catalog from a JSON snapshot instead of a live database.
    pub snapshot: Option<PathBuf>,
}

impl ImportSettings {
    /// Get the DSN with environment variables expanded.
    pub fn resolved_dsn(&self) -> Result<Option<String>, SettingsError> {
        self.dsn.as_deref().map(expand_env_vars).transpose()
    }
}

/// Output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "json" or "builder".
    pub format: String,

    /// Output file; stdout when unset.
    pub path: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            path: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `ERMAP_CONFIG`
    /// 2. `./ermap.toml`
    /// 3. `~/.config/ermap/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("ERMAP_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("ermap.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("ermap").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let name = chars.by_ref().take_while(|ch| *ch != '}').collect();
            name
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
