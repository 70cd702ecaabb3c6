use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use fitcare_core::MemberId;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the goal service
    pub api_url: ConfigValue<String>,
    /// Member whose goals are tracked
    pub member_id: ConfigValue<Option<MemberId>>,
    /// Directory holding the local ledger documents
    pub data_dir: ConfigValue<PathBuf>,
    /// Per-request timeout for the goal service
    pub request_timeout_secs: ConfigValue<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    member_id: Option<MemberId>,
    data_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut member_id = ConfigValue::new(None, ConfigSource::Default);
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut request_timeout_secs =
            ConfigValue::new(DEFAULT_REQUEST_TIMEOUT_SECS, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(id) = file_config.member_id {
                member_id = ConfigValue::new(Some(id), ConfigSource::File);
            }
            if let Some(dir) = file_config.data_dir {
                // Relative to the config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(secs) = file_config.request_timeout_secs {
                request_timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
        }

        if let Ok(url) = std::env::var("FITCARE_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(raw) = std::env::var("FITCARE_MEMBER_ID") {
            let id = raw
                .trim()
                .parse::<MemberId>()
                .map_err(|_| ConfigError::InvalidEnv("FITCARE_MEMBER_ID", raw.clone()))?;
            member_id = ConfigValue::new(Some(id), ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("FITCARE_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }

        Ok(Self {
            api_url,
            member_id,
            data_dir,
            request_timeout_secs,
            config_file,
        })
    }

    /// The configured member, or an error telling the user how to set one.
    pub fn require_member_id(&self) -> Result<MemberId, ConfigError> {
        self.member_id.value.ok_or(ConfigError::MissingMemberId)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/fitcare/
    /// - macOS: ~/Library/Application Support/fitcare/
    /// - Windows: %APPDATA%/fitcare/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitcare")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/fitcare/
    /// - macOS: ~/Library/Application Support/fitcare/
    /// - Windows: %APPDATA%/fitcare/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitcare")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidEnv(&'static str, String),
    MissingMemberId,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidEnv(name, value) => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
            ConfigError::MissingMemberId => write!(
                f,
                "No member configured. Set member_id in the config file or FITCARE_MEMBER_ID."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.member_id.value, None);
        assert_eq!(config.request_timeout_secs.value, 10);
        assert!(config.data_dir.value.ends_with("fitcare"));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_url: https://fit.example.com").unwrap();
        writeln!(file, "member_id: 42").unwrap();
        writeln!(file, "data_dir: /custom/ledger").unwrap();
        writeln!(file, "request_timeout_secs: 3").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_url.value, "https://fit.example.com");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.member_id.value, Some(42));
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/ledger"));
        assert_eq!(config.request_timeout_secs.value, 3);
        assert_eq!(config.config_file, Some(config_path));
        assert_eq!(config.require_member_id().unwrap(), 42);
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "data_dir: ledger\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("ledger"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
    }

    #[test]
    fn test_missing_member_id() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("none.yaml"))).unwrap();
        assert!(matches!(
            config.require_member_id(),
            Err(ConfigError::MissingMemberId)
        ));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "member_id: 1\n").unwrap();

        std::env::set_var("FITCARE_MEMBER_ID", "7");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.member_id.value, Some(7));
        assert_eq!(config.member_id.source, ConfigSource::Environment);

        std::env::remove_var("FITCARE_MEMBER_ID");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "member_id: [not, a, number]\n").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
