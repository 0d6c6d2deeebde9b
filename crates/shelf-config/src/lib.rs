//! Configuration management for shelf.
//!
//! Parses `shelf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Content
//! directories are resolved relative to the config file's location.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The log level is an ordinary configuration value (`[log] level`);
//! nothing in the system consults a mutable global to decide verbosity.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content data directory.
    pub data_dir: Option<PathBuf>,
    /// Override view template directory.
    pub views_dir: Option<PathBuf>,
    /// Override static resource directory.
    pub static_dir: Option<PathBuf>,
    /// Override log level.
    pub log_level: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "shelf.toml";

/// Accepted log level directives.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content directories (paths are relative strings from TOML).
    #[serde(default)]
    content: ContentConfigRaw,
    /// Logging configuration.
    pub log: LogConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    data_dir: Option<String>,
    views_dir: Option<String>,
    static_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root directory of the category hierarchy.
    pub data_dir: PathBuf,
    /// Directory holding view templates.
    pub views_dir: PathBuf,
    /// Directory holding static resources.
    pub static_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level directive (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `shelf.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &settings.data_dir {
            self.content_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(views_dir) = &settings.views_dir {
            self.content_resolved.views_dir.clone_from(views_dir);
        }
        if let Some(static_dir) = &settings.static_dir {
            self.content_resolved.static_dir.clone_from(static_dir);
        }
        if let Some(log_level) = &settings.log_level {
            self.log.level.clone_from(log_level);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            log: LogConfig::default(),
            content_resolved: ContentConfig {
                data_dir: base.join("data"),
                views_dir: base.join("views"),
                static_dir: base.join("static"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_log()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate logging configuration.
    fn validate_log(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "log.level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            data_dir: resolve(self.content.data_dir.as_deref(), "data"),
            views_dir: resolve(self.content.views_dir.as_deref(), "views"),
            static_dir: resolve(self.content.static_dir.as_deref(), "static"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.content_resolved.data_dir, PathBuf::from("/test/data"));
        assert_eq!(
            config.content_resolved.views_dir,
            PathBuf::from("/test/views")
        );
        assert_eq!(
            config.content_resolved.static_dir,
            PathBuf::from("/test/static")
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_log_config() {
        let toml = r#"
[log]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
data_dir = "site/data"
views_dir = "site/views"
static_dir = "site/public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/project/site/data")
        );
        assert_eq!(
            config.content_resolved.views_dir,
            PathBuf::from("/project/site/views")
        );
        assert_eq!(
            config.content_resolved.static_dir,
            PathBuf::from("/project/site/public")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/project/data")
        );
        assert_eq!(
            config.content_resolved.views_dir,
            PathBuf::from("/project/views")
        );
        assert_eq!(
            config.content_resolved.static_dir,
            PathBuf::from("/project/static")
        );
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let toml = r#"
[server]
port = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let toml = r#"
[server]
host = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let toml = r#"
[log]
level = "loud"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("log.level"));
    }

    #[test]
    fn test_apply_cli_settings_host_and_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log.level, "info"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_dirs() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            data_dir: Some(PathBuf::from("/elsewhere/data")),
            static_dir: Some(PathBuf::from("/elsewhere/public")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/elsewhere/data")
        );
        assert_eq!(
            config.content_resolved.views_dir,
            PathBuf::from("/test/views") // Unchanged
        );
        assert_eq!(
            config.content_resolved.static_dir,
            PathBuf::from("/elsewhere/public")
        );
    }

    #[test]
    fn test_apply_cli_settings_log_level() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            log_level: Some("debug".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/shelf.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("shelf.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
port = 3000

[content]
data_dir = "content"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.content_resolved.data_dir, temp.path().join("content"));
        assert_eq!(config.content_resolved.views_dir, temp.path().join("views"));
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("shelf.toml");
        std::fs::write(&config_path, "[log]\nlevel = \"loud\"\n").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_cli_settings_validated_after_apply() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("shelf.toml");
        std::fs::write(&config_path, "").unwrap();

        let settings = CliSettings {
            log_level: Some("loud".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(&config_path), Some(&settings));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
