use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,

    pub cache: CacheConfig,

    pub status: StatusConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 2,
        }
    }
}

/// Connection parameters for the facility database.
///
/// Left empty by default; real values come from `config.toml` or the
/// `SUBWAY_DB_*` environment variables.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,

    pub database: String,

    pub user: String,

    pub password: String,

    pub port: u16,

    /// Seconds to wait for the initial connection before giving up (default: 5)
    pub connect_timeout_seconds: u64,

    /// Maximum pooled connections (default: 5)
    pub max_connections: u32,

    /// Minimum pooled connections (default: 1)
    pub min_connections: u32,

    /// Full connection URL. When set, takes precedence over the individual
    /// fields (e.g. `sqlite:data/facilities.db` for local development).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
            port: 5432,
            connect_timeout_seconds: 5,
            max_connections: 5,
            min_connections: 1,
            url: None,
        }
    }
}

const PASSWORD_MASK: &str = "********";

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &PASSWORD_MASK)
            .field("port", &self.port)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("url", &self.url.as_ref().map(|_| PASSWORD_MASK))
            .finish()
    }
}

impl DatabaseConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Builds the connection URL, reporting the first missing parameter.
    pub fn connection_url(&self) -> std::result::Result<String, String> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }

        if self.host.trim().is_empty() {
            return Err("database host is not configured".to_string());
        }
        if self.database.trim().is_empty() {
            return Err("database name is not configured".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("database user is not configured".to_string());
        }
        if self.port == 0 {
            return Err("database port must be greater than zero".to_string());
        }

        let mut url = url::Url::parse(&format!("postgres://{}", self.host.trim()))
            .map_err(|e| format!("invalid database host: {e}"))?;
        url.set_username(&self.user)
            .map_err(|()| "invalid database user".to_string())?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| "invalid database password".to_string())?;
        }
        url.set_port(Some(self.port))
            .map_err(|()| "invalid database port".to_string())?;
        url.set_path(&self.database);

        Ok(url.to_string())
    }

    /// Host/port/database description safe to put in logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.url.as_deref() {
            Some(url) if url.starts_with("sqlite:") => url.to_string(),
            Some(_) => "<configured url>".to_string(),
            None => format!("{}:{}/{}", self.host, self.port, self.database),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a lookup result stays fresh (default: 600)
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: constants::cache::DEFAULT_TTL_SECONDS,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Raw status values that mean the facility is working.
    /// Anything else is reported as down.
    pub operational_tokens: Vec<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            operational_tokens: constants::status::DEFAULT_OPERATIONAL_TOKENS
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8501,
            cors_allowed_origins: vec![
                "http://localhost:8501".to_string(),
                "http://127.0.0.1:8501".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            status: StatusConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and
    /// `SUBWAY_DB_*` overrides. Also returns the file that was read, if any,
    /// so it can be logged once tracing is up.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        let _ = dotenvy::dotenv();

        let source = Self::first_existing(&Self::config_paths());
        let mut config = match &source {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    fn first_existing(paths: &[PathBuf]) -> Option<PathBuf> {
        paths.iter().find(|path| path.exists()).cloned()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlays database settings from the environment. `lookup` is injected
    /// so tests do not have to touch process state.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;

        if let Some(url) = lookup("SUBWAY_DB_URL") {
            db.url = Some(url);
        }
        if let Some(host) = lookup("SUBWAY_DB_HOST") {
            db.host = host;
        }
        if let Some(name) = lookup("SUBWAY_DB_NAME") {
            db.database = name;
        }
        if let Some(user) = lookup("SUBWAY_DB_USER") {
            db.user = user;
        }
        if let Some(password) = lookup("SUBWAY_DB_PASSWORD") {
            db.password = password;
        }
        if let Some(port) = lookup("SUBWAY_DB_PORT") {
            db.port = port
                .parse()
                .with_context(|| format!("SUBWAY_DB_PORT is not a valid port: {port}"))?;
        }
        if let Some(timeout) = lookup("SUBWAY_DB_CONNECT_TIMEOUT") {
            db.connect_timeout_seconds = timeout.parse().with_context(|| {
                format!("SUBWAY_DB_CONNECT_TIMEOUT is not a number of seconds: {timeout}")
            })?;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("subway-facility").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".subway-facility").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache.ttl_seconds == 0 {
            anyhow::bail!("Cache TTL must be greater than zero");
        }

        if self.status.operational_tokens.is_empty() {
            anyhow::bail!("At least one operational status token must be configured");
        }

        if self.database.connect_timeout_seconds == 0 {
            anyhow::bail!("Database connect_timeout_seconds must be greater than zero");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) exceeds max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.connect_timeout_seconds, 5);
        assert_eq!(
            config.status.operational_tokens,
            vec!["M", "정상", "Y", "구동중"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[cache]"));
        assert!(toml_str.contains("[status]"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            host = "db.internal"
            database = "techplan"
            user = "reader"

            [status]
            operational_tokens = ["정상"]
            "#,
        )
        .unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.status.operational_tokens, vec!["정상"]);
    }

    #[test]
    fn test_connection_url_from_parts() {
        let db = DatabaseConfig {
            host: "db.internal".to_string(),
            database: "techplan".to_string(),
            user: "reader".to_string(),
            password: "p@ss/word".to_string(),
            port: 6543,
            ..DatabaseConfig::default()
        };

        let url = db.connection_url().unwrap();
        assert!(url.starts_with("postgres://reader:"));
        assert!(url.ends_with("@db.internal:6543/techplan"));
        assert!(!url.contains("p@ss/word"));
    }

    #[test]
    fn test_connection_url_reports_missing_fields() {
        let err = DatabaseConfig::default().connection_url().unwrap_err();
        assert!(err.contains("host"));

        let db = DatabaseConfig {
            host: "db.internal".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(db.connection_url().unwrap_err().contains("name"));
    }

    #[test]
    fn test_url_override_wins() {
        let db = DatabaseConfig {
            url: Some("sqlite::memory:".to_string()),
            ..DatabaseConfig::default()
        };
        assert_eq!(db.connection_url().unwrap(), "sqlite::memory:");
    }

    #[test]
    fn test_debug_masks_password() {
        let db = DatabaseConfig {
            password: "hunter2".to_string(),
            ..DatabaseConfig::default()
        };
        let rendered = format!("{db:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("********"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SUBWAY_DB_HOST", "env-host"),
            ("SUBWAY_DB_NAME", "env-db"),
            ("SUBWAY_DB_USER", "env-user"),
            ("SUBWAY_DB_PASSWORD", "env-secret"),
            ("SUBWAY_DB_PORT", "15432"),
            ("SUBWAY_DB_CONNECT_TIMEOUT", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.database.host, "env-host");
        assert_eq!(config.database.database, "env-db");
        assert_eq!(config.database.user, "env-user");
        assert_eq!(config.database.password, "env-secret");
        assert_eq!(config.database.port, 15432);
        assert_eq!(config.database.connect_timeout_seconds, 3);
    }

    #[test]
    fn test_env_override_rejects_bad_port() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| {
            (key == "SUBWAY_DB_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.cache.ttl_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.status.operational_tokens.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.min_connections = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_connect_timeout() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| {
                (key == "SUBWAY_DB_CONNECT_TIMEOUT").then(|| "0".to_string())
            })
            .unwrap();
        assert_eq!(config.database.connect_timeout_seconds, 0);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("connect_timeout_seconds"));
    }

    #[test]
    fn test_first_existing_config_path_wins() {
        let dir =
            std::env::temp_dir().join(format!("subway-facility-cfg-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let missing = dir.join("missing.toml");
        let present = dir.join("config.toml");
        std::fs::write(&present, "[cache]\nttl_seconds = 30\n").unwrap();

        let paths = vec![missing.clone(), present.clone()];
        assert_eq!(Config::first_existing(&paths), Some(present.clone()));
        assert_eq!(Config::first_existing(&[missing]), None);

        let config = Config::load_from_path(&present).unwrap();
        assert_eq!(config.cache.ttl_seconds, 30);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
