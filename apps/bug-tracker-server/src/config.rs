//! Layered application configuration.
//!
//! Sources, lowest to highest precedence:
//! 1) built-in defaults
//! 2) YAML file given with `--config`
//! 3) environment variables `APP__<SECTION>__<KEY>` (e.g. `APP__SERVER__PORT=8080`)
//! 4) CLI overrides (`--port`, `--mock`, `-v`)

use std::path::Path;

use anyhow::{Context, Result, bail};
use bugs::BugsConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Connection URL used by `--mock`.
pub const MOCK_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Error responses carry a diagnostic `stack`.
    Development,
    #[default]
    Production,
    /// Behaves like `production`; exists so test deployments can be labelled.
    Test,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `0` disables the per-request limit.
    pub request_timeout_secs: u64,
    /// Serve the OpenAPI document at `/api/openapi.json`.
    pub docs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            environment: Environment::default(),
            request_timeout_secs: 30,
            docs: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL (`sqlite://...` or `postgres://...`).
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://bug-tracker.db?mode=rwc".to_owned(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `bugs=debug,tower_http=info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let any = || vec!["*".to_owned()];
        Self {
            allowed_origins: any(),
            allowed_methods: any(),
            allowed_headers: any(),
            allow_credentials: false,
            max_age_seconds: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

/// Values taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub mock: bool,
    pub verbose: u8,
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and `APP__*` environment variables.
    ///
    /// # Errors
    /// Fails if the file does not exist, a source cannot be parsed, or the
    /// merged result does not pass [`AppConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }

        if cli.mock {
            self.database.url = MOCK_DATABASE_URL.to_owned();
        }
        // Every in-memory SQLite connection is a separate database.
        if self.database.is_in_memory() {
            self.database.max_connections = 1;
        }

        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// # Errors
    /// Describes the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.database.url.trim().is_empty() {
            bail!("database.url must not be empty");
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }
        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("invalid logging.level '{}'", self.logging.level))?;
        if self.cors.allow_credentials && self.cors.allowed_origins.iter().any(|o| o == "*") {
            bail!("cors.allowed_origins ['*'] cannot be combined with cors.allow_credentials");
        }
        Ok(())
    }

    /// Settings handed to the bugs module.
    #[must_use]
    pub fn bugs_config(&self) -> BugsConfig {
        BugsConfig {
            expose_error_stack: self.server.environment == Environment::Development,
            enable_docs: self.server.docs,
            request_timeout_secs: self.server.request_timeout_secs,
        }
    }

    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Production);
        assert!(!config.bugs_config().expose_error_stack);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let file = yaml_file(
            "server:\n  port: 8080\n  environment: development\n  docs: true\nlogging:\n  format: json\n",
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.database, DatabaseConfig::default());
        let bugs = config.bugs_config();
        assert!(bugs.expose_error_stack);
        assert!(bugs.enable_docs);
    }

    #[test]
    fn test_environment_hides_stack_like_production() {
        let file = yaml_file("server:\n  environment: test\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.environment, Environment::Test);
        assert!(!config.bugs_config().expose_error_stack);
    }

    #[test]
    fn shipped_sample_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/bug-tracker.yaml");
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/bug-tracker.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("server:\n  prot: 8080\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            port: Some(6001),
            mock: true,
            verbose: 2,
        });

        assert_eq!(config.server.port, 6001);
        assert_eq!(config.database.url, MOCK_DATABASE_URL);
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn wildcard_origin_with_credentials_is_invalid() {
        let mut config = AppConfig::default();
        config.cors.allow_credentials = true;
        assert!(config.validate().is_err());

        config.cors.allowed_origins = vec!["http://localhost:3000".to_owned()];
        config.validate().unwrap();
    }

    #[test]
    fn bad_log_directive_is_invalid() {
        let mut config = AppConfig::default();
        config.logging.level = "bugs=[".to_owned();
        assert!(config.validate().is_err());
    }
}
