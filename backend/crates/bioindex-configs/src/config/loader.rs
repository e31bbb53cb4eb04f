use super::types::ServerConfig;
use crate::file_helpers::normalize_dir_path;
use crate::registry::TableRegistry;
use std::fs;
use std::path::Path;

impl ServerConfig {
    /// Load configuration from a TOML file, apply environment overrides,
    /// normalize paths, and validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides()?;
        config.finalize()?;

        Ok(config)
    }

    /// Parse TOML content without overrides or validation.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - BIOINDEX_SERVER_HOST: Override server.host
    /// - BIOINDEX_SERVER_PORT: Override server.port
    /// - BIOINDEX_LOG_LEVEL: Override logging.level
    /// - BIOINDEX_LOG_TO_CONSOLE: Override logging.log_to_console
    /// - BIOINDEX_DATABASE_PATH: Override database.path
    /// - BIOINDEX_STORAGE_URL: Override storage.url
    /// - BIOINDEX_S3_ACCESS_KEY_ID / BIOINDEX_S3_SECRET_ACCESS_KEY: S3 credentials
    ///
    /// Environment variables take precedence over config.toml values.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("BIOINDEX_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("BIOINDEX_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid BIOINDEX_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(level) = env::var("BIOINDEX_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(val) = env::var("BIOINDEX_LOG_TO_CONSOLE") {
            let val = val.to_lowercase();
            self.logging.log_to_console = val == "true" || val == "1" || val == "yes";
        }

        if let Ok(path) = env::var("BIOINDEX_DATABASE_PATH") {
            self.database.path = path;
        }

        if let Ok(url) = env::var("BIOINDEX_STORAGE_URL") {
            self.storage.url = url;
        }

        if let Ok(key) = env::var("BIOINDEX_S3_ACCESS_KEY_ID") {
            self.storage.s3.access_key_id = Some(key);
        }

        if let Ok(secret) = env::var("BIOINDEX_S3_SECRET_ACCESS_KEY") {
            self.storage.s3.secret_access_key = Some(secret);
        }

        Ok(())
    }

    /// Normalize local filesystem paths and validate configuration.
    ///
    /// Call this after applying environment overrides.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        self.normalize_paths();
        self.validate()?;
        Ok(())
    }

    fn normalize_paths(&mut self) {
        self.logging.logs_path = normalize_dir_path(&self.logging.logs_path);
        self.database.path = normalize_dir_path(&self.database.path);
        if let Some(path) = self.portal.database_path.as_mut() {
            *path = normalize_dir_path(path);
        }
        if !self.storage.url.contains("://") {
            self.storage.url = normalize_dir_path(&self.storage.url);
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !valid_levels.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    valid_levels.join(", ")
                ));
            }
        }

        if self.database.path.trim().is_empty() {
            return Err(anyhow::anyhow!("database.path cannot be empty"));
        }

        if self.database.pool_size == 0 {
            return Err(anyhow::anyhow!("database.pool_size must be at least 1"));
        }

        if self.storage.url.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.url cannot be empty"));
        }

        if self.hydration.concurrency == 0 {
            return Err(anyhow::anyhow!("hydration.concurrency must be at least 1"));
        }

        let ratio = self.hydration.max_omission_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(anyhow::anyhow!(
                "hydration.max_omission_ratio ({}) must be between 0 and 1",
                ratio
            ));
        }

        // Surfaces bad table entries at startup instead of on first request
        TableRegistry::from_config(&self.tables)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
host = "0.0.0.0"
port = 5000

[logging]
level = "debug"
format = "json"

[database]
path = "/var/lib/bioindex/index.db"
pool_size = 4

[storage]
url = "s3://dig-bio-index/records"

[storage.s3]
region = "us-west-2"

[hydration]
concurrency = 8
max_omission_ratio = 0.25

[[tables]]
name = "patients"
key = "code"
id_field = "id"
value_indexed = true
fields = [
    { name = "id", type = "integer" },
    { name = "code", type = "string" },
]

[[tables]]
name = "phenotypes"
key = "name"
fields = [
    { name = "name", type = "string" },
    { name = "group", type = "string" },
]

[tables.membership]
category_field = "group"
groups = [
    { name = "t2d", allow = "glycemic,lipids" },
    { name = "all" },
]
"#;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sample() {
        let mut config = ServerConfig::parse(SAMPLE).unwrap();
        config.finalize().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.storage.url, "s3://dig-bio-index/records");
        assert_eq!(config.storage.s3.region, "us-west-2");
        assert_eq!(config.hydration.concurrency, 8);
        assert_eq!(config.tables.len(), 2);
        assert_eq!(config.portal_database_path(), "/var/lib/bioindex/index.db");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        let registry = TableRegistry::from_config(&config.tables).unwrap();
        assert_eq!(registry.table_ids().map(|t| t.as_str()).collect::<Vec<_>>(), vec!["patients", "phenotypes"]);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_hydration_settings() {
        let mut config = ServerConfig::default();
        config.hydration.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.hydration.max_omission_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_table_rejected_at_validation() {
        let mut config = ServerConfig::parse(SAMPLE).unwrap();
        config.tables[0].key = "missing".to_string();
        assert!(config.validate().is_err());
    }
}
