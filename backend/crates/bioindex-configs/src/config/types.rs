use super::defaults::*;
use super::tables::TableConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub portal: PortalSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub hydration: HydrationSettings,
    #[serde(default)]
    pub security: SecuritySettings,
    /// Queryable tables, in the order `/api/indexes` lists them
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Enable HTTP/2 cleartext negotiation alongside HTTP/1.1
    #[serde(default = "default_enable_http2")]
    pub enable_http2: bool,
    /// Seconds to wait for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            enable_http2: default_enable_http2(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "compact", "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// Per-target level overrides, e.g. `object_store = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            logs_path: default_logs_path(),
            log_to_console: true,
            targets: HashMap::new(),
        }
    }
}

/// Relational index database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path of the SQLite index database
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Seconds a request waits for a free connection
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            pool_size: default_pool_size(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

/// Portal database settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalSettings {
    /// Path of the portal database; the index database when unset
    #[serde(default)]
    pub database_path: Option<String>,
}

impl ServerConfig {
    /// Resolved portal database path.
    pub fn portal_database_path(&self) -> &str {
        self.portal
            .database_path
            .as_deref()
            .unwrap_or(self.database.path.as_str())
    }
}

/// Object storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Object store location: a filesystem directory, `memory://`, or
    /// `s3://bucket/prefix`
    #[serde(default = "default_storage_url")]
    pub url: String,
    #[serde(default)]
    pub s3: S3Settings,
    /// Remote storage timeout settings (S3)
    #[serde(default)]
    pub remote_timeouts: RemoteStorageTimeouts,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            url: default_storage_url(),
            s3: S3Settings::default(),
            remote_timeouts: RemoteStorageTimeouts::default(),
        }
    }
}

/// S3 connection options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Settings {
    #[serde(default = "default_s3_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub allow_http: bool,
    #[serde(default, skip_serializing)]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub secret_access_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub session_token: Option<String>,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            region: default_s3_region(),
            endpoint: None,
            allow_http: false,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

/// Timeouts applied to remote object storage clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStorageTimeouts {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for RemoteStorageTimeouts {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Record hydration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationSettings {
    /// Maximum concurrent object fetches per request
    #[serde(default = "default_hydration_concurrency")]
    pub concurrency: usize,
    /// Fraction of a batch allowed to be missing or corrupt before the
    /// request fails
    #[serde(default = "default_max_omission_ratio")]
    pub max_omission_ratio: f64,
}

impl Default for HydrationSettings {
    fn default() -> Self {
        Self {
            concurrency: default_hydration_concurrency(),
            max_omission_ratio: default_max_omission_ratio(),
        }
    }
}

/// Security settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default)]
    pub cors: CorsSettings,
}

/// CORS configuration that maps directly to actix-cors options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Empty or ["*"] allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,
    /// Allowed HTTP headers. Use ["*"] for any header.
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,
    /// Preflight cache max age in seconds
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            max_age: default_cors_max_age(),
        }
    }
}
