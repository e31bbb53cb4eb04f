// Default value functions

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    5000
}

pub fn default_workers() -> usize {
    0 // 0 = one worker per physical core (actix default)
}

pub fn default_enable_http2() -> bool {
    true
}

pub fn default_shutdown_timeout_secs() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_database_path() -> String {
    "./data/bioindex.db".to_string()
}

pub fn default_pool_size() -> usize {
    8
}

pub fn default_acquire_timeout_secs() -> u64 {
    30
}

pub fn default_storage_url() -> String {
    "./data/objects".to_string()
}

pub fn default_s3_region() -> String {
    "us-east-1".to_string()
}

pub fn default_request_timeout_secs() -> u64 {
    60
}

pub fn default_connect_timeout_secs() -> u64 {
    10
}

pub fn default_hydration_concurrency() -> usize {
    16
}

pub fn default_max_omission_ratio() -> f64 {
    0.5
}

pub fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "OPTIONS".to_string()]
}

pub fn default_cors_headers() -> Vec<String> {
    vec![
        "Content-Type".to_string(),
        "Accept".to_string(),
        "Origin".to_string(),
        "X-Requested-With".to_string(),
    ]
}

pub fn default_cors_max_age() -> usize {
    3600 // 1 hour
}
