//! Server logging.
//!
//! Library crates log through the `log` facade; `LogTracer` forwards those
//! records into the tracing registry built here. Output goes to
//! `<logs_path>/server.log` and optionally the console.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use bioindex_configs::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Extra per-target levels, `target=level` pairs separated by commas.
/// Applied over `[logging.targets]`.
pub const TARGETS_ENV: &str = "BIOINDEX_LOG_TARGETS";

const LOG_FILE_NAME: &str = "server.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// HTTP, TLS and storage client crates log per request at info; cap them.
const NOISY_TARGETS: &[(&str, &str)] = &[
    ("actix_server", "warn"),
    ("actix_web", "warn"),
    ("h2", "warn"),
    ("hyper", "warn"),
    ("hyper_util", "warn"),
    ("reqwest", "warn"),
    ("rustls", "warn"),
    ("object_store", "info"),
];

/// Parse a `target=level[,target=level]` list. Blank entries are skipped.
pub fn parse_target_overrides(spec: &str) -> anyhow::Result<Vec<(String, String)>> {
    spec.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((target, level)) if !target.trim().is_empty() && !level.trim().is_empty() => {
                Ok((target.trim().to_string(), level.trim().to_string()))
            }
            _ => Err(anyhow::anyhow!(
                "Invalid {} entry '{}': expected target=level",
                TARGETS_ENV,
                entry
            )),
        })
        .collect()
}

/// Directives in precedence order: base level, capped noisy crates, then the
/// configured targets sorted by name.
pub fn build_env_filter(level: &str, targets: &BTreeMap<String, String>) -> anyhow::Result<EnvFilter> {
    let directives: Vec<String> = std::iter::once(level.to_string())
        .chain(NOISY_TARGETS.iter().map(|(t, l)| format!("{}={}", t, l)))
        .chain(targets.iter().map(|(t, l)| format!("{}={}", t, l)))
        .collect();

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", filter_str, e))
}

/// Config targets merged with `env_targets`, which win on conflict.
fn effective_targets(
    settings: &LoggingSettings,
    env_targets: Option<&str>,
) -> anyhow::Result<BTreeMap<String, String>> {
    let mut targets: BTreeMap<String, String> = settings
        .targets
        .iter()
        .map(|(t, l)| (t.clone(), l.clone()))
        .collect();
    if let Some(spec) = env_targets {
        targets.extend(parse_target_overrides(spec)?);
    }
    Ok(targets)
}

pub fn log_file_path(settings: &LoggingSettings) -> PathBuf {
    PathBuf::from(&settings.logs_path).join(LOG_FILE_NAME)
}

/// Install the global subscriber. Returns the log file path.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<PathBuf> {
    let env_targets = std::env::var(TARGETS_ENV).ok();
    let targets = effective_targets(settings, env_targets.as_deref())?;
    let format = LogFormat::parse(&settings.format);

    fs::create_dir_all(&settings.logs_path)?;
    let file_path = log_file_path(settings);
    let log_file = OpenOptions::new().create(true).append(true).open(&file_path)?;

    // Already set when tests bootstrap more than once
    tracing_log::LogTracer::init().ok();

    let console_layer = settings.log_to_console.then(|| {
        build_env_filter(&settings.level, &targets).map(|filter| {
            let layer = tracing_subscriber::fmt::layer().with_target(true);
            match format {
                LogFormat::Pretty => layer.pretty().with_filter(filter).boxed(),
                _ => layer.compact().with_filter(filter).boxed(),
            }
        })
    });
    let console_layer = console_layer.transpose()?;

    let file_filter = build_env_filter(&settings.level, &targets)?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(log_file)
        .with_target(true)
        .with_thread_names(true);
    let file_layer = match format {
        LogFormat::Json => file_layer.json().with_filter(file_filter).boxed(),
        LogFormat::Compact | LogFormat::Pretty => file_layer.with_filter(file_filter).boxed(),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        level = %settings.level,
        console = settings.log_to_console,
        file = %file_path.display(),
        "logging initialized"
    );
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSONL "), LogFormat::Json);
        assert_eq!(LogFormat::parse("Pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Compact);
    }

    #[test]
    fn test_env_filter_with_targets() {
        let targets = BTreeMap::from([
            ("bioindex_core".to_string(), "debug".to_string()),
            ("bioindex_store".to_string(), "trace".to_string()),
        ]);

        let rendered = build_env_filter("info", &targets).unwrap().to_string();
        assert!(rendered.contains("bioindex_core=debug"));
        assert!(rendered.contains("actix_server=warn"));
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        let targets = BTreeMap::from([("bioindex_core".to_string(), "loud!!".to_string())]);
        assert!(build_env_filter("info", &targets).is_err());
    }

    #[test]
    fn test_parse_target_overrides() {
        let parsed = parse_target_overrides(" bioindex_core=debug, ,object_store = warn ").unwrap();
        assert_eq!(
            parsed,
            vec![
                ("bioindex_core".to_string(), "debug".to_string()),
                ("object_store".to_string(), "warn".to_string()),
            ]
        );
        assert!(parse_target_overrides("").unwrap().is_empty());
        assert!(parse_target_overrides("bioindex_core").is_err());
        assert!(parse_target_overrides("=debug").is_err());
    }

    #[test]
    fn test_env_targets_override_config() {
        let mut settings = LoggingSettings::default();
        settings.targets.insert("bioindex_core".to_string(), "info".to_string());
        settings.targets.insert("bioindex_api".to_string(), "warn".to_string());

        let targets = effective_targets(&settings, Some("bioindex_core=trace")).unwrap();
        assert_eq!(targets["bioindex_core"], "trace");
        assert_eq!(targets["bioindex_api"], "warn");

        let targets = effective_targets(&settings, None).unwrap();
        assert_eq!(targets["bioindex_core"], "info");
    }

    #[test]
    fn test_log_file_path() {
        let settings = LoggingSettings {
            logs_path: "/var/log/bioindex".to_string(),
            ..LoggingSettings::default()
        };
        assert_eq!(log_file_path(&settings), PathBuf::from("/var/log/bioindex/server.log"));
    }
}
