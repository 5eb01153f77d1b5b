use lambda_runtime::Error;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for running against local DynamoDB.
    Pretty,
    /// One JSON object per event; CloudWatch stamps the time.
    Json,
}

impl LogFormat {
    pub fn for_config(config: &AppConfig) -> Self {
        if config.is_local() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Installs the process-wide subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(config: &AppConfig) -> Result<(), Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match LogFormat::for_config(config) {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(filter)
            .with_ansi(false)
            .without_time()
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_environment_logs_human_readable_lines() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(LogFormat::for_config(&config), LogFormat::Pretty);
    }

    #[test]
    fn deployed_environment_logs_json() {
        let config = AppConfig::from_lookup(|key| (key == "ENV").then(|| "dev".to_string()));
        assert_eq!(LogFormat::for_config(&config), LogFormat::Json);
    }
}
