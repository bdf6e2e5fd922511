use std::path::PathBuf;

use clap::Parser;

/// Pipeline service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "txgate")]
#[command(about = "Transaction compliance pipeline")]
pub struct Config {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "TXGATE_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Path to rules YAML file (built-in defaults if not set)
    #[arg(long, env = "TXGATE_RULES_PATH")]
    pub rules_path: Option<PathBuf>,

    /// Path to watchlist text file (overrides the rules-file watchlist)
    #[arg(long, env = "TXGATE_WATCHLIST_PATH")]
    pub watchlist_path: Option<PathBuf>,

    /// Postgres connection URL (in-memory persistence if not set)
    #[arg(long, env = "TXGATE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum database connections
    #[arg(long, default_value = "5", env = "TXGATE_DB_MAX_CONNECTIONS")]
    pub db_max_connections: u32,

    /// Latency budget in milliseconds for the submit endpoint
    #[arg(long, default_value = "100", env = "TXGATE_LATENCY_BUDGET_MS")]
    pub latency_budget_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "TXGATE_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            rules_path: None,
            watchlist_path: None,
            database_url: None,
            db_max_connections: 5,
            latency_budget_ms: 100,
            log_level: "info".to_string(),
            graceful_shutdown: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.latency_budget_ms, 100);
        assert!(config.rules_path.is_none());
        assert!(config.database_url.is_none());
    }
}
