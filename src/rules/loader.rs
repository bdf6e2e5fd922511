use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::RuleConfig;

/// Errors that can occur while loading rule configuration.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load a rule configuration from a YAML file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleConfig, RulesError> {
    let content = fs::read_to_string(path)?;
    let config: RuleConfig = serde_yaml::from_str(&content)?;

    validate_rules(&config)?;

    Ok(config)
}

/// Load a watchlist from a text file.
///
/// Expected format: one sender per line, # for comments. Entries are kept
/// verbatim; watchlist matching is exact.
pub fn load_watchlist(path: impl AsRef<Path>) -> Result<HashSet<String>, RulesError> {
    let content = fs::read_to_string(path)?;
    let mut watchlist = HashSet::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        watchlist.insert(line.to_string());
    }

    Ok(watchlist)
}

/// Validate rule configuration.
fn validate_rules(config: &RuleConfig) -> Result<(), RulesError> {
    if config.amount_threshold.is_sign_negative() {
        return Err(RulesError::Validation(
            "Amount threshold cannot be negative".to_string(),
        ));
    }

    if config.watchlist.iter().any(|entry| entry.is_empty()) {
        return Err(RulesError::Validation(
            "Watchlist entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Loader combining the optional rules file and optional watchlist file.
///
/// With neither path configured the built-in defaults apply. A watchlist
/// file, when present, replaces the watchlist from the rules file (or the
/// default) entirely.
pub struct RulesLoader {
    rules_path: Option<PathBuf>,
    watchlist_path: Option<PathBuf>,
}

impl RulesLoader {
    pub fn new(rules_path: Option<PathBuf>, watchlist_path: Option<PathBuf>) -> Self {
        RulesLoader {
            rules_path,
            watchlist_path,
        }
    }

    /// Load the effective rule configuration.
    pub fn load(&self) -> Result<RuleConfig, RulesError> {
        let mut config = match &self.rules_path {
            Some(path) => load_rules(path)?,
            None => RuleConfig::default(),
        };

        if let Some(path) = &self.watchlist_path {
            config.watchlist = load_watchlist(path)?;
        }

        validate_rules(&config)?;

        Ok(config)
    }
}
