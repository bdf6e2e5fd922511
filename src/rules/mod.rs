pub mod loader;

pub use loader::{load_rules, load_watchlist, RulesError, RulesLoader};

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

/// Built-in deny-list used when no watchlist file is configured.
pub const DEFAULT_WATCHLIST: [&str; 3] = ["BadGuy1", "EvilCorp", "DrNo"];

fn default_watchlist() -> HashSet<String> {
    DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
}

fn default_threshold() -> Decimal {
    Decimal::from(10_000u32)
}

/// Immutable rule configuration injected into the evaluator at construction.
///
/// There is no hot reload: the configuration is fixed for the lifetime of
/// the evaluator, so concurrent runs can share it without synchronization.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Senders that are always blocked (exact string match)
    #[serde(default = "default_watchlist")]
    pub watchlist: HashSet<String>,

    /// Exclusive cutoff: amounts strictly above this are high-risk
    #[serde(default = "default_threshold")]
    pub amount_threshold: Decimal,
}

impl RuleConfig {
    /// Check watchlist membership. Matching is exact; senders are
    /// identifiers, not free text, so no case normalization is applied.
    #[inline]
    pub fn is_watchlisted(&self, sender: &str) -> bool {
        self.watchlist.contains(sender)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            watchlist: default_watchlist(),
            amount_threshold: default_threshold(),
        }
    }
}
