use chrono::Utc;

use crate::domain::{ComplianceResult, ComplianceStatus, Transaction};
use crate::rules::RuleConfig;

/// Applies the compliance rules to a validated transaction.
///
/// Rules run in fixed priority order: watchlist membership first, amount
/// threshold second, default approved. The order is the tie-break policy:
/// a watchlisted sender with a large amount is BLOCKED, not HIGH_RISK.
///
/// Precondition: input has passed validation. The evaluator does not
/// re-validate; a type mismatch reaching this point is an upstream defect,
/// and adding defensive handling here would only mask it. Under that
/// precondition evaluation cannot fail, so there is no error path.
pub struct ComplianceEvaluator {
    config: RuleConfig,
}

impl ComplianceEvaluator {
    /// Build an evaluator around an immutable rule configuration.
    pub fn new(config: RuleConfig) -> Self {
        ComplianceEvaluator { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Evaluate a transaction, consuming it into a stamped result.
    pub fn evaluate(&self, transaction: Transaction) -> ComplianceResult {
        let status = if self.config.is_watchlisted(&transaction.sender) {
            ComplianceStatus::Blocked
        } else if transaction.amount > self.config.amount_threshold {
            ComplianceStatus::HighRisk
        } else {
            ComplianceStatus::Approved
        };

        ComplianceResult {
            transaction,
            status,
            checked_at: Utc::now(),
        }
    }
}
