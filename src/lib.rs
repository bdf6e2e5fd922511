pub mod api;
pub mod config;
pub mod domain;
pub mod observability;
pub mod pipeline;
pub mod rules;
pub mod storage;

pub use config::Config;
pub use domain::{ComplianceResult, ComplianceStatus, Transaction};
pub use pipeline::{Orchestrator, RunOutcome};
pub use rules::RuleConfig;
