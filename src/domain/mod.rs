pub mod compliance;
pub mod transaction;

pub use compliance::{ComplianceResult, ComplianceStatus};
pub use transaction::Transaction;
