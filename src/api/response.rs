use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::ComplianceStatus;
use crate::pipeline::{RunFailure, RunOutcome, Sink, Stage};

/// Terminal result of a completed run.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub run_id: Uuid,
    pub sender: String,
    pub status: ComplianceStatus,
    pub sink: Sink,
    pub checked_at: DateTime<Utc>,
}

impl From<RunOutcome> for RunResponse {
    fn from(outcome: RunOutcome) -> Self {
        RunResponse {
            run_id: outcome.run_id,
            sender: outcome.sender,
            status: outcome.status,
            sink: outcome.sink,
            checked_at: outcome.checked_at,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            code: code.into(),
            stage: None,
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn from_failure(failure: &RunFailure) -> Self {
        ErrorResponse::new(failure.error.to_string(), failure.error.code())
            .with_stage(failure.stage)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub watchlist_entries: usize,
    pub amount_threshold: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineError;
    use crate::storage::PersistenceError;

    #[test]
    fn test_error_response_from_failure() {
        let failure = RunFailure {
            run_id: Uuid::nil(),
            stage: Stage::Persisting,
            error: PipelineError::Persistence(PersistenceError::Rejected(
                "throttled".to_string(),
            )),
        };

        let resp = ErrorResponse::from_failure(&failure);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["code"], "PERSISTENCE_FAILED");
        assert_eq!(json["stage"], "persisting");
        assert!(json["error"].as_str().unwrap().contains("throttled"));
    }

    #[test]
    fn test_error_response_omits_absent_stage() {
        let resp = ErrorResponse::new("bad body", "VALIDATION_FAILED");
        let json = serde_json::to_string(&resp).unwrap();

        assert!(!json.contains("stage"));
    }

    #[test]
    fn test_run_response_serialization() {
        let resp = RunResponse {
            run_id: Uuid::nil(),
            sender: "Alice".to_string(),
            status: ComplianceStatus::Approved,
            sink: Sink::DurableRecord,
            checked_at: Utc::now(),
        };

        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "APPROVED");
        assert_eq!(json["sink"], "durable_record");
    }
}
