use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub use crate::storage::PersistenceError;

/// Structural validation failures. Always caller-fixable; the offending
/// field or parse reason is surfaced verbatim.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Required field absent, null, or empty
    #[error("missing or empty field: {0}")]
    MissingField(&'static str),

    /// Field present but of the wrong type
    #[error("field `{field}` has the wrong type: {reason}")]
    WrongType { field: &'static str, reason: String },

    /// Payload could not be parsed as structured data
    #[error("unparsable payload: {0}")]
    Unparsable(String),
}

/// Union of everything that can abort a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl PipelineError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "VALIDATION_FAILED",
            PipelineError::Persistence(_) => "PERSISTENCE_FAILED",
        }
    }
}

/// Non-terminal stages of a run; identifies where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validating,
    Evaluating,
    Routing,
    Persisting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Validating => write!(f, "validating"),
            Stage::Evaluating => write!(f, "evaluating"),
            Stage::Routing => write!(f, "routing"),
            Stage::Persisting => write!(f, "persisting"),
        }
    }
}

/// Terminal failure of a run: which stage aborted it and why.
#[derive(Error, Debug)]
#[error("run {run_id} failed while {stage}: {error}")]
pub struct RunFailure {
    pub run_id: Uuid,
    pub stage: Stage,
    #[source]
    pub error: PipelineError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingField("sender");
        assert_eq!(err.to_string(), "missing or empty field: sender");

        let err = ValidationError::WrongType {
            field: "amount",
            reason: "expected a number, got string".to_string(),
        };
        assert!(err.to_string().contains("amount"));
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_error_codes() {
        let validation: PipelineError = ValidationError::MissingField("sender").into();
        assert_eq!(validation.code(), "VALIDATION_FAILED");

        let persistence: PipelineError =
            PersistenceError::Unavailable("connection refused".to_string()).into();
        assert_eq!(persistence.code(), "PERSISTENCE_FAILED");
    }

    #[test]
    fn test_run_failure_display() {
        let failure = RunFailure {
            run_id: Uuid::nil(),
            stage: Stage::Persisting,
            error: PersistenceError::Rejected("throttled".to_string()).into(),
        };

        let msg = failure.to_string();
        assert!(msg.contains("persisting"));
        assert!(msg.contains("throttled"));
    }
}
