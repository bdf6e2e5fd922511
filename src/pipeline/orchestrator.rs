use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{ComplianceResult, ComplianceStatus, Transaction};
use crate::storage::{ArchiveStore, DurableRecord, PersistenceError, RecordStore};

use super::error::{PipelineError, RunFailure, Stage};
use super::evaluator::ComplianceEvaluator;
use super::router::{route, Sink};
use super::validator;

/// Tagged state of one in-flight run.
///
/// Transitions are strictly sequential and one-directional:
/// Validating -> Evaluating -> Routing -> Persisting -> Completed, with
/// Failed absorbing from any non-terminal state. Each state carries exactly
/// the payload the next transition needs, so an in-flight run is fully
/// described by its current state and could later be resumed from it.
#[derive(Debug)]
pub enum RunState {
    Validating(serde_json::Value),
    Evaluating(Transaction),
    Routing(ComplianceResult),
    Persisting(Sink, ComplianceResult),
    Completed(RunOutcome),
    Failed {
        stage: Stage,
        error: PipelineError,
    },
}

impl RunState {
    /// The stage this state is waiting on, None once terminal.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RunState::Validating(_) => Some(Stage::Validating),
            RunState::Evaluating(_) => Some(Stage::Evaluating),
            RunState::Routing(_) => Some(Stage::Routing),
            RunState::Persisting(..) => Some(Stage::Persisting),
            RunState::Completed(_) | RunState::Failed { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.stage().is_none()
    }
}

/// Observable result of a completed run. Carries the terminal facts only;
/// the evaluated record itself is not retained after the sink write.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub sender: String,
    pub status: ComplianceStatus,
    pub sink: Sink,
    pub checked_at: DateTime<Utc>,
}

/// Sequences one transaction through validation, evaluation, routing and
/// exactly one sink write.
///
/// Holds only shared read-only collaborators, so any number of runs may
/// execute concurrently on the same orchestrator. Contract per run: run
/// once, fail fast, report precisely. No retry policy lives here; retries
/// belong to the caller re-submitting the whole transaction.
pub struct Orchestrator {
    evaluator: ComplianceEvaluator,
    records: Arc<dyn RecordStore>,
    archive: Arc<dyn ArchiveStore>,
}

impl Orchestrator {
    pub fn new(
        evaluator: ComplianceEvaluator,
        records: Arc<dyn RecordStore>,
        archive: Arc<dyn ArchiveStore>,
    ) -> Self {
        Orchestrator {
            evaluator,
            records,
            archive,
        }
    }

    pub fn evaluator(&self) -> &ComplianceEvaluator {
        &self.evaluator
    }

    /// Drive one run to its terminal state.
    ///
    /// A failure in any stage aborts immediately: no later stage executes,
    /// so a validation error can never produce a sink write. Completion
    /// means exactly one sink write succeeded.
    pub async fn run(&self, payload: serde_json::Value) -> Result<RunOutcome, RunFailure> {
        let run_id = Uuid::new_v4();
        let mut state = RunState::Validating(payload);

        loop {
            state = self.step(run_id, state).await;

            match state {
                RunState::Completed(outcome) => return Ok(outcome),
                RunState::Failed { stage, error } => {
                    return Err(RunFailure {
                        run_id,
                        stage,
                        error,
                    })
                }
                _ => {}
            }
        }
    }

    /// Advance a run by one transition. Terminal states are fixed points.
    async fn step(&self, run_id: Uuid, state: RunState) -> RunState {
        match state {
            RunState::Validating(payload) => match validator::validate(&payload) {
                Ok(transaction) => RunState::Evaluating(transaction),
                Err(e) => RunState::Failed {
                    stage: Stage::Validating,
                    error: e.into(),
                },
            },

            RunState::Evaluating(transaction) => {
                RunState::Routing(self.evaluator.evaluate(transaction))
            }

            RunState::Routing(result) => RunState::Persisting(route(result.status), result),

            RunState::Persisting(sink, result) => match self.persist(sink, &result).await {
                Ok(()) => RunState::Completed(RunOutcome {
                    run_id,
                    sender: result.transaction.sender.clone(),
                    status: result.status,
                    sink,
                    checked_at: result.checked_at,
                }),
                Err(e) => RunState::Failed {
                    stage: Stage::Persisting,
                    error: e.into(),
                },
            },

            terminal => terminal,
        }
    }

    async fn persist(
        &self,
        sink: Sink,
        result: &ComplianceResult,
    ) -> Result<(), PersistenceError> {
        match sink {
            Sink::DurableRecord => {
                let record = DurableRecord::from_result(result);
                self.records.put_record(&record).await
            }
            Sink::Archive => self.archive.put_object(result.sender(), result).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::error::ValidationError;
    use crate::rules::RuleConfig;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;

    /// Sink double that refuses every write.
    struct UnreachableStore;

    #[async_trait]
    impl RecordStore for UnreachableStore {
        async fn put_record(&self, _record: &DurableRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable(
                "connection refused".to_string(),
            ))
        }
    }

    #[async_trait]
    impl ArchiveStore for UnreachableStore {
        async fn put_object(
            &self,
            _key: &str,
            _body: &ComplianceResult,
        ) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable(
                "connection refused".to_string(),
            ))
        }
    }

    fn orchestrator_with(store: Arc<MemoryStore>) -> Orchestrator {
        Orchestrator::new(
            ComplianceEvaluator::new(RuleConfig::default()),
            store.clone(),
            store,
        )
    }

    #[tokio::test]
    async fn test_approved_run_writes_durable_record() {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = orchestrator_with(store.clone());

        let outcome = orchestrator
            .run(json!({"sender": "Alice", "amount": 500, "currency": "USD"}))
            .await
            .unwrap();

        assert_eq!(outcome.status, ComplianceStatus::Approved);
        assert_eq!(outcome.sink, Sink::DurableRecord);

        let record = store.record("Alice").unwrap();
        assert_eq!(record.id, "Alice");
        assert_eq!(record.amount, "500");
        assert_eq!(record.status, ComplianceStatus::Approved);
        assert_eq!(store.archive_count(), 0);
    }

    #[tokio::test]
    async fn test_blocked_run_archives_only() {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = orchestrator_with(store.clone());

        let outcome = orchestrator
            .run(json!({"sender": "BadGuy1", "amount": 50, "currency": "USD"}))
            .await
            .unwrap();

        assert_eq!(outcome.status, ComplianceStatus::Blocked);
        assert_eq!(outcome.sink, Sink::Archive);
        assert_eq!(store.record_count(), 0);

        let blob = store.archived("BadGuy1").unwrap();
        assert_eq!(blob["status"], "BLOCKED");
        assert_eq!(blob["amount"], "50");
        assert_eq!(blob["currency"], "USD");
    }

    #[tokio::test]
    async fn test_high_risk_run_archives() {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = orchestrator_with(store.clone());

        let outcome = orchestrator
            .run(json!({"sender": "Carol", "amount": 15000, "currency": "EUR"}))
            .await
            .unwrap();

        assert_eq!(outcome.status, ComplianceStatus::HighRisk);
        assert_eq!(outcome.sink, Sink::Archive);
        assert_eq!(store.record_count(), 0);
        assert!(store.archived("Carol").is_some());
    }

    #[tokio::test]
    async fn test_validation_failure_touches_no_sink() {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = orchestrator_with(store.clone());

        let failure = orchestrator
            .run(json!({"sender": "", "amount": 10, "currency": "USD"}))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Validating);
        assert!(matches!(
            failure.error,
            PipelineError::Validation(ValidationError::MissingField("sender"))
        ));
        assert_eq!(store.record_count(), 0);
        assert_eq!(store.archive_count(), 0);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_not_duplicates() {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = orchestrator_with(store.clone());

        for _ in 0..2 {
            orchestrator
                .run(json!({"sender": "Alice", "amount": 500, "currency": "USD"}))
                .await
                .unwrap();
        }

        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates() {
        let store = Arc::new(UnreachableStore);
        let orchestrator = Orchestrator::new(
            ComplianceEvaluator::new(RuleConfig::default()),
            store.clone(),
            store,
        );

        let failure = orchestrator
            .run(json!({"sender": "Alice", "amount": 500, "currency": "USD"}))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Persisting);
        assert!(matches!(
            failure.error,
            PipelineError::Persistence(PersistenceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_outcome_timestamp_matches_evaluation() {
        let store = Arc::new(MemoryStore::new());
        let orchestrator = orchestrator_with(store.clone());

        let outcome = orchestrator
            .run(json!({"sender": "BadGuy1", "amount": 1, "currency": "USD"}))
            .await
            .unwrap();

        let blob = store.archived("BadGuy1").unwrap();
        let archived_at: DateTime<Utc> =
            serde_json::from_value(blob["checked_at"].clone()).unwrap();
        assert_eq!(archived_at, outcome.checked_at);
    }

    #[test]
    fn test_run_state_stages() {
        let state = RunState::Validating(json!({}));
        assert_eq!(state.stage(), Some(Stage::Validating));
        assert!(!state.is_terminal());

        let state = RunState::Failed {
            stage: Stage::Persisting,
            error: PersistenceError::Rejected("nope".to_string()).into(),
        };
        assert!(state.is_terminal());
    }
}
