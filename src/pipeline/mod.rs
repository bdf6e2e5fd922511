pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod router;
pub mod validator;

pub use error::{PipelineError, RunFailure, Stage, ValidationError};
pub use evaluator::ComplianceEvaluator;
pub use orchestrator::{Orchestrator, RunOutcome, RunState};
pub use router::{route, Sink};
pub use validator::validate;
