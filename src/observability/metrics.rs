use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::ComplianceStatus;
use crate::pipeline::PipelineError;

/// Metrics registry for the pipeline.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total runs submitted (completed or failed)
    pub runs_total: AtomicU64,

    /// Completed runs by outcome
    pub runs_approved: AtomicU64,
    pub runs_blocked: AtomicU64,
    pub runs_high_risk: AtomicU64,

    /// Failed runs by error kind
    pub validation_failures: AtomicU64,
    pub persistence_failures: AtomicU64,

    /// Run latency buckets (microseconds)
    pub latency_under_1ms: AtomicU64,
    pub latency_1_5ms: AtomicU64,
    pub latency_5_10ms: AtomicU64,
    pub latency_10_50ms: AtomicU64,
    pub latency_50_100ms: AtomicU64,
    pub latency_over_100ms: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a completed run's outcome.
    pub fn record_outcome(&self, status: ComplianceStatus) {
        self.runs_total.fetch_add(1, Ordering::Relaxed);

        match status {
            ComplianceStatus::Approved => {
                self.runs_approved.fetch_add(1, Ordering::Relaxed);
            }
            ComplianceStatus::Blocked => {
                self.runs_blocked.fetch_add(1, Ordering::Relaxed);
            }
            ComplianceStatus::HighRisk => {
                self.runs_high_risk.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record a failed run.
    pub fn record_failure(&self, error: &PipelineError) {
        self.runs_total.fetch_add(1, Ordering::Relaxed);

        match error {
            PipelineError::Validation(_) => {
                self.validation_failures.fetch_add(1, Ordering::Relaxed);
            }
            PipelineError::Persistence(_) => {
                self.persistence_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record run latency.
    pub fn record_latency(&self, start: Instant) {
        let micros = start.elapsed().as_micros() as u64;

        if micros < 1000 {
            self.latency_under_1ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 5000 {
            self.latency_1_5ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 10000 {
            self.latency_5_10ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 50000 {
            self.latency_10_50ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 100000 {
            self.latency_50_100ms.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_100ms.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self, uptime_secs: u64) -> String {
        format!(
            r#"# HELP txgate_uptime_seconds Application uptime in seconds
# TYPE txgate_uptime_seconds counter
txgate_uptime_seconds {}

# HELP txgate_runs_total Total pipeline runs submitted
# TYPE txgate_runs_total counter
txgate_runs_total {}

# HELP txgate_runs Completed runs by outcome
# TYPE txgate_runs counter
txgate_runs{{outcome="approved"}} {}
txgate_runs{{outcome="blocked"}} {}
txgate_runs{{outcome="high_risk"}} {}

# HELP txgate_run_failures Failed runs by error kind
# TYPE txgate_run_failures counter
txgate_run_failures{{kind="validation"}} {}
txgate_run_failures{{kind="persistence"}} {}

# HELP txgate_run_latency_bucket Run latency histogram
# TYPE txgate_run_latency_bucket counter
txgate_run_latency_bucket{{le="0.001"}} {}
txgate_run_latency_bucket{{le="0.005"}} {}
txgate_run_latency_bucket{{le="0.01"}} {}
txgate_run_latency_bucket{{le="0.05"}} {}
txgate_run_latency_bucket{{le="0.1"}} {}
txgate_run_latency_bucket{{le="+Inf"}} {}
"#,
            uptime_secs,
            self.runs_total.load(Ordering::Relaxed),
            self.runs_approved.load(Ordering::Relaxed),
            self.runs_blocked.load(Ordering::Relaxed),
            self.runs_high_risk.load(Ordering::Relaxed),
            self.validation_failures.load(Ordering::Relaxed),
            self.persistence_failures.load(Ordering::Relaxed),
            self.latency_under_1ms.load(Ordering::Relaxed),
            self.latency_1_5ms.load(Ordering::Relaxed),
            self.latency_5_10ms.load(Ordering::Relaxed),
            self.latency_10_50ms.load(Ordering::Relaxed),
            self.latency_50_100ms.load(Ordering::Relaxed),
            self.latency_over_100ms.load(Ordering::Relaxed),
        )
    }
}
