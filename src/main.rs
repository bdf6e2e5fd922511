use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tokio::signal;
use tracing::info;

use txgate::api::routes::{create_router, AppState};
use txgate::config::Config;
use txgate::observability::{init_tracing, MetricsRegistry};
use txgate::pipeline::{ComplianceEvaluator, Orchestrator};
use txgate::rules::RulesLoader;
use txgate::storage::{ArchiveStore, MemoryStore, PostgresStore, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting txgate compliance pipeline"
    );

    // Load rule configuration (fixed for the process lifetime)
    let loader = RulesLoader::new(config.rules_path.clone(), config.watchlist_path.clone());
    let rules = loader.load()?;

    info!(
        watchlist = rules.watchlist.len(),
        threshold = %rules.amount_threshold,
        "Rule configuration loaded"
    );

    let evaluator = ComplianceEvaluator::new(rules);

    // Select persistence backend
    let (records, archive) = match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url, config.db_max_connections).await?;
            store.ensure_schema().await?;
            info!("Postgres persistence enabled");

            let store = Arc::new(store);
            (
                store.clone() as Arc<dyn RecordStore>,
                store as Arc<dyn ArchiveStore>,
            )
        }
        None => {
            info!("No database configured, using in-memory persistence");

            let store = Arc::new(MemoryStore::new());
            (
                store.clone() as Arc<dyn RecordStore>,
                store as Arc<dyn ArchiveStore>,
            )
        }
    };

    let orchestrator = Orchestrator::new(evaluator, records, archive);

    // Create application state
    let state = Arc::new(AppState {
        orchestrator,
        metrics: MetricsRegistry::new(),
        start_time: Instant::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        latency_budget_ms: config.latency_budget_ms,
    });

    // Create router
    let app = create_router(state);

    // Parse listen address
    let addr: SocketAddr = config.listen_addr.parse()?;

    info!(addr = %addr, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    if config.graceful_shutdown {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        axum::serve(listener, app).await?;
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
