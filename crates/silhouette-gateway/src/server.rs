//! Gateway server — router construction and startup

use crate::auth::ResolvedAuth;
use crate::routes;
use axum::routing::{get, patch, post};
use axum::Router;
use silhouette_consciousness::{ConsciousnessScorer, IntrospectionFilter};
use silhouette_core::GatewayConfig;
use silhouette_llm::GenerationProvider;
use silhouette_memory::ContinuumMemory;
use silhouette_swarm::AgentRegistry;
use silhouette_workflow::WorkflowCoordinator;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Everything the handlers need. One explicitly constructed context per
/// process (or per test) instead of module-level singletons.
pub struct AppContext {
    pub memory: Arc<ContinuumMemory>,
    pub swarm: Arc<AgentRegistry>,
    pub workflow: Arc<WorkflowCoordinator>,
    pub scorer: Arc<ConsciousnessScorer>,
    pub filter: IntrospectionFilter,
    pub provider: Arc<dyn GenerationProvider>,
    pub auth: ResolvedAuth,
    pub workspace_root: PathBuf,
    pub model: String,
    pub started_at: Instant,
}

/// Build the REST router over a shared context.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/v1/chat/completions", post(routes::chat_completions))
        .route("/v1/workflow/task", post(routes::queue_task))
        .route("/v1/workflow/config", post(routes::workflow_config))
        .route("/v1/memory/query", post(routes::memory_query))
        .route("/v1/system/status", get(routes::system_status))
        .route("/v1/system/scan", post(routes::system_scan))
        .route("/v1/system/read", post(routes::system_read))
        .route("/v1/system/file", patch(routes::system_patch))
        .route("/v1/system/rollback", post(routes::system_rollback))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(ctx)
}

/// Bind and serve until the task is aborted.
pub async fn start_gateway(ctx: Arc<AppContext>, config: &GatewayConfig) -> anyhow::Result<()> {
    let bind_addr: SocketAddr = format!("{}:{}", config.bind.to_addr(), config.port).parse()?;

    let app = build_router(ctx);

    info!("Silhouette Gateway v{} starting", env!("CARGO_PKG_VERSION"));
    info!("  Listening on: {}", bind_addr);
    info!("  Auth mode: {:?}", config.auth.mode);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
