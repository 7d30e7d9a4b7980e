//! REST handlers — one async function per endpoint
//!
//! Params arrive as loose JSON and are extracted by hand so missing fields
//! map to 400s with a named field, per the facade's error taxonomy.

use crate::fsops;
use crate::server::AppContext;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use silhouette_core::{Error, WorkflowConfig};
use silhouette_llm::{GenMessage, GenerationRequest};
use silhouette_memory::MemoryTier;
use std::fs;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Error wrapper mapping the core taxonomy onto HTTP statuses.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::AuthFailed { .. } => StatusCode::UNAUTHORIZED,
            Error::MissingField(_) => StatusCode::BAD_REQUEST,
            Error::ProtectedPath(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult = std::result::Result<Json<Value>, ApiError>;

fn require_str(params: &Value, field: &str) -> std::result::Result<String, ApiError> {
    params[field]
        .as_str()
        .map(String::from)
        .ok_or_else(|| Error::missing_field(field).into())
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// POST /v1/chat/completions — run the generation pipeline once
// ---------------------------------------------------------------------------

pub async fn chat_completions(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;

    let task = params["messages"]
        .as_array()
        .and_then(|msgs| msgs.last())
        .and_then(|msg| msg["content"].as_str())
        .ok_or_else(|| ApiError(Error::missing_field("messages")))?
        .to_string();

    let memory_context = ctx
        .memory
        .retrieve(&task)
        .into_iter()
        .take(3)
        .map(|r| r.content)
        .collect::<Vec<_>>()
        .join("\n");

    let request = GenerationRequest {
        model: ctx.model.clone(),
        messages: vec![GenMessage::user(&task)],
        system: Some(ctx.filter.build_prompt("the agency operator", &memory_context)),
        max_tokens: 1024,
        temperature: None,
    };

    let completion = ctx
        .provider
        .complete(request)
        .await
        .map_err(|e| Error::generation(ctx.provider.name(), e.to_string()))?;

    let introspection = ctx.filter.process(&completion.text);
    ctx.memory.store(
        introspection.clean_output.clone(),
        MemoryTier::Working,
        vec!["chat".into()],
    );

    Ok(Json(json!({
        "id": format!("chatcmpl-{}", Uuid::new_v4()),
        "object": "chat.completion",
        "created": Utc::now().timestamp(),
        "model": ctx.model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": introspection.clean_output },
            "finish_reason": "stop",
        }],
        "thoughts": introspection.thoughts,
        "usage": {
            "prompt_tokens": completion.usage.input_tokens,
            "completion_tokens": completion.usage.output_tokens,
            "total_tokens": completion.usage.total(),
        },
    })))
}

// ---------------------------------------------------------------------------
// POST /v1/workflow/task — fire-and-forget task record
// ---------------------------------------------------------------------------

pub async fn queue_task(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;
    let task = require_str(&params, "task")?;

    let id = Uuid::new_v4();
    ctx.memory.store(
        format!("Pending task {}: {}", id, task),
        MemoryTier::Working,
        vec!["task".into(), "pending".into()],
    );

    Ok(Json(json!({ "id": id, "status": "queued" })))
}

// ---------------------------------------------------------------------------
// POST /v1/workflow/config — wholesale coordinator config replacement
// ---------------------------------------------------------------------------

pub async fn workflow_config(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;

    let config: WorkflowConfig = serde_json::from_value(params)
        .map_err(|e| Error::ConfigError(e.to_string()))?;
    ctx.workflow.update_config(config);

    Ok(Json(json!({ "ok": true })))
}

// ---------------------------------------------------------------------------
// POST /v1/memory/query
// ---------------------------------------------------------------------------

pub async fn memory_query(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;
    let query = require_str(&params, "query")?;
    let limit = params["limit"].as_u64().unwrap_or(10) as usize;

    let mut results = ctx.memory.retrieve(&query);
    results.truncate(limit);

    Ok(Json(json!({
        "results": results,
        "stats": ctx.memory.stats(),
    })))
}

// ---------------------------------------------------------------------------
// GET /v1/system/status — unauthenticated
// ---------------------------------------------------------------------------

pub async fn system_status(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let workflow = ctx.workflow.status();
    let stats = ctx.memory.stats();
    let consciousness = ctx.scorer.observe(
        stats.durable_count,
        workflow.last_optimization_score,
        workflow.last_thought.as_deref(),
    );

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": ctx.started_at.elapsed().as_secs(),
        "active_agents": ctx.swarm.active_count(),
        "total_ram_mb": ctx.swarm.total_ram(),
        "workflow_stage": workflow.stage,
        "memory": stats,
        "consciousness": consciousness,
    }))
}

// ---------------------------------------------------------------------------
// POST /v1/system/scan
// ---------------------------------------------------------------------------

pub async fn system_scan(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;

    let files = fsops::scan_source_files(&ctx.workspace_root);
    ctx.memory.store(
        format!("Source scan: {} files under workspace", files.len()),
        MemoryTier::Working,
        vec!["scan".into()],
    );

    Ok(Json(json!({ "count": files.len(), "files": files })))
}

// ---------------------------------------------------------------------------
// POST /v1/system/read
// ---------------------------------------------------------------------------

pub async fn system_read(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;
    let file_path = require_str(&params, "filePath")?;

    let full_path = fsops::resolve_workspace_path(&ctx.workspace_root, &file_path)?;
    let content = fs::read_to_string(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found(file_path.clone())
        } else {
            Error::IoError(e)
        }
    })?;

    Ok(Json(json!({ "filePath": file_path, "content": content })))
}

// ---------------------------------------------------------------------------
// PATCH /v1/system/file
// ---------------------------------------------------------------------------

pub async fn system_patch(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;
    let file_path = require_str(&params, "filePath")?;
    let content = require_str(&params, "content")?;
    let force_override = params["forceOverride"].as_bool().unwrap_or(false);

    if fsops::is_protected(&file_path) && !force_override {
        return Err(Error::ProtectedPath(file_path).into());
    }

    let full_path = fsops::resolve_workspace_path(&ctx.workspace_root, &file_path)?;
    let backup = fsops::backup_file(&full_path)?;

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(&full_path, &content).map_err(Error::IoError)?;

    info!("patched {} ({} bytes)", file_path, content.len());
    ctx.memory.store(
        format!(
            "File patched: {} (backup: {})",
            file_path,
            backup.as_deref().unwrap_or("none")
        ),
        MemoryTier::Episodic,
        vec!["audit".into(), "patch".into()],
    );

    Ok(Json(json!({ "ok": true, "backup": backup })))
}

// ---------------------------------------------------------------------------
// POST /v1/system/rollback
// ---------------------------------------------------------------------------

pub async fn system_rollback(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> ApiResult {
    ctx.auth.verify_headers(&headers)?;
    let file_path = require_str(&params, "filePath")?;
    let backup_id = require_str(&params, "backupId")?;

    fsops::rollback_file(&ctx.workspace_root, &file_path, &backup_id)?;

    info!("rolled back {} from {}", file_path, backup_id);
    Ok(Json(json!({ "ok": true })))
}
