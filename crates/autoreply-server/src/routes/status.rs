//! Status Routes
//!
//! Root info, liveness and the not-found fallback.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use sysinfo::{ProcessesToUpdate, System};

use crate::models::{
    ConfigSummary, EndpointSummary, HealthResponse, MemoryUsage, NotFoundResponse, StatusResponse,
};
use crate::AppState;

/// Server status and configuration summary
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is running", body = StatusResponse)
    ),
    tag = "Health"
)]
pub async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = &state.config;

    Json(StatusResponse {
        status: "running".to_string(),
        message: "🤖 Servidor webhook de WhatsApp funcionando".to_string(),
        timestamp: Utc::now(),
        config: ConfigSummary {
            verify_token: !config.verify_token.is_empty(),
            whatsapp_token: config.has_access_token(),
            phone_id: config.has_phone_id(),
            port: config.port,
        },
        endpoints: EndpointSummary::default(),
    })
}

/// Liveness with uptime and memory
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: Utc::now(),
        memory: process_memory(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown paths and methods
pub async fn not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (StatusCode::NOT_FOUND, Json(NotFoundResponse::default()))
}

fn process_memory() -> MemoryUsage {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return MemoryUsage::default();
    };

    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    system
        .process(pid)
        .map(|process| MemoryUsage {
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
        })
        .unwrap_or_default()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
}
