//! Status DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Routes listed in the not-found response
pub const AVAILABLE_ROUTES: [&str; 5] = [
    "GET /",
    "GET /webhook",
    "POST /webhook",
    "POST /test-webhook",
    "GET /health",
];

/// Root status response
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub config: ConfigSummary,
    pub endpoints: EndpointSummary,
}

/// Which settings are present
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub verify_token: bool,
    pub whatsapp_token: bool,
    pub phone_id: bool,
    pub port: u16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointSummary {
    pub health: String,
    pub webhook: String,
    pub test: String,
}

impl Default for EndpointSummary {
    fn default() -> Self {
        Self {
            health: "GET /".to_string(),
            webhook: "GET,POST /webhook".to_string(),
            test: "POST /test-webhook".to_string(),
        }
    }
}

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the server started
    pub uptime: f64,
    pub timestamp: DateTime<Utc>,
    pub memory: MemoryUsage,
    pub version: String,
}

/// Process memory in bytes
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct MemoryUsage {
    pub rss: u64,
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
}

/// Response for unknown routes
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundResponse {
    pub error: String,
    pub available: Vec<String>,
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self {
            error: "Endpoint no encontrado".to_string(),
            available: AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect(),
        }
    }
}
