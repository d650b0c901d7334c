//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    ConfigSummary, DeliveryResponse, EndpointSummary, HealthResponse, MemoryUsage,
    NotFoundResponse, StatusResponse, TestWebhookRequest, TestWebhookResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        super::status::root,
        super::status::health,
        // Webhook endpoints
        super::webhook::verify_webhook,
        super::webhook::receive_webhook,
        super::test_webhook::test_webhook,
    ),
    info(
        title = "Autoreply API",
        version = "0.1.0",
        description = "WhatsApp auto-reply webhook relay\n\nVerifies platform callbacks, picks a canned reply by keyword and sends it back through the WhatsApp Cloud API.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Status and liveness endpoints"),
        (name = "Webhook", description = "WhatsApp callbacks and manual trigger"),
    ),
    components(
        schemas(
            // Status
            StatusResponse,
            ConfigSummary,
            EndpointSummary,
            HealthResponse,
            MemoryUsage,
            NotFoundResponse,
            // Webhook
            TestWebhookRequest,
            TestWebhookResponse,
            DeliveryResponse,
        )
    ),
)]
pub struct ApiDoc;
