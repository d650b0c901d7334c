use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod application;
mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use application::ReplyService;
use autoreply::{OutboundMessenger, Responder};
use autoreply_integration_whatsapp::{WhatsAppMessenger, WhatsAppWebhookHandler};
use config::ServerConfig;

/// Reply service bound to the WhatsApp messenger
pub type AppReplyService = ReplyService<WhatsAppMessenger>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub reply_service: Arc<AppReplyService>,
    pub webhook_handler: Arc<WhatsAppWebhookHandler>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, messenger: WhatsAppMessenger) -> Self {
        let mut webhook_handler = WhatsAppWebhookHandler::new(config.verify_token.clone());
        if let Some(secret) = &config.whatsapp.app_secret {
            webhook_handler = webhook_handler.with_app_secret(secret.clone());
        }

        let responder = Responder::default();
        tracing::info!(rules = responder.rules().len(), "📋 Reply rules loaded");

        let reply_service = ReplyService::new(Arc::new(responder), Arc::new(messenger));

        Self {
            config: Arc::new(config),
            reply_service: Arc::new(reply_service),
            webhook_handler: Arc::new(webhook_handler),
            started_at: Instant::now(),
        }
    }
}

/// Build the router with all routes and middleware
pub fn app(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::status::router())
        .merge(routes::webhook::router())
        .merge(routes::test_webhook::router())
        .fallback(routes::status::not_found)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set variables directly
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    tracing::info!("🤖 Autoreply webhook relay initializing...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    config.log_summary();

    let messenger =
        WhatsAppMessenger::new(config.whatsapp.clone()).context("Failed to build HTTP client")?;
    if !messenger.is_configured() {
        tracing::warn!("⚠️  WhatsApp credentials missing - replies will not be sent");
    }

    let port = config.port;
    let state = AppState::new(config, messenger);

    if state.webhook_handler.signature_required() {
        tracing::info!("🔏 Signature check: enabled");
    } else {
        tracing::info!("🔏 Signature check: disabled");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("🚀 Webhook server started");
    tracing::info!("📡 Local URL: http://localhost:{port}");
    tracing::info!("🔗 Webhook endpoint: http://localhost:{port}/webhook");
    tracing::info!("🧪 Test endpoint: http://localhost:{port}/test-webhook");
    tracing::info!("❤️ Health endpoint: http://localhost:{port}/health");
    tracing::info!("📚 Swagger UI: http://localhost:{port}/swagger-ui");

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
