//! Server configuration
//!
//! Loaded once from the environment at startup and passed explicitly to
//! the components that need it. Each setting accepts a list of variable
//! names; the first non-empty one wins.

use thiserror::Error;

use autoreply_integration_whatsapp::{WhatsAppConfig, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_VERIFY_TOKEN: &str = "mi_token_verificacion_webhook";
pub const DEFAULT_PORT: u16 = 3000;

const VERIFY_TOKEN_VARS: &[&str] = &["WEBHOOK_VERIFY_TOKEN", "EXPO_PUBLIC_WEBHOOK_VERIFY_TOKEN"];
const ACCESS_TOKEN_VARS: &[&str] = &["WHATSAPP_TOKEN", "EXPO_PUBLIC_WHATSAPP_TOKEN"];
const PHONE_ID_VARS: &[&str] = &["WHATSAPP_PHONE_ID", "EXPO_PUBLIC_WHATSAPP_PHONE_ID"];
const APP_SECRET_VARS: &[&str] = &["WHATSAPP_APP_SECRET"];
const API_VERSION_VARS: &[&str] = &["WHATSAPP_API_VERSION"];
const API_BASE_URL_VARS: &[&str] = &["WHATSAPP_API_BASE_URL"];
const TIMEOUT_VARS: &[&str] = &["WHATSAPP_TIMEOUT_SECS"];
const PORT_VARS: &[&str] = &["PORT"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Process-wide immutable configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Token expected in the subscription handshake
    pub verify_token: String,
    /// Graph API credentials and client settings
    pub whatsapp: WhatsAppConfig,
    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| -> Option<String> {
            names
                .iter()
                .find_map(|&name| lookup(name).filter(|value| !value.is_empty()))
        };

        let port = match first(PORT_VARS) {
            Some(value) => parse_number(PORT_VARS[0], value)?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match first(TIMEOUT_VARS) {
            Some(value) => parse_number(TIMEOUT_VARS[0], value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut whatsapp = WhatsAppConfig {
            access_token: first(ACCESS_TOKEN_VARS),
            phone_number_id: first(PHONE_ID_VARS),
            ..Default::default()
        }
        .with_timeout_secs(timeout_secs);

        if let Some(secret) = first(APP_SECRET_VARS) {
            whatsapp = whatsapp.with_app_secret(secret);
        }
        if let Some(url) = first(API_BASE_URL_VARS) {
            whatsapp = whatsapp.with_api_base_url(url);
        }
        if let Some(version) = first(API_VERSION_VARS) {
            whatsapp = whatsapp.with_api_version(version);
        }

        Ok(Self {
            verify_token: first(VERIFY_TOKEN_VARS)
                .unwrap_or_else(|| DEFAULT_VERIFY_TOKEN.to_string()),
            whatsapp,
            port,
        })
    }

    pub fn has_access_token(&self) -> bool {
        self.whatsapp.access_token.is_some()
    }

    pub fn has_phone_id(&self) -> bool {
        self.whatsapp.phone_number_id.is_some()
    }

    /// Log which settings are present, never their values
    pub fn log_summary(&self) {
        let mark = |present: bool| if present { "✅ configured" } else { "❌ missing" };

        tracing::info!("🔧 Webhook server configuration:");
        tracing::info!("📝 Verify token: {}", mark(!self.verify_token.is_empty()));
        tracing::info!("🔑 WhatsApp token: {}", mark(self.has_access_token()));
        tracing::info!("📱 Phone ID: {}", mark(self.has_phone_id()));
        tracing::info!(
            "🛰️  Graph API: {}/{} (timeout {}s)",
            self.whatsapp.api_base_url,
            self.whatsapp.api_version,
            self.whatsapp.timeout_secs
        );
        tracing::info!("🌐 Port: {}", self.port);
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}
