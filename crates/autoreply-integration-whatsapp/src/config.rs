//! WhatsApp configuration

use serde::{Deserialize, Serialize};

/// Graph API host
pub const DEFAULT_API_BASE_URL: &str = "https://graph.facebook.com";
/// Graph API version path segment
pub const DEFAULT_API_VERSION: &str = "v17.0";
/// Outbound request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the WhatsApp Cloud API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Permanent or temporary access token (Bearer)
    pub access_token: Option<String>,
    /// Phone number ID of the sending business account
    pub phone_number_id: Option<String>,
    /// App secret used to check `X-Hub-Signature-256` (optional)
    pub app_secret: Option<String>,
    /// Graph API base URL
    pub api_base_url: String,
    /// Graph API version, e.g. "v17.0"
    pub api_version: String,
    /// Timeout for outbound calls in seconds
    pub timeout_secs: u64,
}

impl WhatsAppConfig {
    /// Create a configuration with sending credentials
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            phone_number_id: Some(phone_number_id.into()),
            ..Default::default()
        }
    }

    /// Set the app secret
    pub fn with_app_secret(mut self, secret: impl Into<String>) -> Self {
        self.app_secret = Some(secret.into());
        self
    }

    /// Set the Graph API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the Graph API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the outbound timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Access token and phone number ID, when both are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.access_token.as_deref().filter(|t| !t.is_empty())?;
        let phone_id = self.phone_number_id.as_deref().filter(|p| !p.is_empty())?;
        Some((token, phone_id))
    }

    /// Send endpoint for a phone number ID
    pub fn messages_url(&self, phone_number_id: &str) -> String {
        format!(
            "{}/{}/{}/messages",
            self.api_base_url.trim_end_matches('/'),
            self.api_version,
            phone_number_id
        )
    }
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            app_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
