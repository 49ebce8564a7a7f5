use serde::{Deserialize, Serialize};

/// Admin service connector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminServiceConfig {
    /// Base URL of the REST API (e.g., http://localhost:8080)
    #[serde(default = "AdminServiceConfig::default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds
    #[serde(default = "AdminServiceConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of users fetched for the single page
    #[serde(default = "AdminServiceConfig::default_page_size")]
    pub page_size: u32,
    /// Bearer token forwarded on every request (from env: ADMIN_SERVICE_AUTH_TOKEN)
    #[serde(skip)]
    pub auth_token: Option<String>,
}

impl AdminServiceConfig {
    fn default_base_url() -> String {
        "http://localhost:8080".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        10
    }

    const fn default_page_size() -> u32 {
        20
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

impl Default for AdminServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            page_size: Self::default_page_size(),
            auth_token: None,
        }
    }
}
