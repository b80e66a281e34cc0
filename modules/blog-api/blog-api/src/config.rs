use serde::{Deserialize, Serialize};

/// Connection settings for [`crate::HttpBlogApi`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiClientConfig {
    /// Root of the API, without the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout_ms: 30_000,
            user_agent: concat!("inkpost-client/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ApiClientConfig {
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
