use std::sync::Arc;
use std::time::Duration;

use blog_api_sdk::ApiError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiClientConfig;
use crate::cookies::SessionCookies;
use crate::error::error_from_body;

/// Remote Inkpost API over HTTP.
///
/// `reqwest::Client` is `Clone + Send + Sync` and shares its cookie jar
/// between clones, so one `HttpBlogApi` can be handed to every store behind
/// an `Arc` without extra locking.
#[derive(Clone)]
pub struct HttpBlogApi {
    client: Client,
    base_url: Url,
    cookies: Arc<SessionCookies>,
}

impl HttpBlogApi {
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be initialised.
    pub fn new(config: &ApiClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::invalid_request(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::invalid_request(format!(
                "base URL '{base_url}' must be an absolute http(s) URL"
            )));
        }

        let cookies = Arc::new(SessionCookies::new());
        let client = Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::invalid_request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            cookies,
        })
    }

    /// Session cookies as `Set-Cookie` lines, for saving between runs.
    #[must_use]
    pub fn export_cookies(&self) -> Vec<String> {
        self.cookies.export()
    }

    /// Replay cookies saved by [`HttpBlogApi::export_cookies`].
    pub fn import_cookies(&self, lines: impl IntoIterator<Item = String>) {
        self.cookies.restore(lines, &self.base_url);
    }

    /// Drop the session credential locally.
    pub fn clear_cookies(&self) {
        self.cookies.clear();
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::invalid_request("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn paged_endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, u32)],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(segments)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, &value.to_string());
            }
        }
        Ok(url)
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    pub(crate) fn put(&self, url: Url) -> RequestBuilder {
        self.client.put(url)
    }

    pub(crate) fn delete(&self, url: Url) -> RequestBuilder {
        self.client.delete(url)
    }
}

/// Send and turn any non-2xx answer into an [`ApiError`].
pub async fn execute(request: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::network(format!("{fallback}: {e}")))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = error_from_body(status.as_u16(), &body, fallback);
    tracing::debug!(status = status.as_u16(), error = %err, "API call rejected");
    Err(err)
}

pub async fn execute_json<T: DeserializeOwned>(
    request: RequestBuilder,
    fallback: &str,
) -> Result<T, ApiError> {
    let response = execute(request, fallback).await?;
    decode(response).await
}

pub async fn execute_unit(request: RequestBuilder, fallback: &str) -> Result<(), ApiError> {
    execute(request, fallback).await.map(drop)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::network(format!("failed to read response body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::malformed(e.to_string()))
}
