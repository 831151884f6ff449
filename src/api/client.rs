// Public REST client — unauthenticated JSON over HTTP GET.
//
// The API exposes three read endpoints (users, posts by user, comments by
// post). None of them need authentication, so this is a thin reqwest
// wrapper with one generic GET helper.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Unauthenticated HTTP client for the public REST API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client pointing at the given base URL.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("userlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are made against (without a trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request to `path` and deserialize the JSON response.
    ///
    /// `path` is relative to the base URL and starts with a slash
    /// (e.g. "/users"). `params` are query string key-value pairs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = endpoint_url(&self.base_url, path);

        debug!(url = %url, ?params, "GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GET {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }
}

/// Join a base URL and an endpoint path with exactly one slash between them.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
