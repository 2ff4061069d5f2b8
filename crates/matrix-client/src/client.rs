//! Homeserver client
//!
//! A [`Client`] is a resolved homeserver base URL wrapped around an HTTP
//! client: the single seam every endpoint operation issues its requests
//! through. Once constructed it is immutable and can be shared freely across
//! concurrent calls.

use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde_json::Value;

use crate::discovery;
use crate::{Error, Result};

/// Configuration for a homeserver client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("matrix-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// A client bound to a single resolved homeserver base URL
///
/// # Example
///
/// ```rust,no_run
/// use matrix_client::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::connect("https://matrix.org").await?;
///     println!("talking to {}", client.base_url());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    /// HTTP client
    http: HttpClient,
    /// Resolved base URL, without trailing slash
    base_url: String,
}

impl Client {
    /// Resolve `host` through server discovery and bind to the confirmed URL
    ///
    /// This is the usual entry point: the well-known document is consulted,
    /// the resulting candidate is confirmed against the versions endpoint,
    /// and the returned client targets that base URL for its whole lifetime.
    pub async fn connect(host: &str) -> Result<Self> {
        Self::connect_with_config(host, ClientConfig::default()).await
    }

    /// [`Client::connect`] with explicit configuration
    pub async fn connect_with_config(host: &str, config: ClientConfig) -> Result<Self> {
        let base_url = discovery::discover_server_with_config(host, &config).await?;
        Ok(Self::bound(base_url, &config))
    }

    /// Bind to a base URL without running discovery
    ///
    /// The host is taken at face value. Discovery uses this internally for
    /// its probe requests; tests use it to point a client at a mock server.
    pub fn bound(base_url: impl Into<String>, config: &ClientConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { http, base_url }
    }

    /// Issue a GET for a path relative to the bound base URL
    ///
    /// Returns the raw response; status handling is left to the caller.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        Ok(self.http.get(&url).send().await?)
    }

    /// GET a path and decode the body as JSON
    ///
    /// Non-success statuses fail here with the status code and the raw body;
    /// they never reach the schema gate.
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self.get(path).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    /// The base URL this client was resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
