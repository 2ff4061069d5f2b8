//! Homeserver discovery
//!
//! Implements the client-server specification's discovery rules: ask the
//! candidate host for its `.well-known/matrix/client` document, follow the
//! advertised `m.homeserver.base_url` if there is one, then confirm the
//! chosen host actually serves a spec-compliant versions document. A single
//! pass, no retries, no caching; every call re-resolves from scratch.

use reqwest::StatusCode;
use serde_json::Value;

use crate::client::{Client, ClientConfig};
use crate::combinators::{ensure, gate};
use crate::types::{WellKnown, VERSION_SCHEMA, WELL_KNOWN_SCHEMA};
use crate::Result;

/// Path of the discovery document, relative to the input host
pub const WELL_KNOWN_PATH: &str = "/.well-known/matrix/client";

/// Path of the endpoint used to confirm a host is operational
pub const VERSIONS_PATH: &str = "/_matrix/client/versions";

/// Resolve a host to its confirmed client API base URL
///
/// For a fixed server state this is deterministic: the same host always
/// resolves to the same URL or fails the same way.
pub async fn discover_server(host: &str) -> Result<String> {
    discover_server_with_config(host, &ClientConfig::default()).await
}

/// [`discover_server`] with explicit configuration
pub async fn discover_server_with_config(host: &str, config: &ClientConfig) -> Result<String> {
    let candidate = well_known_candidate(host, config).await?;
    validate_homeserver(&candidate, config).await
}

/// Confirm that a host serves a valid versions document
///
/// Returns the host unchanged when the document validates, fails with
/// `"Host versions file incorrect"` when it does not, and with the
/// underlying error when the request itself fails.
pub async fn validate_homeserver(host: &str, config: &ClientConfig) -> Result<String> {
    let probe = Client::bound(host, config);
    let body: Value = probe.get_json(VERSIONS_PATH).await?;
    gate(|| host.to_string(), "Host versions file incorrect")(VERSION_SCHEMA.is_valid(&body))
}

/// The well-known half of discovery: pick the candidate base URL
async fn well_known_candidate(host: &str, config: &ClientConfig) -> Result<String> {
    let probe = Client::bound(host, config);
    let response = probe.get(WELL_KNOWN_PATH).await?;
    let status = response.status();

    if !status.is_success() {
        // Exactly 404 means "no discovery document, keep the input host".
        // Any other status ends resolution.
        return ensure(
            status == StatusCode::NOT_FOUND,
            || host.to_string(),
            format!("well-known lookup for {host} returned {status}"),
        );
    }

    let body: Value = response.json().await?;
    let document: WellKnown = WELL_KNOWN_SCHEMA.cast(body)?;

    let advertised = document
        .homeserver
        .and_then(|server| server.base_url)
        // an empty base_url counts as absent
        .filter(|url| !url.is_empty());

    match advertised {
        Some(url) => {
            tracing::debug!(%host, %url, "well-known document redirects homeserver");
            Ok(url)
        }
        None => Ok(host.to_string()),
    }
}
