//! Matrix Client-Server API Library
//!
//! This crate provides a typed client for the Matrix client-server HTTP API.
//! It resolves a homeserver's canonical base URL through the `.well-known`
//! discovery document, confirms the resolved host is operational, and exposes
//! operations for user profiles, room aliases, public room directories, and
//! single events. Every response body is checked against a declarative schema
//! before it is handed back to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use matrix_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Discovery follows the well-known document to the real API host
//!     let client = Client::connect("https://matrix.org").await?;
//!
//!     let profile = client.user_profile("@alice:matrix.org").await?;
//!     println!("display name: {:?}", profile.displayname);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod client;
pub mod combinators;
pub mod discovery;
pub mod schema;
pub mod types;

pub use api::room_details_from_any;
pub use client::{Client, ClientConfig};
pub use discovery::discover_server;

/// Result type for homeserver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for homeserver operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the homeserver
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the server
        message: String,
    },

    /// Response body did not match the expected schema
    #[error("{0} response failed validation")]
    Validation(&'static str),

    /// A gated step was entered with its condition false
    #[error("{0}")]
    Precondition(String),

    /// The public room directory has no entry for the requested room
    #[error("this server knows no public room with id {0}")]
    RoomNotFound(String),

    /// Every candidate operation in a first-success race failed
    #[error("all {} candidate operations failed", .0.len())]
    AllFailed(Vec<Error>),
}
