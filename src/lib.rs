//! # Mandrill Client
//! Asynchronous wrapper around the Mandrill transactional email HTTP API. Every operation is a JSON POST through [`Client::call`]; the resource handles ([`Users`], [`Messages`], [`Templates`], ...) only prefix the resource path.
//!
//! ## Authentication
//! The API key is resolved once when the client is built: an explicit key from [`ClientBuilder::api_key`] wins, then the `MANDRILL_APIKEY` environment variable, then `~/.mandrill.key` and `/etc/mandrill.key` in that order. See [`KeySource`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`.
//!
//! ## Out of scope
//! No retries, rate limiting, batching or response schema validation. Responses are returned as [`serde_json::Value`].
//!
//! ## Errors
//! Server failures are classified into [`Error::Api`] with an [`ApiErrorKind`]. Bodies that do not follow the `{status, name, message}` envelope become [`Error::UnexpectedResponse`]. A missing key is [`Error::MissingApiKey`]; transport problems are [`Error::Request`].
//!
//! ## Example
//! ```no_run
//! use mandrill_client::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mandrill_client::Error> {
//!     let client = Client::new()?;
//!     let pong = client.users().ping().await?;
//!     println!("ping: {pong}");
//!
//!     let result = client
//!         .messages()
//!         .send(
//!             json!({
//!                 "subject": "Hello",
//!                 "from_email": "sender@example.com",
//!                 "to": [{"email": "recipient@example.com"}],
//!                 "text": "Hi there"
//!             }),
//!             false,
//!         )
//!         .await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod key;
mod resources;

pub use client::{Client, ClientBuilder};
pub use error::{ApiErrorKind, Error, ErrorEnvelope};
pub use key::KeySource;
pub use resources::{
    Exports, Inbound, Internal, Ips, Messages, Metadata, Rejects, Senders, Subaccounts, Tags,
    Templates, Urls, Users, Webhooks, Whitelists,
};

/// Result type alias for Mandrill operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
