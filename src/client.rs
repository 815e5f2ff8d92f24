//! Mandrill async client implementation.

use crate::error::classify_error;
use crate::key::{self, KeySource};
use crate::resources::{
    Exports, Inbound, Internal, Ips, Messages, Metadata, Rejects, Senders, Subaccounts, Tags,
    Templates, Urls, Users, Webhooks, Whitelists,
};
use crate::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};

/// Async client for the Mandrill API.
///
/// Use [`Client::new`] to pick up the key from the environment or key files,
/// [`Client::with_api_key`] to pass it directly, or [`Client::builder`] for
/// custom settings like proxies or a different endpoint.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    host: String,
    path: String,
    debug: bool,
    proxy: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.host)
            .field("path", &self.path)
            .field("api_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with the API key taken from `MANDRILL_APIKEY`,
    /// `~/.mandrill.key` or `/etc/mandrill.key`.
    ///
    /// # Errors
    /// [`Error::MissingApiKey`] when none of those yields a key.
    ///
    /// # Examples
    /// ```no_run
    /// # use mandrill_client::Client;
    /// # fn main() -> Result<(), mandrill_client::Error> {
    /// let client = Client::new()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Base host, e.g. `https://mandrillapp.com`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// API path prefix, e.g. `/api/1.0/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resolved API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Whether request/response debug logging is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Call an API method.
    ///
    /// `resource` is the method path without the `.json` suffix, e.g.
    /// `"users/ping"`. `params` must serialize to a JSON object (or `null`);
    /// the API key is added to it as `key`.
    ///
    /// Returns the decoded JSON body of a 200 response as-is.
    ///
    /// # Errors
    /// - [`Error::Api`] when the server returns an error envelope
    /// - [`Error::UnexpectedResponse`] when the body is not what the API promises
    /// - [`Error::InvalidParams`] when `params` is not a JSON object
    /// - [`Error::Request`] on transport failure
    ///
    /// # Examples
    /// ```no_run
    /// # use mandrill_client::Client;
    /// # use serde_json::json;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mandrill_client::Error> {
    /// let client = Client::new()?;
    /// let info = client.call("users/info", json!({})).await?;
    /// println!("{}", info["username"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<P: Serialize>(&self, resource: &str, params: P) -> Result<Value> {
        let mut params = match serde_json::to_value(params)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(Error::InvalidParams),
        };
        params.insert("key".to_string(), Value::String(self.api_key.clone()));
        let body = serde_json::to_vec(&params)?;

        let url = self.url(resource);
        if self.debug {
            tracing::debug!(url = %url, "mandrill request");
        }

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if self.debug {
            tracing::debug!(url = %url, status = status.as_u16(), body = %text, "mandrill response");
        }

        if status != StatusCode::OK {
            return Err(classify_error(&text));
        }

        serde_json::from_str(&text).map_err(|_| Error::UnexpectedResponse { body: text })
    }

    /// Full URL for an API method.
    fn url(&self, resource: &str) -> String {
        format!("{}{}{}.json", self.host, self.path, resource)
    }

    /// Stored templates.
    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    /// Activity, reject and whitelist exports.
    pub fn exports(&self) -> Exports<'_> {
        Exports::new(self)
    }

    /// Account info and key checks.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// The rejection blacklist.
    pub fn rejects(&self) -> Rejects<'_> {
        Rejects::new(self)
    }

    /// Inbound domains and routes.
    pub fn inbound(&self) -> Inbound<'_> {
        Inbound::new(self)
    }

    /// Message tags.
    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    /// Sending and searching messages.
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    /// The rejection whitelist.
    pub fn whitelists(&self) -> Whitelists<'_> {
        Whitelists::new(self)
    }

    /// Dedicated IPs and IP pools.
    pub fn ips(&self) -> Ips<'_> {
        Ips::new(self)
    }

    /// Internal endpoints.
    pub fn internal(&self) -> Internal<'_> {
        Internal::new(self)
    }

    /// Subaccounts.
    pub fn subaccounts(&self) -> Subaccounts<'_> {
        Subaccounts::new(self)
    }

    /// Tracked URLs and tracking domains.
    pub fn urls(&self) -> Urls<'_> {
        Urls::new(self)
    }

    /// Webhooks.
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    /// Senders and sending domains.
    pub fn senders(&self) -> Senders<'_> {
        Senders::new(self)
    }

    /// Custom metadata fields.
    pub fn metadata(&self) -> Metadata<'_> {
        Metadata::new(self)
    }
}

const HOST: &str = "https://mandrillapp.com";
const API_PATH: &str = "/api/1.0/";
const USER_AGENT_VALUE: &str = concat!("mandrill-client/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a Mandrill client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    key_sources: Vec<KeySource>,
    debug: bool,
    proxy: Option<String>,
    user_agent: String,
    host: String,
    path: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No explicit key; [`KeySource::defaults`] are searched
    /// - Debug logging off
    /// - No proxy
    /// - `mandrill-client/<version>` user agent
    /// - `https://mandrillapp.com` and `/api/1.0/`
    pub fn new() -> Self {
        Self {
            api_key: None,
            key_sources: KeySource::defaults(),
            debug: false,
            proxy: None,
            user_agent: USER_AGENT_VALUE.to_string(),
            host: HOST.to_string(),
            path: API_PATH.to_string(),
        }
    }

    /// Use this API key. It takes precedence over every key source.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the key sources searched when no explicit key is given.
    pub fn key_sources(mut self, sources: impl IntoIterator<Item = KeySource>) -> Self {
        self.key_sources = sources.into_iter().collect();
        self
    }

    /// Log request URLs and response bodies at debug level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API host.
    ///
    /// Useful for testing against a mock server.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the API path prefix. Must start and end with `/`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Resolve the API key and build the client.
    ///
    /// No network request is made.
    ///
    /// # Errors
    /// [`Error::MissingApiKey`] when no key is found, or [`Error::Request`]
    /// when the HTTP client cannot be built (e.g. a malformed proxy URL).
    ///
    /// # Examples
    /// ```no_run
    /// # use mandrill_client::Client;
    /// # fn main() -> Result<(), mandrill_client::Error> {
    /// let client = Client::builder()
    ///     .api_key("my-key")
    ///     .debug(true)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => key::resolve(&self.key_sources).ok_or(Error::MissingApiKey)?,
        };

        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        let http = builder.build()?;

        Ok(Client {
            http,
            api_key,
            host: self.host,
            path: self.path,
            debug: self.debug,
            proxy: self.proxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_host_path_and_resource() {
        let client = Client::with_api_key("k").unwrap();
        assert_eq!(
            client.url("users/ping"),
            "https://mandrillapp.com/api/1.0/users/ping.json"
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let client = Client::with_api_key("super-secret").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn no_sources_means_missing_key() {
        let err = Client::builder()
            .key_sources(Vec::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn bad_proxy_is_a_build_error() {
        let err = Client::builder()
            .api_key("k")
            .proxy("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }
}
