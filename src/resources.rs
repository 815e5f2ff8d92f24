//! Resource handles grouping the API methods of one area.
//!
//! Each handle borrows the [`Client`] and forwards to [`Client::call`] with
//! its resource name as path prefix, so `client.users().call("ping", ..)` is
//! the same request as `client.call("users/ping", ..)`.

use crate::{Client, Result};
#[cfg(doc)]
use crate::Error;
use serde::Serialize;
use serde_json::{Map, Value, json};

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            client: &'a Client,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a Client) -> Self {
                Self { client }
            }

            /// Resource path prefix.
            pub const PREFIX: &'static str = $prefix;

            /// Call `method` under this resource.
            pub async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value> {
                self.client
                    .call(&format!("{}/{}", Self::PREFIX, method), params)
                    .await
            }
        }
    };
}

resource!(
    /// Templates: `templates/*`.
    Templates => "templates"
);
resource!(
    /// Activity and reject exports: `exports/*`.
    Exports => "exports"
);
resource!(
    /// Account info and ping: `users/*`.
    Users => "users"
);
resource!(
    /// Rejection blacklist: `rejects/*`.
    Rejects => "rejects"
);
resource!(
    /// Inbound domains and routes: `inbound/*`.
    Inbound => "inbound"
);
resource!(
    /// Tags: `tags/*`.
    Tags => "tags"
);
resource!(
    /// Sending and looking up messages: `messages/*`.
    Messages => "messages"
);
resource!(
    /// Rejection whitelist: `whitelists/*`.
    Whitelists => "whitelists"
);
resource!(
    /// Dedicated IPs and pools: `ips/*`.
    Ips => "ips"
);
resource!(
    /// Undocumented internal endpoints: `internal/*`.
    Internal => "internal"
);
resource!(
    /// Subaccounts: `subaccounts/*`.
    Subaccounts => "subaccounts"
);
resource!(
    /// Tracked URLs and tracking domains: `urls/*`.
    Urls => "urls"
);
resource!(
    /// Webhooks: `webhooks/*`.
    Webhooks => "webhooks"
);
resource!(
    /// Senders and sending domains: `senders/*`.
    Senders => "senders"
);
resource!(
    /// Custom metadata fields: `metadata/*`.
    Metadata => "metadata"
);

impl Users<'_> {
    /// Check the key works. Mandrill answers `"PONG!"`.
    pub async fn ping(&self) -> Result<Value> {
        self.call("ping", json!({})).await
    }

    /// Account details: username, reputation, hourly quota and sending stats.
    pub async fn info(&self) -> Result<Value> {
        self.call("info", json!({})).await
    }

    /// Senders that have tried to use this account.
    pub async fn senders(&self) -> Result<Value> {
        self.call("senders", json!({})).await
    }
}

impl Messages<'_> {
    /// Send a message.
    ///
    /// `message` is the Mandrill message object (`subject`, `from_email`, `to`, ...).
    ///
    /// # Errors
    /// [`Error::Json`] if `message` cannot be converted to JSON, otherwise
    /// whatever [`Client::call`] returns.
    pub async fn send<M: Serialize>(&self, message: M, send_async: bool) -> Result<Value> {
        let mut params = Map::new();
        params.insert("message".to_string(), serde_json::to_value(message)?);
        params.insert("async".to_string(), Value::Bool(send_async));
        self.call("send", params).await
    }

    /// Send a message rendered from a stored template.
    ///
    /// # Errors
    /// [`Error::Json`] if `template_content` or `message` cannot be converted
    /// to JSON, otherwise whatever [`Client::call`] returns.
    pub async fn send_template<C: Serialize, M: Serialize>(
        &self,
        template_name: &str,
        template_content: C,
        message: M,
    ) -> Result<Value> {
        let mut params = Map::new();
        params.insert(
            "template_name".to_string(),
            Value::String(template_name.to_string()),
        );
        params.insert(
            "template_content".to_string(),
            serde_json::to_value(template_content)?,
        );
        params.insert("message".to_string(), serde_json::to_value(message)?);
        self.call("send-template", params).await
    }

    /// Details of one sent message by its Mandrill id.
    pub async fn info(&self, id: &str) -> Result<Value> {
        self.call("info", json!({ "id": id })).await
    }

    /// Search recently sent messages.
    pub async fn search(&self, query: &str) -> Result<Value> {
        self.call("search", json!({ "query": query })).await
    }
}

impl Templates<'_> {
    /// All templates on the account.
    pub async fn list(&self) -> Result<Value> {
        self.call("list", json!({})).await
    }

    /// One template by name.
    pub async fn info(&self, name: &str) -> Result<Value> {
        self.call("info", json!({ "name": name })).await
    }
}

impl Tags<'_> {
    /// All tags with their stats.
    pub async fn list(&self) -> Result<Value> {
        self.call("list", json!({})).await
    }
}

impl Senders<'_> {
    /// Senders used by the account.
    pub async fn list(&self) -> Result<Value> {
        self.call("list", json!({})).await
    }
}

impl Webhooks<'_> {
    /// Configured webhooks.
    pub async fn list(&self) -> Result<Value> {
        self.call("list", json!({})).await
    }
}
