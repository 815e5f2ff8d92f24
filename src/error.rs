//! Error types and server error classification.

use serde_json::Value;
use std::fmt;

/// Errors returned by the Mandrill client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key could be resolved from any configured [`crate::KeySource`].
    #[error("missing API key: pass one explicitly, set MANDRILL_APIKEY, or write ~/.mandrill.key")]
    MissingApiKey,

    /// The server answered with a body that is not a recognizable error envelope,
    /// or with a 200 response that is not JSON.
    #[error("unexpected error: {body}")]
    UnexpectedResponse {
        /// Raw response body.
        body: String,
    },

    /// The server returned a well-formed error envelope.
    #[error("{name}: {message}")]
    Api {
        /// Classified kind; [`ApiErrorKind::Generic`] for names outside the table.
        kind: ApiErrorKind,
        /// Error name exactly as sent by the server.
        name: String,
        /// Human readable detail from the server.
        message: String,
    },

    /// Request parameters did not serialize to a JSON object.
    #[error("request parameters must serialize to a JSON object")]
    InvalidParams,

    /// Transport failure or HTTP client construction failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request parameters could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The classified API error kind, if this is an [`Error::Api`].
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Error::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether the server rejected the call with an error envelope.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}

/// Kinds of failures the Mandrill API reports by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    ValidationError,
    InvalidKey,
    PaymentRequired,
    UnknownSubaccount,
    UnknownTemplate,
    ServiceUnavailable,
    UnknownMessage,
    InvalidTagName,
    InvalidReject,
    UnknownSender,
    UnknownUrl,
    UnknownTrackingDomain,
    InvalidTemplate,
    UnknownWebhook,
    UnknownInboundDomain,
    UnknownInboundRoute,
    UnknownExport,
    IpProvisionLimit,
    UnknownPool,
    NoSendingHistory,
    PoorReputation,
    UnknownIp,
    InvalidEmptyDefaultPool,
    InvalidDeleteDefaultPool,
    InvalidDeleteNonEmptyPool,
    InvalidCustomDns,
    InvalidCustomDnsPending,
    MetadataFieldLimit,
    UnknownMetadataField,
    /// A well-formed error whose name is not in the table.
    Generic,
}

impl ApiErrorKind {
    /// Every kind with a server name, in table order. Excludes [`ApiErrorKind::Generic`].
    pub const ALL: [ApiErrorKind; 29] = [
        ApiErrorKind::ValidationError,
        ApiErrorKind::InvalidKey,
        ApiErrorKind::PaymentRequired,
        ApiErrorKind::UnknownSubaccount,
        ApiErrorKind::UnknownTemplate,
        ApiErrorKind::ServiceUnavailable,
        ApiErrorKind::UnknownMessage,
        ApiErrorKind::InvalidTagName,
        ApiErrorKind::InvalidReject,
        ApiErrorKind::UnknownSender,
        ApiErrorKind::UnknownUrl,
        ApiErrorKind::UnknownTrackingDomain,
        ApiErrorKind::InvalidTemplate,
        ApiErrorKind::UnknownWebhook,
        ApiErrorKind::UnknownInboundDomain,
        ApiErrorKind::UnknownInboundRoute,
        ApiErrorKind::UnknownExport,
        ApiErrorKind::IpProvisionLimit,
        ApiErrorKind::UnknownPool,
        ApiErrorKind::NoSendingHistory,
        ApiErrorKind::PoorReputation,
        ApiErrorKind::UnknownIp,
        ApiErrorKind::InvalidEmptyDefaultPool,
        ApiErrorKind::InvalidDeleteDefaultPool,
        ApiErrorKind::InvalidDeleteNonEmptyPool,
        ApiErrorKind::InvalidCustomDns,
        ApiErrorKind::InvalidCustomDnsPending,
        ApiErrorKind::MetadataFieldLimit,
        ApiErrorKind::UnknownMetadataField,
    ];

    /// Look up the kind for a server error name.
    ///
    /// Returns `None` for names outside the table.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "ValidationError" => Self::ValidationError,
            "Invalid_Key" => Self::InvalidKey,
            "PaymentRequired" => Self::PaymentRequired,
            "Unknown_Subaccount" => Self::UnknownSubaccount,
            "Unknown_Template" => Self::UnknownTemplate,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "Unknown_Message" => Self::UnknownMessage,
            "Invalid_Tag_Name" => Self::InvalidTagName,
            "Invalid_Reject" => Self::InvalidReject,
            "Unknown_Sender" => Self::UnknownSender,
            "Unknown_Url" => Self::UnknownUrl,
            "Unknown_TrackingDomain" => Self::UnknownTrackingDomain,
            "Invalid_Template" => Self::InvalidTemplate,
            "Unknown_Webhook" => Self::UnknownWebhook,
            "Unknown_InboundDomain" => Self::UnknownInboundDomain,
            "Unknown_InboundRoute" => Self::UnknownInboundRoute,
            "Unknown_Export" => Self::UnknownExport,
            "IP_ProvisionLimit" => Self::IpProvisionLimit,
            "Unknown_Pool" => Self::UnknownPool,
            "NoSendingHistory" => Self::NoSendingHistory,
            "PoorReputation" => Self::PoorReputation,
            "Unknown_IP" => Self::UnknownIp,
            "Invalid_EmptyDefaultPool" => Self::InvalidEmptyDefaultPool,
            "Invalid_DeleteDefaultPool" => Self::InvalidDeleteDefaultPool,
            "Invalid_DeleteNonEmptyPool" => Self::InvalidDeleteNonEmptyPool,
            "Invalid_CustomDNS" => Self::InvalidCustomDns,
            "Invalid_CustomDNSPending" => Self::InvalidCustomDnsPending,
            "Metadata_FieldLimit" => Self::MetadataFieldLimit,
            "Unknown_MetadataField" => Self::UnknownMetadataField,
            _ => return None,
        };
        Some(kind)
    }

    /// The server error name for this kind. `Generic` has none and yields `"Error"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::InvalidKey => "Invalid_Key",
            Self::PaymentRequired => "PaymentRequired",
            Self::UnknownSubaccount => "Unknown_Subaccount",
            Self::UnknownTemplate => "Unknown_Template",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::UnknownMessage => "Unknown_Message",
            Self::InvalidTagName => "Invalid_Tag_Name",
            Self::InvalidReject => "Invalid_Reject",
            Self::UnknownSender => "Unknown_Sender",
            Self::UnknownUrl => "Unknown_Url",
            Self::UnknownTrackingDomain => "Unknown_TrackingDomain",
            Self::InvalidTemplate => "Invalid_Template",
            Self::UnknownWebhook => "Unknown_Webhook",
            Self::UnknownInboundDomain => "Unknown_InboundDomain",
            Self::UnknownInboundRoute => "Unknown_InboundRoute",
            Self::UnknownExport => "Unknown_Export",
            Self::IpProvisionLimit => "IP_ProvisionLimit",
            Self::UnknownPool => "Unknown_Pool",
            Self::NoSendingHistory => "NoSendingHistory",
            Self::PoorReputation => "PoorReputation",
            Self::UnknownIp => "Unknown_IP",
            Self::InvalidEmptyDefaultPool => "Invalid_EmptyDefaultPool",
            Self::InvalidDeleteDefaultPool => "Invalid_DeleteDefaultPool",
            Self::InvalidDeleteNonEmptyPool => "Invalid_DeleteNonEmptyPool",
            Self::InvalidCustomDns => "Invalid_CustomDNS",
            Self::InvalidCustomDnsPending => "Invalid_CustomDNSPending",
            Self::MetadataFieldLimit => "Metadata_FieldLimit",
            Self::UnknownMetadataField => "Unknown_MetadataField",
            Self::Generic => "Error",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A well-formed error body returned by the Mandrill API on failure.
///
/// The server sends `{"status": "error", "name": ..., "message": ...}`. Only
/// `status` and a non-empty `name` are required; a non-string `name` or
/// `message` is rendered as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub name: String,
    pub message: String,
}

impl ErrorEnvelope {
    /// Parse a response body, returning `None` if it is not an error envelope.
    pub fn parse(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        if value.get("status").and_then(Value::as_str) != Some("error") {
            return None;
        }
        let name = match value.get("name")? {
            Value::Null | Value::Bool(false) => return None,
            Value::String(name) if name.is_empty() => return None,
            other => json_text(other),
        };
        let message = value.get("message").map(json_text).unwrap_or_default();
        Some(Self { name, message })
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn a non-200 response body into an [`Error`].
pub(crate) fn classify_error(body: &str) -> Error {
    let Some(ErrorEnvelope { name, message }) = ErrorEnvelope::parse(body) else {
        return Error::UnexpectedResponse {
            body: body.to_string(),
        };
    };

    let kind = ApiErrorKind::from_name(&name).unwrap_or(ApiErrorKind::Generic);
    tracing::debug!(%kind, name = %name, "mandrill API returned an error");

    Error::Api {
        kind,
        name,
        message,
    }
}
