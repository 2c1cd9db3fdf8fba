//! Error types for the client.

use serde_json::Value;

use crate::status::HttpCode;

/// Errors that escape classification.
///
/// Classified responses never surface here; they become an
/// [`Outcome`](crate::Outcome). What remains are configuration mistakes,
/// transport failures that carry nothing classifiable, and handler tables
/// that do not match the call they are routing.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client name or base URL was rejected.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
    /// The request URL could not be built from the base URL and path.
    #[error("Invalid request URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The request body could not be encoded as JSON.
    #[error("Failed to serialize request body")]
    Serialization(#[from] serde_json::Error),
    /// The transport failed without a recognized status and a body.
    #[error(transparent)]
    Transport(#[from] TransportFault),
    /// The server answered with a code outside the registered set.
    #[error("Response carried unrecognized status code {status}")]
    UnrecognizedStatus { status: u16, body: Option<Value> },
    /// An expected-error handler table disagrees with its expected set.
    #[error("Handler table does not match the expected set: {0}")]
    HandlerTableMismatch(String),
    /// An expected error arrived that no handler is registered for.
    #[error("No handler routes expected status {0}")]
    UnroutableResponse(HttpCode),
}

/// A failed transport call, with whatever status and body it carried.
#[derive(thiserror::Error, Debug)]
#[error("Transport failure: {message}")]
pub struct TransportFault {
    message: String,
    pub(crate) status: Option<u16>,
    pub(crate) body: Option<Value>,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            "connection failed".to_string()
        } else if e.is_body() || e.is_decode() {
            "failed to read response body".to_string()
        } else {
            "request failed".to_string()
        };
        Self {
            message,
            status: e.status().map(|s| s.as_u16()),
            body: None,
            source: Some(e),
        }
    }
}
