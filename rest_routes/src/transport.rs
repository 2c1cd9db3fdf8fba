//! The reqwest-backed transport and the settled results it produces.

use reqwest::header::ACCEPT;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, CredentialHandler};
use crate::errors::TransportFault;
use crate::options::RequestOptions;
use crate::Error;

/// A response as it came off the wire: status plus decoded body, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
}

/// The result of one transport call, before classification.
#[derive(Debug)]
pub enum Settled {
    Completed(RawResponse),
    Faulted(TransportFault),
}

/// The four request primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Get,
    Update,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Create => Method::POST,
            Verb::Get => Method::GET,
            Verb::Update => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

/// Decodes a response body. Empty text is absent; text that is not JSON is
/// kept as a JSON string.
pub fn decode_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    auth: Option<CredentialHandler>,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.client_name())
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::InvalidConfig(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            auth: config.credentials().effective(),
        })
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&url).map_err(|source| {
            tracing::error!("Invalid URL constructed: {}", source);
            Error::InvalidUrl { url, source }
        })
    }

    /// Sends one request. Only URL construction fails outright; every
    /// network outcome comes back as a [`Settled`] value.
    pub(crate) async fn send(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<Settled, Error> {
        let url = self.get_url(path)?;
        tracing::debug!("{} {}", verb.method(), url);

        let mut request = self
            .http
            .request(verb.method(), url)
            .header(ACCEPT, "application/json");
        // reqwest appends headers, so a single handler owns Authorization.
        if let Some(handler) = &self.auth {
            request = handler.apply(request);
        }
        if let Some(options) = options {
            request = options.apply(request);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("Failed to send {} {}: {}", verb.method(), path, e);
                return Ok(Settled::Faulted(TransportFault::from(e)));
            }
        };

        let status = resp.status().as_u16();
        match resp.text().await {
            Ok(text) => Ok(Settled::Completed(RawResponse {
                status,
                body: decode_body(&text),
            })),
            Err(e) => {
                tracing::error!("Failed to read response body: {}", e);
                Ok(Settled::Faulted(TransportFault::from(e).with_status(status)))
            }
        }
    }
}
