//! Immutable client configuration and credential slots.

use std::fmt;

use reqwest::RequestBuilder;
use url::Url;

use crate::Error;

/// Username and password sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredential {
    username: String,
    password: String,
}

impl BasicCredential {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for BasicCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A token sent as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential {
    token: String,
}

impl BearerCredential {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredential")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// One credential attached to every request the transport sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialHandler {
    Bearer(BearerCredential),
    Basic(BasicCredential),
}

impl CredentialHandler {
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            CredentialHandler::Bearer(c) => request.bearer_auth(&c.token),
            CredentialHandler::Basic(c) => request.basic_auth(&c.username, Some(&c.password)),
        }
    }
}

/// The credential slots of a client. Empty slots are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub bearer: Option<BearerCredential>,
    pub basic: Option<BasicCredential>,
}

impl Credentials {
    /// The filled slots in application order. Basic is applied last, so it
    /// owns the `Authorization` header when both slots are filled.
    pub fn handlers(&self) -> Vec<CredentialHandler> {
        let bearer = self.bearer.clone().map(CredentialHandler::Bearer);
        let basic = self.basic.clone().map(CredentialHandler::Basic);
        bearer.into_iter().chain(basic).collect()
    }

    /// The handler that owns the `Authorization` header: the last filled
    /// slot.
    pub fn effective(&self) -> Option<CredentialHandler> {
        self.handlers().pop()
    }
}

/// Name, base URL and credentials of one logical API client.
///
/// Never mutated: the `with_*` methods return a new value and leave `self`
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    client_name: String,
    base_url: String,
    credentials: Credentials,
}

impl ClientConfig {
    /// Validates the name and base URL. A trailing `/` on the URL is dropped.
    pub fn new(client_name: &str, base_url: &str) -> Result<Self, Error> {
        if client_name.trim().is_empty() {
            return Err(Error::InvalidConfig("client name is empty".to_string()));
        }
        let parsed = Url::parse(base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", base_url, e);
            Error::InvalidConfig(format!("base URL {} does not parse: {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "base URL {} must use http or https",
                base_url
            )));
        }
        Ok(Self {
            client_name: client_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::default(),
        })
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn with_basic_auth(&self, username: &str, password: &str) -> Self {
        Self {
            credentials: Credentials {
                basic: Some(BasicCredential::new(username, password)),
                ..self.credentials.clone()
            },
            ..self.clone()
        }
    }

    pub fn with_bearer_token(&self, token: &str) -> Self {
        Self {
            credentials: Credentials {
                bearer: Some(BearerCredential::new(token)),
                ..self.credentials.clone()
            },
            ..self.clone()
        }
    }
}
