//! The client facade: one verb per method, each answering with a [`Router`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{
    classifier::classify,
    config::ClientConfig,
    expected::{ExpectedSet, ExpectedStatus},
    options::RequestOptions,
    router::Router,
    transport::{Transport, Verb},
    Error,
};

/// HTTP client whose responses can only be consumed through routing.
///
/// Each verb takes the statuses the call anticipates as errors, sends the
/// request, classifies what came back and returns a [`Router`] over the
/// outcome. Only transport failures that cannot be classified come back as
/// `Err`. Credential setters return a new client and leave `self` as it was.
#[derive(Debug, Clone)]
pub struct RestClient {
    config: ClientConfig,
    transport: Transport,
}

impl RestClient {
    /// Creates a client without credentials. The name is sent as the
    /// `User-Agent`.
    pub fn new(client_name: &str, base_url: &str) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(client_name, base_url)?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let transport = Transport::new(&config)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A new client that also sends basic auth.
    pub fn set_basic_auth_credential(&self, username: &str, password: &str) -> Result<Self, Error> {
        Self::with_config(self.config.with_basic_auth(username, password))
    }

    /// A new client that also sends a bearer token.
    pub fn set_bearer_credential(&self, token: &str) -> Result<Self, Error> {
        Self::with_config(self.config.with_bearer_token(token))
    }

    async fn request<T, S>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
        expected: &ExpectedSet<S>,
        options: Option<&RequestOptions>,
    ) -> Result<Router<T, S>, Error>
    where
        T: DeserializeOwned,
        S: ExpectedStatus,
    {
        let settled = self
            .transport
            .send(verb, path, body.as_ref(), options)
            .await?;
        let outcome = classify(settled, expected)?;
        Ok(Router::new(outcome, expected.clone()))
    }

    /// Sends `body` with `POST`.
    pub async fn create<B, T, S>(
        &self,
        path: &str,
        body: &B,
        expected: &ExpectedSet<S>,
        options: Option<&RequestOptions>,
    ) -> Result<Router<T, S>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        S: ExpectedStatus,
    {
        let body = serde_json::to_value(body)?;
        self.request(Verb::Create, path, Some(body), expected, options)
            .await
    }

    pub async fn get<T, S>(
        &self,
        path: &str,
        expected: &ExpectedSet<S>,
        options: Option<&RequestOptions>,
    ) -> Result<Router<T, S>, Error>
    where
        T: DeserializeOwned,
        S: ExpectedStatus,
    {
        self.request(Verb::Get, path, None, expected, options).await
    }

    /// Sends `body` with `PATCH`.
    pub async fn update<B, T, S>(
        &self,
        path: &str,
        body: &B,
        expected: &ExpectedSet<S>,
        options: Option<&RequestOptions>,
    ) -> Result<Router<T, S>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        S: ExpectedStatus,
    {
        let body = serde_json::to_value(body)?;
        self.request(Verb::Update, path, Some(body), expected, options)
            .await
    }

    pub async fn delete<T, S>(
        &self,
        path: &str,
        expected: &ExpectedSet<S>,
        options: Option<&RequestOptions>,
    ) -> Result<Router<T, S>, Error>
    where
        T: DeserializeOwned,
        S: ExpectedStatus,
    {
        self.request(Verb::Delete, path, None, expected, options)
            .await
    }
}
