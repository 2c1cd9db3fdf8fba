//! Typed HTTP client that hands every response back as one of three
//! outcomes, success, expected error or unexpected error, and makes the
//! caller supply a handler for each before it can look at the data.

mod classifier;
mod client;
mod config;
mod errors;
mod expected;
mod options;
mod outcome;
mod router;
mod status;
mod transport;
pub use self::classifier::{classify, not_found_body};
pub use self::client::RestClient;
pub use self::config::{BasicCredential, BearerCredential, ClientConfig, CredentialHandler, Credentials};
pub use self::errors::{Error, TransportFault};
pub use self::expected::{ExpectedSet, ExpectedStatus, NoExpected};
pub use self::options::RequestOptions;
pub use self::outcome::{
    ExpectedErrorResponse, Outcome, OutcomeKind, SuccessResponse, UnexpectedErrorResponse,
};
pub use self::router::{
    ExpectedErrorHandler, ExpectedHandlers, HandlerTable, KeyedHandlers, Route, Router,
    SuccessHandler, UnexpectedErrorHandler,
};
pub use self::status::{HttpCode, UnknownStatusCode};
pub use self::transport::{decode_body, RawResponse, Settled, Verb};
