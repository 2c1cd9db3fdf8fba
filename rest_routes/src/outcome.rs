//! The three classified outcomes of one call.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::expected::ExpectedStatus;
use crate::status::HttpCode;

/// A decoded body from a `200 OK` response.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Always [`HttpCode::Ok`].
    pub fn status_code(&self) -> HttpCode {
        HttpCode::Ok
    }
}

/// A response whose status the caller declared as anticipated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedErrorResponse<S> {
    pub status: S,
    pub body: Value,
}

impl<S: ExpectedStatus> ExpectedErrorResponse<S> {
    pub fn new(status: S, body: Value) -> Self {
        Self { status, body }
    }

    pub fn status_code(&self) -> HttpCode {
        self.status.code()
    }
}

/// Anything else: an undeclared status, or a body that would not decode.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedErrorResponse {
    pub status_code: Option<HttpCode>,
    pub body: Option<Value>,
}

impl UnexpectedErrorResponse {
    pub fn new(status_code: Option<HttpCode>, body: Option<Value>) -> Self {
        Self { status_code, body }
    }
}

/// Which of the three cases a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    Success,
    ExpectedError,
    UnexpectedError,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::ExpectedError => "expectedError",
            OutcomeKind::UnexpectedError => "unexpectedError",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classified result of one call. Exactly one case applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T, S> {
    Success(SuccessResponse<T>),
    ExpectedError(ExpectedErrorResponse<S>),
    UnexpectedError(UnexpectedErrorResponse),
}

impl<T, S: ExpectedStatus> Outcome<T, S> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success(_) => OutcomeKind::Success,
            Outcome::ExpectedError(_) => OutcomeKind::ExpectedError,
            Outcome::UnexpectedError(_) => OutcomeKind::UnexpectedError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_expected_error(&self) -> bool {
        matches!(self, Outcome::ExpectedError(_))
    }

    pub fn is_unexpected_error(&self) -> bool {
        matches!(self, Outcome::UnexpectedError(_))
    }

    pub fn status_code(&self) -> Option<HttpCode> {
        match self {
            Outcome::Success(response) => Some(response.status_code()),
            Outcome::ExpectedError(response) => Some(response.status_code()),
            Outcome::UnexpectedError(response) => response.status_code,
        }
    }
}
