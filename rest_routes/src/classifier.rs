//! Turns a settled transport result into an [`Outcome`].

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::expected::{ExpectedSet, ExpectedStatus};
use crate::outcome::{ExpectedErrorResponse, Outcome, SuccessResponse, UnexpectedErrorResponse};
use crate::status::HttpCode;
use crate::transport::Settled;
use crate::Error;

/// The body substituted whenever a response carries no data.
///
/// Used for every status, not only 404.
pub fn not_found_body() -> Value {
    json!({
        "detail": "Target is not found.",
        "status": 404,
        "title": "Not Found",
        "type": "about:blank",
    })
}

/// Classifies one settled call against the statuses it declared as expected.
///
/// Returns an error only when the result cannot be classified: a fault
/// without a recognized status and a body, or a response whose status is
/// not a registered code. An absent body is never a success, even on
/// `200 OK`.
pub fn classify<T, S>(settled: Settled, expected: &ExpectedSet<S>) -> Result<Outcome<T, S>, Error>
where
    T: DeserializeOwned,
    S: ExpectedStatus,
{
    let (status, body) = match settled {
        Settled::Completed(response) => (response.status, response.body),
        Settled::Faulted(mut fault) => {
            let recognized = fault.status.filter(|s| HttpCode::try_from(*s).is_ok());
            match (recognized, fault.body.take()) {
                (Some(status), Some(body)) => (status, Some(body)),
                (_, body) => {
                    fault.body = body;
                    tracing::error!("Unclassifiable transport fault: {}", fault);
                    return Err(Error::Transport(fault));
                }
            }
        }
    };

    let code = HttpCode::try_from(status).map_err(|e| {
        tracing::error!("{}", e);
        Error::UnrecognizedStatus {
            status,
            body: body.clone(),
        }
    })?;

    let body = match body {
        None | Some(Value::Null) => {
            tracing::debug!("{} carried no body, substituting not-found body", code);
            return Ok(classify_error(code, not_found_body(), expected));
        }
        Some(body) => body,
    };

    if code.is_ok() {
        return Ok(match T::deserialize(&body) {
            Ok(data) => {
                tracing::debug!("Classified {} as success", code);
                Outcome::Success(SuccessResponse::new(data))
            }
            Err(e) => {
                tracing::warn!("Failed to decode {} body: {}", code, e);
                Outcome::UnexpectedError(UnexpectedErrorResponse::new(Some(code), Some(body)))
            }
        });
    }

    Ok(classify_error(code, body, expected))
}

fn classify_error<T, S: ExpectedStatus>(
    code: HttpCode,
    body: Value,
    expected: &ExpectedSet<S>,
) -> Outcome<T, S> {
    match expected.lookup(code) {
        Some(status) => {
            tracing::debug!("Classified {} as expected error", code);
            Outcome::ExpectedError(ExpectedErrorResponse::new(status, body))
        }
        None => {
            tracing::warn!("Classified {} as unexpected error", code);
            Outcome::UnexpectedError(UnexpectedErrorResponse::new(Some(code), Some(body)))
        }
    }
}
