use anyhow::Result;
use rest_routes::{
    ExpectedErrorResponse, ExpectedHandlers, ExpectedSet, HandlerTable, HttpCode, OutcomeKind,
    RequestOptions, RestClient, Router, SuccessResponse, UnexpectedErrorResponse,
};
use serde::Serialize;
use serde_json::Value;

/// The verb and arguments of the one request to send.
pub enum Call<'a> {
    Get { path: &'a str },
    Create { path: &'a str, body: &'a Value },
    Update { path: &'a str, body: &'a Value },
    Delete { path: &'a str },
}

/// What the routed handler saw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub outcome: OutcomeKind,
    pub status: Option<u16>,
    pub body: Option<Value>,
}

impl Report {
    fn success(response: SuccessResponse<Value>) -> Self {
        Self {
            outcome: OutcomeKind::Success,
            status: Some(response.status_code().as_u16()),
            body: Some(response.data),
        }
    }

    fn expected(response: ExpectedErrorResponse<HttpCode>) -> Self {
        Self {
            outcome: OutcomeKind::ExpectedError,
            status: Some(response.status_code().as_u16()),
            body: Some(response.body),
        }
    }

    fn unexpected(response: UnexpectedErrorResponse) -> Self {
        Self {
            outcome: OutcomeKind::UnexpectedError,
            status: response.status_code.map(HttpCode::as_u16),
            body: response.body,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.outcome {
            OutcomeKind::Success => 0,
            OutcomeKind::ExpectedError => 1,
            OutcomeKind::UnexpectedError => 2,
        }
    }
}

/// Exit code when the call ends without a routed outcome.
pub const NOT_ROUTED_EXIT: u8 = 3;

/// Process exit code for the result of [`run`].
pub fn exit_code(result: &Result<Report>) -> u8 {
    match result {
        Ok(report) => report.exit_code(),
        Err(_) => NOT_ROUTED_EXIT,
    }
}

/// One handler per declared status, checked against `expected`.
pub fn handler_table<'a>(
    expected: &ExpectedSet<HttpCode>,
) -> Result<HandlerTable<'a, Value, HttpCode, Report>> {
    let handlers = expected
        .distinct()
        .into_iter()
        .fold(ExpectedHandlers::keyed(), |handlers, code| {
            handlers.on(code, Report::expected)
        })
        .build(expected)?;
    Ok(HandlerTable::new(Report::success, handlers, Report::unexpected))
}

pub async fn run(
    client: &RestClient,
    call: Call<'_>,
    expected: &ExpectedSet<HttpCode>,
    options: &RequestOptions,
) -> Result<Report> {
    let options = Some(options);
    let router: Router<Value, HttpCode> = match call {
        Call::Get { path } => client.get(path, expected, options).await?,
        Call::Create { path, body } => client.create(path, body, expected, options).await?,
        Call::Update { path, body } => client.update(path, body, expected, options).await?,
        Call::Delete { path } => client.delete(path, expected, options).await?,
    };
    let route = router.routing(handler_table(expected)?)?;
    Ok(route.dispatch())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rest_routes::{Outcome, Router};
    use serde_json::json;

    fn route(outcome: Outcome<Value, HttpCode>, expected: ExpectedSet<HttpCode>) -> Report {
        let table = handler_table(&expected).unwrap();
        Router::new(outcome, expected)
            .routing(table)
            .unwrap()
            .dispatch()
    }

    #[test]
    fn success_reports_exit_zero() {
        let report = route(
            Outcome::Success(SuccessResponse::new(json!({"message": "ok"}))),
            ExpectedSet::empty(),
        );
        assert_eq!(report.outcome, OutcomeKind::Success);
        assert_eq!(report.status, Some(200));
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn declared_status_reports_expected_error() {
        let report = route(
            Outcome::ExpectedError(ExpectedErrorResponse::new(
                HttpCode::NotFound,
                json!({"message": "error"}),
            )),
            ExpectedSet::new([HttpCode::NotFound, HttpCode::InternalServerError, HttpCode::NotFound]),
        );
        assert_eq!(report.outcome, OutcomeKind::ExpectedError);
        assert_eq!(report.status, Some(404));
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn unexpected_error_without_status() {
        let report = route(
            Outcome::UnexpectedError(UnexpectedErrorResponse::new(None, None)),
            ExpectedSet::empty(),
        );
        assert_eq!(
            report,
            Report {
                outcome: OutcomeKind::UnexpectedError,
                status: None,
                body: None,
            }
        );
        assert_eq!(report.exit_code(), 2);
    }

    #[tokio::test]
    async fn unreachable_server_gets_its_own_exit_code() {
        let client = RestClient::new("cli", "http://127.0.0.1:1").unwrap();
        let result = run(
            &client,
            Call::Get { path: "/health" },
            &ExpectedSet::new([HttpCode::NotFound]),
            &RequestOptions::default(),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(exit_code(&result), NOT_ROUTED_EXIT);
        assert_ne!(NOT_ROUTED_EXIT, 1);
    }

    #[test]
    fn routed_result_keeps_report_exit_code() {
        let report = route(
            Outcome::ExpectedError(ExpectedErrorResponse::new(HttpCode::NotFound, json!({}))),
            ExpectedSet::new([HttpCode::NotFound]),
        );
        assert_eq!(exit_code(&Ok(report)), 1);
    }
}
