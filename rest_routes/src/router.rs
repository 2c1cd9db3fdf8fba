//! Routing a classified outcome to the caller's handler for it.
//!
//! A [`Router`] is the only way a call's response is handed back. The caller
//! supplies a [`HandlerTable`] with one handler per outcome case, and one
//! handler per expected status; [`Router::routing`] picks the handler that
//! matches and returns it together with the response as a [`Route`].

use crate::expected::{ExpectedSet, ExpectedStatus, NoExpected};
use crate::outcome::{
    ExpectedErrorResponse, Outcome, OutcomeKind, SuccessResponse, UnexpectedErrorResponse,
};
use crate::status::HttpCode;
use crate::Error;

pub type SuccessHandler<'a, T, U> = Box<dyn FnOnce(SuccessResponse<T>) -> U + 'a>;
pub type ExpectedErrorHandler<'a, S, U> = Box<dyn FnOnce(ExpectedErrorResponse<S>) -> U + 'a>;
pub type UnexpectedErrorHandler<'a, U> = Box<dyn FnOnce(UnexpectedErrorResponse) -> U + 'a>;

type Selector<'a, S, U> = Box<dyn FnOnce(S) -> ExpectedErrorHandler<'a, S, U> + 'a>;

enum Entries<'a, S, U> {
    Total(Selector<'a, S, U>),
    Keyed(Vec<(S, ExpectedErrorHandler<'a, S, U>)>),
}

/// The expected-error part of a [`HandlerTable`]: one handler per status in
/// the call's [`ExpectedSet`].
pub struct ExpectedHandlers<'a, S, U> {
    entries: Entries<'a, S, U>,
}

impl<'a, S: ExpectedStatus + 'a, U: 'a> ExpectedHandlers<'a, S, U> {
    /// Handlers chosen by a function over `S`.
    ///
    /// Write `select` as a `match` on its argument: the compiler then rejects
    /// a table that forgets any status of the closed type. Arms that capture
    /// different state can each return an [`ExpectedErrorHandler`].
    pub fn total<F, H>(select: F) -> Self
    where
        F: FnOnce(S) -> H + 'a,
        H: FnOnce(ExpectedErrorResponse<S>) -> U + 'a,
    {
        let select = move |status: S| -> ExpectedErrorHandler<'a, S, U> { Box::new(select(status)) };
        Self {
            entries: Entries::Total(Box::new(select)),
        }
    }

    /// Starts a table keyed by status, checked against an expected set when
    /// built.
    pub fn keyed() -> KeyedHandlers<'a, S, U> {
        KeyedHandlers {
            entries: Vec::new(),
        }
    }

    fn select(self, status: S) -> Option<ExpectedErrorHandler<'a, S, U>> {
        match self.entries {
            Entries::Total(select) => Some(select(status)),
            Entries::Keyed(entries) => entries
                .into_iter()
                .find(|(key, _)| *key == status)
                .map(|(_, handler)| handler),
        }
    }
}

impl<'a, U: 'a> ExpectedHandlers<'a, NoExpected, U> {
    /// No handlers, for calls that expect no error status.
    pub fn empty() -> Self {
        Self {
            entries: Entries::Keyed(Vec::new()),
        }
    }
}

/// Builder for [`ExpectedHandlers::keyed`].
pub struct KeyedHandlers<'a, S, U> {
    entries: Vec<(S, ExpectedErrorHandler<'a, S, U>)>,
}

impl<'a, S: ExpectedStatus + 'a, U: 'a> KeyedHandlers<'a, S, U> {
    pub fn on<H>(mut self, status: S, handler: H) -> Self
    where
        H: FnOnce(ExpectedErrorResponse<S>) -> U + 'a,
    {
        self.entries.push((status, Box::new(handler)));
        self
    }

    /// Checks that the keys are exactly the members of `expected`: none
    /// missing, none extra, none repeated.
    pub fn build(self, expected: &ExpectedSet<S>) -> Result<ExpectedHandlers<'a, S, U>, Error> {
        let wanted = expected.distinct();
        let mut seen: Vec<S> = Vec::with_capacity(self.entries.len());
        for (status, _) in &self.entries {
            if seen.contains(status) {
                return Err(mismatch("duplicate handler", status.code()));
            }
            if !wanted.contains(status) {
                return Err(mismatch("handler outside the expected set", status.code()));
            }
            seen.push(*status);
        }
        if let Some(missing) = wanted.iter().find(|status| !seen.contains(status)) {
            return Err(mismatch("no handler", missing.code()));
        }
        Ok(ExpectedHandlers {
            entries: Entries::Keyed(self.entries),
        })
    }
}

fn mismatch(reason: &str, code: HttpCode) -> Error {
    tracing::error!("Handler table mismatch: {} for {}", reason, code);
    Error::HandlerTableMismatch(format!("{} for {}", reason, code))
}

/// One handler per outcome case, all producing a `U`.
pub struct HandlerTable<'a, T, S, U> {
    pub success: SuccessHandler<'a, T, U>,
    pub expected_error: ExpectedHandlers<'a, S, U>,
    pub unexpected_error: UnexpectedErrorHandler<'a, U>,
}

impl<'a, T, S, U> HandlerTable<'a, T, S, U> {
    pub fn new<F, G>(success: F, expected_error: ExpectedHandlers<'a, S, U>, unexpected_error: G) -> Self
    where
        F: FnOnce(SuccessResponse<T>) -> U + 'a,
        G: FnOnce(UnexpectedErrorResponse) -> U + 'a,
    {
        Self {
            success: Box::new(success),
            expected_error,
            unexpected_error: Box::new(unexpected_error),
        }
    }
}

/// A selected handler paired with the response it is meant for.
pub enum Route<'a, T, S, U> {
    Success {
        func: SuccessHandler<'a, T, U>,
        response: SuccessResponse<T>,
    },
    ExpectedError {
        func: ExpectedErrorHandler<'a, S, U>,
        response: ExpectedErrorResponse<S>,
    },
    UnexpectedError {
        func: UnexpectedErrorHandler<'a, U>,
        response: UnexpectedErrorResponse,
    },
}

impl<'a, T, S, U> Route<'a, T, S, U> {
    /// Mirrors the kind of the routed outcome.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Route::Success { .. } => OutcomeKind::Success,
            Route::ExpectedError { .. } => OutcomeKind::ExpectedError,
            Route::UnexpectedError { .. } => OutcomeKind::UnexpectedError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Route::Success { .. })
    }

    pub fn is_expected_error(&self) -> bool {
        matches!(self, Route::ExpectedError { .. })
    }

    pub fn is_unexpected_error(&self) -> bool {
        matches!(self, Route::UnexpectedError { .. })
    }

    /// Calls the selected handler with its response.
    pub fn dispatch(self) -> U {
        match self {
            Route::Success { func, response } => func(response),
            Route::ExpectedError { func, response } => func(response),
            Route::UnexpectedError { func, response } => func(response),
        }
    }
}

/// A classified outcome waiting for its handler table.
#[derive(Debug)]
pub struct Router<T, S> {
    outcome: Outcome<T, S>,
    expected: ExpectedSet<S>,
}

impl<T, S: ExpectedStatus> Router<T, S> {
    /// `expected` must be the set the outcome was classified against.
    pub fn new(outcome: Outcome<T, S>, expected: ExpectedSet<S>) -> Self {
        Self { outcome, expected }
    }

    /// The kind of the held outcome, without consuming it.
    pub fn kind(&self) -> OutcomeKind {
        self.outcome.kind()
    }

    pub fn expected(&self) -> &ExpectedSet<S> {
        &self.expected
    }

    /// Selects the handler for the held outcome.
    ///
    /// An expected error whose status is outside this router's expected set,
    /// or that the table has no handler for, is a mismatch between the call
    /// and its table. It fails with [`Error::UnroutableResponse`] rather than
    /// falling back to the unexpected-error handler.
    pub fn routing<'a, U>(self, table: HandlerTable<'a, T, S, U>) -> Result<Route<'a, T, S, U>, Error>
    where
        S: 'a,
        U: 'a,
    {
        match self.outcome {
            Outcome::Success(response) => Ok(Route::Success {
                func: table.success,
                response,
            }),
            Outcome::ExpectedError(response) => {
                let code = response.status_code();
                if !self.expected.contains(response.status) {
                    tracing::error!("Expected error {} is outside the router's expected set", code);
                    return Err(Error::UnroutableResponse(code));
                }
                match table.expected_error.select(response.status) {
                    Some(func) => Ok(Route::ExpectedError { func, response }),
                    None => {
                        tracing::error!("No expected-error handler for {}", code);
                        Err(Error::UnroutableResponse(code))
                    }
                }
            }
            Outcome::UnexpectedError(response) => Ok(Route::UnexpectedError {
                func: table.unexpected_error,
                response,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    crate::expected_status! {
        enum LookupError {
            Missing = NotFound,
            Crashed = InternalServerError,
        }
    }

    fn table<'a>() -> HandlerTable<'a, Value, LookupError, &'static str> {
        HandlerTable::new(
            |_| "success",
            ExpectedHandlers::total(
                |status| -> fn(ExpectedErrorResponse<LookupError>) -> &'static str {
                    match status {
                        LookupError::Missing => |_| "missing",
                        LookupError::Crashed => |_| "crashed",
                    }
                },
            ),
            |_| "unexpected",
        )
    }

    fn router(outcome: Outcome<Value, LookupError>) -> Router<Value, LookupError> {
        Router::new(outcome, ExpectedSet::all())
    }

    #[test]
    fn success_routes_to_success_handler() {
        let route = router(Outcome::Success(SuccessResponse::new(json!({"ok": true}))))
            .routing(table())
            .unwrap();
        assert!(route.is_success());
        assert_eq!(route.dispatch(), "success");
    }

    #[test]
    fn expected_error_routes_by_status() {
        for (status, want) in [(LookupError::Missing, "missing"), (LookupError::Crashed, "crashed")] {
            let route = router(Outcome::ExpectedError(ExpectedErrorResponse::new(
                status,
                json!({"message": "error"}),
            )))
            .routing(table())
            .unwrap();
            assert_eq!(route.kind(), OutcomeKind::ExpectedError);
            assert_eq!(route.dispatch(), want);
        }
    }

    #[test]
    fn unexpected_error_routes_to_unexpected_handler() {
        let route = router(Outcome::UnexpectedError(UnexpectedErrorResponse::new(
            Some(HttpCode::Forbidden),
            Some(json!({"message": "error"})),
        )))
        .routing(table())
        .unwrap();
        assert!(route.is_unexpected_error());
        assert_eq!(route.dispatch(), "unexpected");
    }

    #[test]
    fn route_carries_the_original_response() {
        let route = router(Outcome::ExpectedError(ExpectedErrorResponse::new(
            LookupError::Crashed,
            json!({"message": "boom"}),
        )))
        .routing(table())
        .unwrap();
        match route {
            Route::ExpectedError { response, .. } => {
                assert_eq!(response.status_code(), HttpCode::InternalServerError);
                assert_eq!(response.body, json!({"message": "boom"}));
            }
            _ => panic!("wrong route"),
        }
    }

    #[test]
    fn expected_error_outside_router_set_fails_fast() {
        let outcome = Outcome::ExpectedError(ExpectedErrorResponse::new(
            LookupError::Crashed,
            json!({}),
        ));
        let result = Router::new(outcome, ExpectedSet::new([LookupError::Missing])).routing(table());
        assert!(matches!(
            result,
            Err(Error::UnroutableResponse(HttpCode::InternalServerError))
        ));
    }

    #[test]
    fn runtime_table_without_handlers_rejects_non_empty_set() {
        let none = ExpectedHandlers::<HttpCode, ()>::keyed().build(&ExpectedSet::new([HttpCode::NotFound]));
        assert!(matches!(none, Err(Error::HandlerTableMismatch(_))));

        let handlers = ExpectedHandlers::<HttpCode, &str>::keyed()
            .build(&ExpectedSet::empty())
            .unwrap();
        let table: HandlerTable<Value, HttpCode, &str> =
            HandlerTable::new(|_| "success", handlers, |_| "unexpected");
        let route = Router::new(
            Outcome::UnexpectedError(UnexpectedErrorResponse::new(Some(HttpCode::NotFound), None)),
            ExpectedSet::empty(),
        )
        .routing(table)
        .unwrap();
        assert_eq!(route.dispatch(), "unexpected");
    }

    #[test]
    fn no_expected_table_needs_no_expected_handlers() {
        let table: HandlerTable<Value, NoExpected, i32> = HandlerTable::new(
            |response: SuccessResponse<Value>| response.data["n"].as_i64().unwrap_or_default() as i32,
            ExpectedHandlers::total(|status: NoExpected| -> fn(ExpectedErrorResponse<NoExpected>) -> i32 {
                match status {}
            }),
            |_| -1,
        );
        let route = Router::new(Outcome::Success(SuccessResponse::new(json!({"n": 7}))), ExpectedSet::empty())
            .routing(table)
            .unwrap();
        assert_eq!(route.dispatch(), 7);
    }

    #[test]
    fn keyed_table_must_cover_the_set_exactly() {
        let expected = ExpectedSet::new([HttpCode::NotFound, HttpCode::InternalServerError]);

        let missing = ExpectedHandlers::<HttpCode, ()>::keyed()
            .on(HttpCode::NotFound, |_| ())
            .build(&expected);
        assert!(matches!(missing, Err(Error::HandlerTableMismatch(_))));

        let extra = ExpectedHandlers::<HttpCode, ()>::keyed()
            .on(HttpCode::NotFound, |_| ())
            .on(HttpCode::InternalServerError, |_| ())
            .on(HttpCode::Forbidden, |_| ())
            .build(&expected);
        assert!(matches!(extra, Err(Error::HandlerTableMismatch(_))));

        let duplicate = ExpectedHandlers::<HttpCode, ()>::keyed()
            .on(HttpCode::NotFound, |_| ())
            .on(HttpCode::NotFound, |_| ())
            .on(HttpCode::InternalServerError, |_| ())
            .build(&expected);
        assert!(matches!(duplicate, Err(Error::HandlerTableMismatch(_))));

        let exact = ExpectedHandlers::<HttpCode, ()>::keyed()
            .on(HttpCode::InternalServerError, |_| ())
            .on(HttpCode::NotFound, |_| ())
            .build(&expected);
        assert!(exact.is_ok());
    }

    #[test]
    fn keyed_table_tolerates_duplicate_set_members() {
        let expected = ExpectedSet::new([HttpCode::NotFound, HttpCode::NotFound]);
        let handlers = ExpectedHandlers::<HttpCode, u16>::keyed()
            .on(HttpCode::NotFound, |response| response.status_code().as_u16())
            .build(&expected)
            .unwrap();
        let table: HandlerTable<Value, HttpCode, u16> = HandlerTable::new(|_| 200, handlers, |_| 0);
        let route = Router::new(
            Outcome::ExpectedError(ExpectedErrorResponse::new(HttpCode::NotFound, json!({}))),
            expected,
        )
        .routing(table)
        .unwrap();
        assert_eq!(route.dispatch(), 404);
    }

    #[test]
    fn handlers_may_borrow_caller_state() {
        let mut seen = Vec::new();
        {
            let table: HandlerTable<Value, NoExpected, ()> = HandlerTable::new(
                |response| seen.push(response.data),
                ExpectedHandlers::empty(),
                |_| (),
            );
            Router::new(
                Outcome::Success(SuccessResponse::new(json!({"message": "sucess get"}))),
                ExpectedSet::empty(),
            )
            .routing(table)
            .unwrap()
            .dispatch();
        }
        assert_eq!(seen, vec![json!({"message": "sucess get"})]);
    }
}
