//! The closed set of recognized HTTP status codes.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! http_codes {
    ($($name:ident = $code:literal => $reason:literal,)+) => {
        /// A registered HTTP status code.
        ///
        /// Anything outside this enumeration is not a status code as far as
        /// classification is concerned.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "u16", into = "u16")]
        #[repr(u16)]
        pub enum HttpCode {
            $($name = $code,)+
        }

        impl HttpCode {
            /// Every recognized code, in numeric order.
            pub const ALL: &'static [HttpCode] = &[$(HttpCode::$name,)+];

            /// The reason phrase registered for this code.
            pub fn canonical_reason(self) -> &'static str {
                match self {
                    $(HttpCode::$name => $reason,)+
                }
            }
        }

        impl TryFrom<u16> for HttpCode {
            type Error = UnknownStatusCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok(HttpCode::$name),)+
                    other => Err(UnknownStatusCode(other)),
                }
            }
        }
    };
}

http_codes! {
    Continue = 100 => "Continue",
    SwitchingProtocols = 101 => "Switching Protocols",
    Processing = 102 => "Processing",
    EarlyHints = 103 => "Early Hints",
    Ok = 200 => "OK",
    Created = 201 => "Created",
    Accepted = 202 => "Accepted",
    NonAuthoritativeInformation = 203 => "Non-Authoritative Information",
    NoContent = 204 => "No Content",
    ResetContent = 205 => "Reset Content",
    PartialContent = 206 => "Partial Content",
    MultiStatus = 207 => "Multi-Status",
    AlreadyReported = 208 => "Already Reported",
    ImUsed = 226 => "IM Used",
    MultipleChoices = 300 => "Multiple Choices",
    MovedPermanently = 301 => "Moved Permanently",
    Found = 302 => "Found",
    SeeOther = 303 => "See Other",
    NotModified = 304 => "Not Modified",
    UseProxy = 305 => "Use Proxy",
    TemporaryRedirect = 307 => "Temporary Redirect",
    PermanentRedirect = 308 => "Permanent Redirect",
    BadRequest = 400 => "Bad Request",
    Unauthorized = 401 => "Unauthorized",
    PaymentRequired = 402 => "Payment Required",
    Forbidden = 403 => "Forbidden",
    NotFound = 404 => "Not Found",
    MethodNotAllowed = 405 => "Method Not Allowed",
    NotAcceptable = 406 => "Not Acceptable",
    ProxyAuthenticationRequired = 407 => "Proxy Authentication Required",
    RequestTimeout = 408 => "Request Timeout",
    Conflict = 409 => "Conflict",
    Gone = 410 => "Gone",
    LengthRequired = 411 => "Length Required",
    PreconditionFailed = 412 => "Precondition Failed",
    ContentTooLarge = 413 => "Content Too Large",
    UriTooLong = 414 => "URI Too Long",
    UnsupportedMediaType = 415 => "Unsupported Media Type",
    RangeNotSatisfiable = 416 => "Range Not Satisfiable",
    ExpectationFailed = 417 => "Expectation Failed",
    ImATeapot = 418 => "I'm a teapot",
    MisdirectedRequest = 421 => "Misdirected Request",
    UnprocessableContent = 422 => "Unprocessable Content",
    Locked = 423 => "Locked",
    FailedDependency = 424 => "Failed Dependency",
    TooEarly = 425 => "Too Early",
    UpgradeRequired = 426 => "Upgrade Required",
    PreconditionRequired = 428 => "Precondition Required",
    TooManyRequests = 429 => "Too Many Requests",
    RequestHeaderFieldsTooLarge = 431 => "Request Header Fields Too Large",
    UnavailableForLegalReasons = 451 => "Unavailable For Legal Reasons",
    InternalServerError = 500 => "Internal Server Error",
    NotImplemented = 501 => "Not Implemented",
    BadGateway = 502 => "Bad Gateway",
    ServiceUnavailable = 503 => "Service Unavailable",
    GatewayTimeout = 504 => "Gateway Timeout",
    HttpVersionNotSupported = 505 => "HTTP Version Not Supported",
    VariantAlsoNegotiates = 506 => "Variant Also Negotiates",
    InsufficientStorage = 507 => "Insufficient Storage",
    LoopDetected = 508 => "Loop Detected",
    NotExtended = 510 => "Not Extended",
    NetworkAuthenticationRequired = 511 => "Network Authentication Required",
}

impl HttpCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn is_ok(self) -> bool {
        self == HttpCode::Ok
    }
}

impl From<HttpCode> for u16 {
    fn from(code: HttpCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<reqwest::StatusCode> for HttpCode {
    type Error = UnknownStatusCode;

    fn try_from(value: reqwest::StatusCode) -> Result<Self, Self::Error> {
        HttpCode::try_from(value.as_u16())
    }
}

impl From<HttpCode> for reqwest::StatusCode {
    fn from(code: HttpCode) -> Self {
        // Registered codes all fall within 100..=999.
        reqwest::StatusCode::from_u16(code.as_u16())
            .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for HttpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.canonical_reason())
    }
}

/// An integer that is not a registered status code.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a recognized HTTP status code")]
pub struct UnknownStatusCode(pub u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_codes_round_trip_through_u16() {
        for code in HttpCode::ALL {
            assert_eq!(HttpCode::try_from(code.as_u16()), Ok(*code));
        }
    }

    #[test]
    fn unregistered_codes_are_rejected() {
        for raw in [0u16, 99, 199, 306, 420, 499, 509, 600, 999] {
            assert_eq!(HttpCode::try_from(raw), Err(UnknownStatusCode(raw)));
        }
    }

    #[test]
    fn all_is_sorted_and_unique() {
        assert!(HttpCode::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn display_includes_reason() {
        assert_eq!(HttpCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(HttpCode::Ok.to_string(), "200 OK");
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&HttpCode::Forbidden).unwrap(), "403");
        let code: HttpCode = serde_json::from_str("500").unwrap();
        assert_eq!(code, HttpCode::InternalServerError);
        assert!(serde_json::from_str::<HttpCode>("299").is_err());
    }

    #[test]
    fn converts_from_reqwest_status() {
        assert_eq!(
            HttpCode::try_from(reqwest::StatusCode::CONFLICT),
            Ok(HttpCode::Conflict)
        );
    }

    #[test]
    fn converts_into_reqwest_status() {
        for code in HttpCode::ALL {
            let status = reqwest::StatusCode::from(*code);
            assert_eq!(status.as_u16(), code.as_u16());
        }
        assert_eq!(
            reqwest::StatusCode::from(HttpCode::Gone),
            reqwest::StatusCode::GONE
        );
    }
}
