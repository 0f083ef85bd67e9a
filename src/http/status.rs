use crate::http::conditional::{self, Freshness};
use crate::http::request::Request;

/// Status codes this server can decide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 505 HTTP Version Not Supported
    VersionNotSupported,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::VersionNotSupported => 505,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::VersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// Version written on every status line. Responses always claim HTTP/1.1,
/// whatever version the request carried.
pub const RESPONSE_VERSION: &str = "HTTP/1.1";

/// The status of a response to one completed request. Never mutated after
/// the decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    pub version: &'static str,
    pub code: StatusCode,
}

impl ResponseStatus {
    fn new(code: StatusCode) -> Self {
        Self {
            version: RESPONSE_VERSION,
            code,
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} {} {}\r\n",
            self.version,
            self.code.as_u16(),
            self.code.reason_phrase()
        )
    }
}

/// Pick the status for a completed request.
///
/// Checks run in a fixed order and the first match wins: method, then
/// version, then existence, then freshness. A request for a missing
/// resource with a non-GET method is therefore a 405, never a 404.
pub fn decide(request: &Request) -> ResponseStatus {
    let status = if request.method != "GET" {
        ResponseStatus::new(StatusCode::MethodNotAllowed)
    } else if request.version != "HTTP/1.0" && request.version != "HTTP/1.1" {
        ResponseStatus::new(StatusCode::VersionNotSupported)
    } else if !request.path.exists() {
        ResponseStatus::new(StatusCode::NotFound)
    } else if is_unmodified(request) {
        ResponseStatus::new(StatusCode::NotModified)
    } else {
        ResponseStatus::new(StatusCode::Ok)
    };

    tracing::info!(
        code = status.code.as_u16(),
        reason = status.code.reason_phrase(),
        resource = %request.resource,
        "resolved request"
    );

    status
}

fn is_unmodified(request: &Request) -> bool {
    let Some(value) = request.if_modified_since() else {
        return false;
    };
    // a stat failure here means the freshness question cannot be answered;
    // fall through to a full response
    let Ok(mtime) = std::fs::metadata(&request.path).and_then(|m| m.modified()) else {
        return false;
    };
    conditional::evaluate(value, mtime) == Freshness::NotModified
}
