//! Purpose: Define the single generic failure outcome for parse entry points.
//! Exports: `Rejection`, `DEFAULT_ERROR_MESSAGE`, `DEFAULT_ERROR_STATUS`.
//! Role: Response-convertible outcome a routing handler can return as-is.
//! Invariants: A rejection carries only a message and a status code.
//! Invariants: The JSON error envelope is stable; fields are additive-only.

use super::parse::ParseOptions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_ERROR_MESSAGE: &str = "Bad Request";
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Generic failure outcome. Whatever went wrong inside a parse entry
/// point, the caller sees only the configured message and status.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rejection {
    status: StatusCode,
    message: String,
}

impl Rejection {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request() -> Self {
        Self::new(DEFAULT_ERROR_MESSAGE, DEFAULT_ERROR_STATUS)
    }

    pub(crate) fn from_options(options: &ParseOptions) -> Self {
        Self {
            status: options.status().unwrap_or(DEFAULT_ERROR_STATUS),
            message: options
                .message()
                .unwrap_or(DEFAULT_ERROR_MESSAGE)
                .to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status.as_u16())
    }
}

impl std::error::Error for Rejection {}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            error: ErrorBody {
                status: self.status.as_u16(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
