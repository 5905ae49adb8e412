// Response envelope.
//
// Every response, success or failure, is `{status, message, data}`.
// Domain error kinds map to HTTP status codes here and nowhere else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use plume_core::{Error, ErrorKind};

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    /// Wraps a successful payload.
    pub fn ok<T: Serialize>(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: "success".to_string(),
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }

    /// Wraps a domain error. With `detailed` set the caller sees the
    /// real error message; otherwise a fixed phrase per kind.
    pub fn from_error(err: &Error, detailed: bool) -> Self {
        let status = status_for(err.kind());
        let message = if detailed {
            err.to_string()
        } else {
            phrase_for(err.kind()).to_string()
        };
        Self {
            status: status.as_u16(),
            message,
            data: Value::Null,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: "method not found".to_string(),
            data: Value::Null,
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: phrase_for(ErrorKind::Internal).to_string(),
            data: Value::Null,
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let code =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(self)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::Database | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn phrase_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "invalid input",
        ErrorKind::BadRequest => "malformed request",
        ErrorKind::NotFound => "resource not found",
        ErrorKind::AlreadyExists => "resource already exists",
        ErrorKind::Database | ErrorKind::Internal => "internal server error",
    }
}
