pub mod auth;
pub mod categories;
pub mod posts;
pub mod users;

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use plume_core::Result;

use crate::envelope::Envelope;
use crate::state::AppState;

/// Wraps a use-case outcome in the response envelope.
pub(crate) fn reply<T: Serialize>(state: &AppState, result: Result<T>) -> Response {
    match result {
        Ok(data) => Envelope::ok(data).into_response(),
        Err(err) => Envelope::from_error(&err, state.detailed_errors).into_response(),
    }
}
