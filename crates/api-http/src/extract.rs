// Request extractors.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;

use plume_core::Error;

use crate::envelope::Envelope;
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// Handlers that take this extractor are authenticated routes: a
/// missing or invalid token short-circuits with an error envelope
/// before the handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        state
            .auth
            .verify_access_token(header)
            .map(AuthUser)
            .map_err(|err| Envelope::from_error(&err, state.detailed_errors).into_response())
    }
}

/// Unwraps a JSON body, turning deserialization failures into a
/// bad-request envelope instead of axum's plain-text rejection.
pub fn bind<T>(
    state: &AppState,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let err = Error::bad_request(rejection.body_text());
            Err(Envelope::from_error(&err, state.detailed_errors).into_response())
        }
    }
}
