// Login endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

use plume_core::usecase::LoginDto;
use plume_core::Context;

use crate::extract::bind;
use crate::handlers::reply;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> Response {
    let input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    let ctx = Context::new();
    reply(&state, state.auth.login(&ctx, input).await)
}
