// Category endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use plume_core::usecase::AddCategoryDto;
use plume_core::Context;

use crate::extract::{bind, AuthUser};
use crate::handlers::reply;
use crate::state::AppState;

/// POST /categories/add
pub async fn add_category(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    payload: Result<Json<AddCategoryDto>, JsonRejection>,
) -> Response {
    let input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    let ctx = Context::new();
    reply(&state, state.categories.add(&ctx, input).await)
}

/// GET /categories
pub async fn get_categories(State(state): State<Arc<AppState>>) -> Response {
    let ctx = Context::new();
    reply(&state, state.categories.list_all(&ctx).await)
}

/// GET /categories/:id
pub async fn get_category_by_id(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Response {
    let ctx = Context::new();
    reply(&state, state.categories.get_by_id(&ctx, category_id).await)
}
