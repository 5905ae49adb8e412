// User endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

use plume_core::usecase::{AddUserDto, ChangePasswordDto, UpdateUserDto};
use plume_core::Context;

use crate::extract::{bind, AuthUser};
use crate::handlers::reply;
use crate::state::AppState;

/// POST /users
pub async fn add_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddUserDto>, JsonRejection>,
) -> Response {
    let input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    let ctx = Context::new();
    reply(&state, state.users.add(&ctx, input).await)
}

/// GET /users/me
pub async fn get_me(State(state): State<Arc<AppState>>, AuthUser(user_id): AuthUser) -> Response {
    let ctx = Context::new();
    reply(&state, state.users.get_by_id(&ctx, user_id).await)
}

/// PUT /users/me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<UpdateUserDto>, JsonRejection>,
) -> Response {
    let input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    let ctx = Context::new();
    reply(&state, state.users.update_info(&ctx, user_id, input).await)
}

/// PATCH /users/me/password
pub async fn change_my_password(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<ChangePasswordDto>, JsonRejection>,
) -> Response {
    let input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    let ctx = Context::new();
    reply(
        &state,
        state.users.change_password(&ctx, user_id, input).await,
    )
}

/// GET /users/me/posts
pub async fn get_my_posts(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Response {
    let ctx = Context::new();
    reply(&state, state.posts.list_by_author(&ctx, user_id).await)
}

/// GET /users/all
pub async fn get_all_users(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
) -> Response {
    let ctx = Context::new();
    reply(&state, state.users.get_all(&ctx).await)
}
