// Post endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use plume_core::usecase::{AddPostDto, UpdatePostDto};
use plume_core::Context;

use crate::extract::{bind, AuthUser};
use crate::handlers::reply;
use crate::state::AppState;

/// POST /posts
pub async fn add_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<AddPostDto>, JsonRejection>,
) -> Response {
    let mut input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    // The author is whoever holds the token, regardless of the body.
    input.user_id = user_id;
    let ctx = Context::new();
    reply(&state, state.posts.add(&ctx, input).await)
}

/// GET /posts
pub async fn get_posts(State(state): State<Arc<AppState>>) -> Response {
    let ctx = Context::new();
    reply(&state, state.posts.list_all(&ctx).await)
}

/// GET /posts/published
pub async fn get_published_posts(State(state): State<Arc<AppState>>) -> Response {
    let ctx = Context::new();
    reply(&state, state.posts.list_published(&ctx).await)
}

/// GET /posts/:id
pub async fn get_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Response {
    let ctx = Context::new();
    reply(&state, state.posts.get_by_id(&ctx, post_id).await)
}

/// PUT /posts/:id
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(post_id): Path<i64>,
    payload: Result<Json<UpdatePostDto>, JsonRejection>,
) -> Response {
    let input = match bind(&state, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };
    let ctx = Context::new();
    reply(&state, state.posts.update(&ctx, post_id, input).await)
}

/// GET /posts/me/likes
pub async fn get_total_likes(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Response {
    let ctx = Context::new();
    reply(&state, state.posts.total_likes_by_author(&ctx, user_id).await)
}
