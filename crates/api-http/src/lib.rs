// HTTP API surface.
//
// Exposes the use cases over axum with a uniform response envelope.
// Handlers stay thin: bind the payload, call the use case, wrap the
// outcome. All error-to-status translation lives in `envelope`.

pub mod envelope;
pub mod extract;
mod handlers;
pub mod state;
mod trace;

use std::sync::Arc;

use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::envelope::Envelope;
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(handlers::users::add_user))
        .route(
            "/users/me",
            get(handlers::users::get_me).put(handlers::users::update_me),
        )
        .route(
            "/users/me/password",
            patch(handlers::users::change_my_password),
        )
        .route("/users/me/posts", get(handlers::users::get_my_posts))
        .route("/users/all", get(handlers::users::get_all_users))
        .route(
            "/posts",
            get(handlers::posts::get_posts).post(handlers::posts::add_post),
        )
        .route("/posts/published", get(handlers::posts::get_published_posts))
        .route("/posts/me/likes", get(handlers::posts::get_total_likes))
        .route(
            "/posts/:id",
            get(handlers::posts::get_post_by_id).put(handlers::posts::update_post),
        )
        .route("/categories/add", post(handlers::categories::add_category))
        .route(
            "/categories",
            get(handlers::categories::get_categories),
        )
        .route(
            "/categories/:id",
            get(handlers::categories::get_category_by_id),
        )
        .route("/login", post(handlers::auth::login))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(trace::trace_request))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> Envelope {
    Envelope::not_found()
}

fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    use axum::response::IntoResponse;

    let detail = if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(detail, "request handler panicked");
    Envelope::internal().into_response()
}
