// Shared handler state.

use plume_core::usecase::{AuthUseCase, CategoryUseCase, PostUseCase, UserUseCase};

/// Everything the handlers need, wired once at startup and shared
/// behind an `Arc`.
pub struct AppState {
    pub users: UserUseCase,
    pub posts: PostUseCase,
    pub categories: CategoryUseCase,
    pub auth: AuthUseCase,
    /// When set, error envelopes carry the real error message instead
    /// of a generic phrase. Off in production.
    pub detailed_errors: bool,
}
