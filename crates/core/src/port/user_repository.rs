// User Repository Port

use async_trait::async_trait;

use crate::context::Context;
use crate::domain::User;
use crate::error::Result;

/// Structural query executor for the users table. Implementations
/// resolve their connection through the context on every call and
/// classify storage failures into the domain taxonomy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a validated user, returning the generated id.
    async fn add(&self, ctx: &Context, user: &User) -> Result<i64>;

    /// Persist all mutable fields, returning the updated row's id.
    async fn update(&self, ctx: &Context, user: &User) -> Result<i64>;

    async fn get_by_id(&self, ctx: &Context, user_id: i64) -> Result<User>;

    async fn get_by_email(&self, ctx: &Context, email: &str) -> Result<User>;

    async fn get_all(&self, ctx: &Context) -> Result<Vec<User>>;
}
