// Post Repository Port

use async_trait::async_trait;

use crate::context::Context;
use crate::domain::{Post, PostWithAuthor};
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a validated post, returning the generated id.
    async fn create(&self, ctx: &Context, post: &Post) -> Result<i64>;

    /// Persist all mutable fields, returning the updated row's id.
    async fn update(&self, ctx: &Context, post: &Post) -> Result<i64>;

    async fn get_by_id(&self, ctx: &Context, post_id: i64) -> Result<Post>;

    async fn list_all(&self, ctx: &Context) -> Result<Vec<PostWithAuthor>>;

    async fn list_published(&self, ctx: &Context) -> Result<Vec<PostWithAuthor>>;

    async fn list_by_author(&self, ctx: &Context, user_id: i64) -> Result<Vec<PostWithAuthor>>;

    /// Sum of likes over all posts written by `user_id`.
    async fn total_likes_by_author(&self, ctx: &Context, user_id: i64) -> Result<i64>;
}
