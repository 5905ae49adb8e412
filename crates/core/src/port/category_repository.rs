// Category Repository Port

use async_trait::async_trait;

use crate::context::Context;
use crate::domain::Category;
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a validated category, returning the generated id.
    async fn add(&self, ctx: &Context, category: &Category) -> Result<i64>;

    async fn get_by_id(&self, ctx: &Context, category_id: i64) -> Result<Category>;

    async fn list_all(&self, ctx: &Context) -> Result<Vec<Category>>;
}
