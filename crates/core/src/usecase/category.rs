// Category Use Cases

use std::sync::Arc;

use crate::context::Context;
use crate::error::Result;
use crate::port::{CategoryRepository, TxManager};
use crate::usecase::dto::{AddCategoryDto, CategoryDto};

pub struct CategoryUseCase {
    categories: Arc<dyn CategoryRepository>,
    tx: Arc<dyn TxManager>,
}

impl CategoryUseCase {
    pub fn new(categories: Arc<dyn CategoryRepository>, tx: Arc<dyn TxManager>) -> Self {
        Self { categories, tx }
    }

    pub async fn add(&self, ctx: &Context, input: AddCategoryDto) -> Result<i64> {
        let category = input.into_model()?;

        let categories = Arc::clone(&self.categories);
        let mut created_id = 0_i64;
        let created = &mut created_id;
        self.tx
            .run_in_tx(
                ctx,
                Box::new(move |tx_ctx| {
                    Box::pin(async move {
                        *created = categories.add(&tx_ctx, &category).await?;
                        Ok(())
                    })
                }),
            )
            .await?;

        tracing::info!(category_id = created_id, "category added");
        Ok(created_id)
    }

    pub async fn get_by_id(&self, ctx: &Context, category_id: i64) -> Result<CategoryDto> {
        let category = self.categories.get_by_id(ctx, category_id).await?;
        Ok(CategoryDto::from(&category))
    }

    pub async fn list_all(&self, ctx: &Context) -> Result<Vec<CategoryDto>> {
        let categories = self.categories.list_all(ctx).await?;
        Ok(categories.iter().map(CategoryDto::from).collect())
    }
}
