// Postgres Category Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use plume_core::domain::Category;
use plume_core::port::CategoryRepository;
use plume_core::{Context, Error, Result};

use crate::conn::{run_guarded, ConnManager};
use crate::error_map::{is_row_not_found, is_unique_violation, storage_error};

pub struct PgCategoryRepository {
    conn: ConnManager,
}

impl PgCategoryRepository {
    pub fn new(conn: ConnManager) -> Self {
        Self { conn }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn add(&self, ctx: &Context, category: &Category) -> Result<i64> {
        let mut conn = self.conn.conn(ctx).await?;
        let id = run_guarded(
            ctx,
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO categories (name) VALUES ($1) RETURNING id",
            )
            .bind(&category.name)
            .fetch_one(conn.as_conn()),
            |e| classify_add_category(&category.name, e),
        )
        .await?;
        Ok(id)
    }

    async fn get_by_id(&self, ctx: &Context, category_id: i64) -> Result<Category> {
        let mut conn = self.conn.conn(ctx).await?;
        let row = run_guarded(
            ctx,
            sqlx::query_as::<_, CategoryRow>(
                "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
            )
            .bind(category_id)
            .fetch_one(conn.as_conn()),
            |e| classify_get_category_by_id(category_id, e),
        )
        .await?;
        Ok(row.into())
    }

    async fn list_all(&self, ctx: &Context) -> Result<Vec<Category>> {
        let mut conn = self.conn.conn(ctx).await?;
        let rows = run_guarded(
            ctx,
            sqlx::query_as::<_, CategoryRow>(
                "SELECT id, name, created_at, updated_at FROM categories ORDER BY id",
            )
            .fetch_all(conn.as_conn()),
            |e| storage_error("get categories", e),
        )
        .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}

// Error classification, one function per failure domain.

fn classify_add_category(name: &str, err: sqlx::Error) -> Error {
    if is_unique_violation(&err) {
        return Error::already_exists(format!("category \"{name}\" already exists"))
            .with_source(err);
    }
    storage_error("add category", err)
}

fn classify_get_category_by_id(category_id: i64, err: sqlx::Error) -> Error {
    if is_row_not_found(&err) {
        return Error::not_found(format!("category with id \"{category_id}\" not found"))
            .with_source(err);
    }
    storage_error("get category by id", err)
}
