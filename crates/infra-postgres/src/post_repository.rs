// Postgres Post Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use plume_core::domain::{Post, PostWithAuthor};
use plume_core::port::PostRepository;
use plume_core::{Context, Error, Result};

use crate::conn::{run_guarded, ConnManager};
use crate::error_map::{is_row_not_found, is_unique_violation, storage_error};

const POST_WITH_AUTHOR_SELECT: &str =
    "SELECT p.id, p.user_id, p.title, p.content, p.is_published, p.likes,
            p.created_at, p.updated_at, p.deleted_at, p.category_id,
            u.email AS author_email, u.firstname AS author_name
     FROM posts p
     INNER JOIN users u ON p.user_id = u.user_id";

pub struct PgPostRepository {
    conn: ConnManager,
}

impl PgPostRepository {
    pub fn new(conn: ConnManager) -> Self {
        Self { conn }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    is_published: bool,
    likes: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    category_id: Option<i64>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            likes: row.likes,
            is_published: row.is_published,
            category_id: row.category_id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_email: String,
    author_name: String,
}

impl From<PostWithAuthorRow> for PostWithAuthor {
    fn from(row: PostWithAuthorRow) -> Self {
        Self {
            post: row.post.into(),
            author_email: row.author_email,
            author_name: row.author_name,
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, ctx: &Context, post: &Post) -> Result<i64> {
        let mut conn = self.conn.conn(ctx).await?;
        let id = run_guarded(
            ctx,
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO posts (user_id, title, content, is_published, category_id)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id",
            )
            .bind(post.user_id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(post.is_published)
            .bind(post.category_id)
            .fetch_one(conn.as_conn()),
            classify_create_post,
        )
        .await?;
        Ok(id)
    }

    async fn update(&self, ctx: &Context, post: &Post) -> Result<i64> {
        let mut conn = self.conn.conn(ctx).await?;
        let id = run_guarded(
            ctx,
            sqlx::query_scalar::<_, i64>(
                "UPDATE posts
                 SET title = $1, content = $2, is_published = $3, likes = $4,
                     category_id = $5, updated_at = now()
                 WHERE id = $6
                 RETURNING id",
            )
            .bind(&post.title)
            .bind(&post.content)
            .bind(post.is_published)
            .bind(post.likes)
            .bind(post.category_id)
            .bind(post.id)
            .fetch_one(conn.as_conn()),
            |e| classify_update_post(post.id, e),
        )
        .await?;
        Ok(id)
    }

    async fn get_by_id(&self, ctx: &Context, post_id: i64) -> Result<Post> {
        let mut conn = self.conn.conn(ctx).await?;
        let row = run_guarded(
            ctx,
            sqlx::query_as::<_, PostRow>(
                "SELECT id, user_id, title, content, is_published, likes,
                        created_at, updated_at, deleted_at, category_id
                 FROM posts
                 WHERE id = $1",
            )
            .bind(post_id)
            .fetch_one(conn.as_conn()),
            |e| classify_get_post_by_id(post_id, e),
        )
        .await?;
        Ok(row.into())
    }

    async fn list_all(&self, ctx: &Context) -> Result<Vec<PostWithAuthor>> {
        let mut conn = self.conn.conn(ctx).await?;
        let sql = format!("{POST_WITH_AUTHOR_SELECT} ORDER BY p.id");
        let rows = run_guarded(
            ctx,
            sqlx::query_as::<_, PostWithAuthorRow>(&sql).fetch_all(conn.as_conn()),
            |e| storage_error("get posts", e),
        )
        .await?;
        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn list_published(&self, ctx: &Context) -> Result<Vec<PostWithAuthor>> {
        let mut conn = self.conn.conn(ctx).await?;
        let sql = format!("{POST_WITH_AUTHOR_SELECT} WHERE p.is_published ORDER BY p.id");
        let rows = run_guarded(
            ctx,
            sqlx::query_as::<_, PostWithAuthorRow>(&sql).fetch_all(conn.as_conn()),
            |e| storage_error("get published posts", e),
        )
        .await?;
        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn list_by_author(&self, ctx: &Context, user_id: i64) -> Result<Vec<PostWithAuthor>> {
        let mut conn = self.conn.conn(ctx).await?;
        let sql = format!("{POST_WITH_AUTHOR_SELECT} WHERE p.user_id = $1 ORDER BY p.id");
        let rows = run_guarded(
            ctx,
            sqlx::query_as::<_, PostWithAuthorRow>(&sql)
                .bind(user_id)
                .fetch_all(conn.as_conn()),
            |e| storage_error("get posts by author", e),
        )
        .await?;
        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    async fn total_likes_by_author(&self, ctx: &Context, user_id: i64) -> Result<i64> {
        let mut conn = self.conn.conn(ctx).await?;
        run_guarded(
            ctx,
            sqlx::query_scalar::<_, i64>(
                "SELECT COALESCE(SUM(likes), 0) FROM posts WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(conn.as_conn()),
            |e| storage_error("get total likes by author", e),
        )
        .await
    }
}

// Error classification, one function per failure domain.

fn classify_create_post(err: sqlx::Error) -> Error {
    if is_unique_violation(&err) {
        return Error::already_exists("post already exists").with_source(err);
    }
    storage_error("create post", err)
}

fn classify_update_post(post_id: i64, err: sqlx::Error) -> Error {
    if is_row_not_found(&err) {
        return Error::not_found(format!("post with id \"{post_id}\" not found"))
            .with_source(err);
    }
    storage_error("update post", err)
}

fn classify_get_post_by_id(post_id: i64, err: sqlx::Error) -> Error {
    if is_row_not_found(&err) {
        return Error::not_found(format!("post with id \"{post_id}\" not found"))
            .with_source(err);
    }
    storage_error("get post by id", err)
}
