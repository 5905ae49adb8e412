// Postgres User Repository

use async_trait::async_trait;

use plume_core::domain::User;
use plume_core::port::UserRepository;
use plume_core::{Context, Error, Result};

use crate::conn::{run_guarded, ConnManager};
use crate::error_map::{is_row_not_found, is_unique_violation, storage_error, violated_constraint};

pub struct PgUserRepository {
    conn: ConnManager,
}

impl PgUserRepository {
    pub fn new(conn: ConnManager) -> Self {
        Self { conn }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    firstname: String,
    lastname: String,
    email: String,
    password: String,
    reputation: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.user_id,
            first_name: row.firstname,
            last_name: row.lastname,
            email: row.email,
            password: row.password,
            reputation: row.reputation,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn add(&self, ctx: &Context, user: &User) -> Result<i64> {
        let mut conn = self.conn.conn(ctx).await?;
        let id = run_guarded(
            ctx,
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO users (firstname, lastname, email, password, reputation)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING user_id",
            )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.reputation)
            .fetch_one(conn.as_conn()),
            |e| classify_add_user(&user.email, e),
        )
        .await?;
        Ok(id)
    }

    async fn update(&self, ctx: &Context, user: &User) -> Result<i64> {
        let mut conn = self.conn.conn(ctx).await?;
        let id = run_guarded(
            ctx,
            sqlx::query_scalar::<_, i64>(
                "UPDATE users
                 SET firstname = $1, lastname = $2, email = $3, password = $4, reputation = $5
                 WHERE user_id = $6
                 RETURNING user_id",
            )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.reputation)
            .bind(user.id)
            .fetch_one(conn.as_conn()),
            |e| classify_update_user(user, e),
        )
        .await?;
        Ok(id)
    }

    async fn get_by_id(&self, ctx: &Context, user_id: i64) -> Result<User> {
        let mut conn = self.conn.conn(ctx).await?;
        let row = run_guarded(
            ctx,
            sqlx::query_as::<_, UserRow>(
                "SELECT user_id, firstname, lastname, email, password, reputation
                 FROM users
                 WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(conn.as_conn()),
            |e| classify_get_user_by_id(user_id, e),
        )
        .await?;
        Ok(row.into())
    }

    async fn get_by_email(&self, ctx: &Context, email: &str) -> Result<User> {
        let mut conn = self.conn.conn(ctx).await?;
        let row = run_guarded(
            ctx,
            sqlx::query_as::<_, UserRow>(
                "SELECT user_id, firstname, lastname, email, password, reputation
                 FROM users
                 WHERE email = $1",
            )
            .bind(email)
            .fetch_one(conn.as_conn()),
            |e| classify_get_user_by_email(email, e),
        )
        .await?;
        Ok(row.into())
    }

    async fn get_all(&self, ctx: &Context) -> Result<Vec<User>> {
        let mut conn = self.conn.conn(ctx).await?;
        let rows = run_guarded(
            ctx,
            sqlx::query_as::<_, UserRow>(
                "SELECT user_id, firstname, lastname, email, password, reputation
                 FROM users
                 ORDER BY user_id",
            )
            .fetch_all(conn.as_conn()),
            |e| storage_error("get all users", e),
        )
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

// Error classification, one function per failure domain.

fn classify_add_user(email: &str, err: sqlx::Error) -> Error {
    if is_unique_violation(&err)
        && matches!(
            violated_constraint(&err).as_deref(),
            Some("users_email_key") | None
        )
    {
        return Error::already_exists(format!("user with email \"{email}\" already exists"))
            .with_source(err);
    }
    storage_error("add user", err)
}

fn classify_update_user(user: &User, err: sqlx::Error) -> Error {
    if is_unique_violation(&err) {
        return Error::already_exists(format!(
            "user with email \"{}\" already exists",
            user.email
        ))
        .with_source(err);
    }
    if is_row_not_found(&err) {
        return Error::not_found(format!("user with id \"{}\" not found", user.id))
            .with_source(err);
    }
    storage_error("update user", err)
}

fn classify_get_user_by_id(user_id: i64, err: sqlx::Error) -> Error {
    if is_row_not_found(&err) {
        return Error::not_found(format!("user with id \"{user_id}\" not found"))
            .with_source(err);
    }
    storage_error("get user by id", err)
}

fn classify_get_user_by_email(email: &str, err: sqlx::Error) -> Error {
    if is_row_not_found(&err) {
        return Error::not_found(format!("user with email \"{email}\" not found"))
            .with_source(err);
    }
    storage_error("get user by email", err)
}
