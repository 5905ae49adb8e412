// Plume Infrastructure - Postgres Adapter
// Implements: UserRepository, PostRepository, CategoryRepository and
// the TxManager port via a context-attached transaction handle.

mod category_repository;
mod client;
mod conn;
mod error_map;
mod migration;
mod post_repository;
mod tx;
mod user_repository;

pub use category_repository::PgCategoryRepository;
pub use client::{DbClient, DbConfig};
pub use conn::{ConnManager, DbConn};
pub use migration::run_migrations;
pub use post_repository::PgPostRepository;
pub use tx::PgTxManager;
pub use user_repository::PgUserRepository;

// Note: sqlx::Error never crosses this crate's boundary; every failure
// is classified into the domain taxonomy at the point of occurrence.
