// Domain Layer - Entities and their invariants

pub mod category;
pub mod post;
pub mod user;

// Re-exports
pub use category::Category;
pub use post::{Post, PostWithAuthor};
pub use user::User;
