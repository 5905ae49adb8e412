// Port Layer - Interfaces implemented by adapters

pub mod category_repository;
pub mod crypto;
pub mod post_repository;
pub mod tx_manager;
pub mod user_repository;

// Re-exports
pub use category_repository::CategoryRepository;
pub use crypto::{PasswordHasher, TokenProvider};
pub use post_repository::PostRepository;
pub use tx_manager::{TxManager, UnitOfWork};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use crypto::{MockPasswordHasher, MockTokenProvider};
#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
