// Auth/Crypto Collaborator Ports
//
// Use cases only require that these can fail with a validation or
// internal domain error, propagated through the same channel as
// storage errors.

use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password for storage.
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a raw password against a stored hash. A malformed stored
    /// hash is an internal error, a mismatch is `Ok(false)`.
    fn verify(&self, password: &str, stored: &str) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    /// Issue an access token for `user_id`.
    fn issue(&self, user_id: i64) -> Result<String>;

    /// Verify an access token, returning the subject user id. Any
    /// verification failure is a validation error.
    fn verify(&self, token: &str) -> Result<i64>;
}
