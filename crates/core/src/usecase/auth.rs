// Auth Use Cases

use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::port::{PasswordHasher, TokenProvider, UserRepository};
use crate::usecase::dto::{LoggedInUserDto, LoginDto, UserDto};

pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
}

impl AuthUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn login(&self, ctx: &Context, input: LoginDto) -> Result<LoggedInUserDto> {
        let user = self.users.get_by_email(ctx, &input.email).await?;

        if !self.hasher.verify(&input.password, &user.password)? {
            return Err(Error::validation("invalid email or password"));
        }

        let token = self.tokens.issue(user.id)?;
        tracing::debug!(user_id = user.id, "login succeeded");
        Ok(LoggedInUserDto {
            user: UserDto::from(&user),
            token,
        })
    }

    /// Verify an `Authorization` header value, returning the
    /// authenticated user id.
    pub fn verify_access_token(&self, header: &str) -> Result<i64> {
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if token.is_empty() {
            return Err(Error::validation("missing access token"));
        }
        self.tokens.verify(token)
    }
}
