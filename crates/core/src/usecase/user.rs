// User Use Cases

use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::port::{PasswordHasher, TxManager, UserRepository};
use crate::usecase::dto::{AddUserDto, ChangePasswordDto, UpdateUserDto, UserDto};

pub struct UserUseCase {
    users: Arc<dyn UserRepository>,
    tx: Arc<dyn TxManager>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tx: Arc<dyn TxManager>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self { users, tx, hasher }
    }

    /// Register a new user.
    ///
    /// The insert and the follow-up update (writing back the generated
    /// id) form one atomic unit of work.
    pub async fn add(&self, ctx: &Context, input: AddUserDto) -> Result<i64> {
        let mut user = input.into_model()?;
        user.password = self.hasher.hash(&user.password)?;

        let users = Arc::clone(&self.users);
        let mut created_id = 0_i64;
        let created = &mut created_id;
        self.tx
            .run_in_tx(
                ctx,
                Box::new(move |tx_ctx| {
                    Box::pin(async move {
                        let id = users.add(&tx_ctx, &user).await?;
                        user.id = id;

                        let updated = users.update(&tx_ctx, &user).await?;
                        if updated != id {
                            return Err(Error::internal(
                                "updated user id does not match the created id",
                            ));
                        }
                        *created = id;
                        Ok(())
                    })
                }),
            )
            .await?;

        tracing::info!(user_id = created_id, "user registered");
        Ok(created_id)
    }

    pub async fn update_info(&self, ctx: &Context, user_id: i64, input: UpdateUserDto) -> Result<()> {
        let mut user = self.users.get_by_id(ctx, user_id).await?;
        user.update_info(&input.first_name, &input.last_name, &input.email)?;
        self.users.update(ctx, &user).await?;
        Ok(())
    }

    pub async fn change_password(
        &self,
        ctx: &Context,
        user_id: i64,
        input: ChangePasswordDto,
    ) -> Result<()> {
        let mut user = self.users.get_by_id(ctx, user_id).await?;
        user.change_password(&input.password)?;
        user.password = self.hasher.hash(&user.password)?;
        self.users.update(ctx, &user).await?;
        Ok(())
    }

    pub async fn get_by_id(&self, ctx: &Context, user_id: i64) -> Result<UserDto> {
        let user = self.users.get_by_id(ctx, user_id).await?;
        Ok(UserDto::from(&user))
    }

    pub async fn get_all(&self, ctx: &Context) -> Result<Vec<UserDto>> {
        let users = self.users.get_all(ctx).await?;
        Ok(users.iter().map(UserDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::error::ErrorKind;
    use crate::port::{MockPasswordHasher, MockUserRepository};
    use crate::usecase::support::RecordingTxManager;
    use std::sync::atomic::Ordering;

    fn add_input() -> AddUserDto {
        AddUserDto {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            password: "difference-engine".into(),
            reputation: 0,
        }
    }

    fn hasher_expecting_one_hash() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Ok("salt$digest".into()));
        hasher
    }

    #[tokio::test]
    async fn add_runs_insert_and_update_in_one_transaction() {
        let mut users = MockUserRepository::new();
        users
            .expect_add()
            .withf(|ctx, user: &User| {
                // Repository calls must see the transaction-scoped context.
                ctx.transaction().is_some() && user.password == "salt$digest"
            })
            .times(1)
            .returning(|_, _| Ok(7));
        users
            .expect_update()
            .withf(|ctx, user: &User| ctx.transaction().is_some() && user.id == 7)
            .times(1)
            .returning(|_, _| Ok(7));

        let tx = Arc::new(RecordingTxManager::default());
        let usecase = UserUseCase::new(
            Arc::new(users),
            Arc::clone(&tx) as Arc<dyn TxManager>,
            Arc::new(hasher_expecting_one_hash()),
        );

        let id = usecase.add(&Context::new(), add_input()).await.unwrap();
        assert_eq!(id, 7);
        assert_eq!(tx.begins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn add_rejects_invalid_input_before_touching_the_repository() {
        let users = MockUserRepository::new();
        let tx = Arc::new(RecordingTxManager::default());
        let usecase = UserUseCase::new(
            Arc::new(users),
            Arc::clone(&tx) as Arc<dyn TxManager>,
            Arc::new(MockPasswordHasher::new()),
        );

        let mut input = add_input();
        input.email = "broken".into();
        let err = usecase.add(&Context::new(), input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(tx.begins.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn add_propagates_the_repository_error_unchanged() {
        let mut users = MockUserRepository::new();
        users.expect_add().times(1).returning(|_, _| {
            Err(Error::already_exists(
                "user with email \"ada@example.org\" already exists",
            ))
        });

        let usecase = UserUseCase::new(
            Arc::new(users),
            Arc::new(RecordingTxManager::default()),
            Arc::new(hasher_expecting_one_hash()),
        );

        let err = usecase.add(&Context::new(), add_input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(
            err.message(),
            "user with email \"ada@example.org\" already exists"
        );
    }

    #[tokio::test]
    async fn add_flags_a_mismatched_returned_id_as_internal() {
        let mut users = MockUserRepository::new();
        users.expect_add().times(1).returning(|_, _| Ok(7));
        users.expect_update().times(1).returning(|_, _| Ok(8));

        let usecase = UserUseCase::new(
            Arc::new(users),
            Arc::new(RecordingTxManager::default()),
            Arc::new(hasher_expecting_one_hash()),
        );

        let err = usecase.add(&Context::new(), add_input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn change_password_hashes_before_persisting() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().times(1).returning(|_, id| {
            let mut user =
                User::new("Ada", "Lovelace", "ada@example.org", "old-password", 0).unwrap();
            user.id = id;
            Ok(user)
        });
        users
            .expect_update()
            .withf(|_, user: &User| user.password == "salt$digest")
            .times(1)
            .returning(|_, user| Ok(user.id));

        let usecase = UserUseCase::new(
            Arc::new(users),
            Arc::new(RecordingTxManager::default()),
            Arc::new(hasher_expecting_one_hash()),
        );

        usecase
            .change_password(
                &Context::new(),
                3,
                ChangePasswordDto {
                    password: "new-password".into(),
                },
            )
            .await
            .unwrap();
    }
}
