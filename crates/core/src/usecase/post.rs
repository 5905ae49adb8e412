// Post Use Cases

use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::port::{CategoryRepository, PostRepository, TxManager};
use crate::usecase::dto::{AddPostDto, PostDto, PostWithAuthorDto, UpdatePostDto};

pub struct PostUseCase {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    tx: Arc<dyn TxManager>,
}

impl PostUseCase {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        tx: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            posts,
            categories,
            tx,
        }
    }

    /// Publish a new post. The referenced category must exist; the
    /// not-found error from the category repository propagates as-is.
    pub async fn add(&self, ctx: &Context, input: AddPostDto) -> Result<i64> {
        let mut post = input.into_model()?;
        if let Some(category_id) = post.category_id {
            self.categories.get_by_id(ctx, category_id).await?;
        }

        let posts = Arc::clone(&self.posts);
        let mut created_id = 0_i64;
        let created = &mut created_id;
        self.tx
            .run_in_tx(
                ctx,
                Box::new(move |tx_ctx| {
                    Box::pin(async move {
                        let id = posts.create(&tx_ctx, &post).await?;
                        post.id = id;
                        *created = id;
                        Ok(())
                    })
                }),
            )
            .await?;

        tracing::info!(post_id = created_id, "post created");
        Ok(created_id)
    }

    pub async fn update(&self, ctx: &Context, post_id: i64, input: UpdatePostDto) -> Result<()> {
        let mut post = self.posts.get_by_id(ctx, post_id).await?;
        post.update(&input.title, &input.content, input.is_published)?;

        let updated = self.posts.update(ctx, &post).await?;
        if updated != post.id {
            return Err(Error::internal(
                "updated post id does not match the requested id",
            ));
        }
        Ok(())
    }

    pub async fn get_by_id(&self, ctx: &Context, post_id: i64) -> Result<PostDto> {
        let post = self.posts.get_by_id(ctx, post_id).await?;
        Ok(PostDto::from(&post))
    }

    pub async fn list_all(&self, ctx: &Context) -> Result<Vec<PostWithAuthorDto>> {
        let posts = self.posts.list_all(ctx).await?;
        Ok(posts.iter().map(PostWithAuthorDto::from).collect())
    }

    pub async fn list_published(&self, ctx: &Context) -> Result<Vec<PostWithAuthorDto>> {
        let posts = self.posts.list_published(ctx).await?;
        Ok(posts.iter().map(PostWithAuthorDto::from).collect())
    }

    pub async fn list_by_author(&self, ctx: &Context, user_id: i64) -> Result<Vec<PostWithAuthorDto>> {
        let posts = self.posts.list_by_author(ctx, user_id).await?;
        Ok(posts.iter().map(PostWithAuthorDto::from).collect())
    }

    pub async fn total_likes_by_author(&self, ctx: &Context, user_id: i64) -> Result<i64> {
        self.posts.total_likes_by_author(ctx, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Post};
    use crate::error::ErrorKind;
    use crate::port::{MockCategoryRepository, MockPostRepository};
    use crate::usecase::support::RecordingTxManager;
    use std::sync::atomic::Ordering;

    fn add_input(category_id: Option<i64>) -> AddPostDto {
        AddPostDto {
            user_id: 1,
            title: "On analytical engines".into(),
            content: "Notes".into(),
            is_published: true,
            category_id,
        }
    }

    #[tokio::test]
    async fn add_checks_the_category_and_creates_in_a_transaction() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .times(1)
            .returning(|_, id| {
                let mut category = Category::new("engineering").unwrap();
                category.id = id;
                Ok(category)
            });

        let mut posts = MockPostRepository::new();
        posts
            .expect_create()
            .withf(|ctx, _| ctx.transaction().is_some())
            .times(1)
            .returning(|_, _| Ok(11));

        let tx = Arc::new(RecordingTxManager::default());
        let usecase = PostUseCase::new(
            Arc::new(posts),
            Arc::new(categories),
            Arc::clone(&tx) as Arc<dyn TxManager>,
        );

        let id = usecase.add(&Context::new(), add_input(Some(3))).await.unwrap();
        assert_eq!(id, 11);
        assert_eq!(tx.begins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn add_propagates_a_missing_category_unchanged() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .times(1)
            .returning(|_, id| Err(Error::not_found(format!("category with id \"{id}\" not found"))));

        let posts = MockPostRepository::new();
        let tx = Arc::new(RecordingTxManager::default());
        let usecase = PostUseCase::new(
            Arc::new(posts),
            Arc::new(categories),
            Arc::clone(&tx) as Arc<dyn TxManager>,
        );

        let err = usecase
            .add(&Context::new(), add_input(Some(42)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "category with id \"42\" not found");
        assert_eq!(tx.begins.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_flags_a_mismatched_returned_id_as_internal() {
        let mut posts = MockPostRepository::new();
        posts.expect_get_by_id().times(1).returning(|_, id| {
            let mut post = Post::new(1, "title", "content", false, None).unwrap();
            post.id = id;
            Ok(post)
        });
        posts.expect_update().times(1).returning(|_, _| Ok(999));

        let usecase = PostUseCase::new(
            Arc::new(posts),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(RecordingTxManager::default()),
        );

        let err = usecase
            .update(
                &Context::new(),
                5,
                UpdatePostDto {
                    title: "new title".into(),
                    content: String::new(),
                    is_published: true,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn update_revalidates_the_patched_model() {
        let mut posts = MockPostRepository::new();
        posts.expect_get_by_id().times(1).returning(|_, id| {
            let mut post = Post::new(1, "title", "content", false, None).unwrap();
            post.id = id;
            // Content made blank by the patch must fail validation.
            post.content = " ".into();
            Ok(post)
        });

        let usecase = PostUseCase::new(
            Arc::new(posts),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(RecordingTxManager::default()),
        );

        let err = usecase
            .update(
                &Context::new(),
                5,
                UpdatePostDto {
                    title: String::new(),
                    content: String::new(),
                    is_published: false,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
