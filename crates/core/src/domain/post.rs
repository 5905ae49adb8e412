// Post Entity

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub likes: i64,
    pub is_published: bool,
    pub category_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A post joined with its author's public identity, as listed by the
/// feed queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author_email: String,
    pub author_name: String,
}

impl Post {
    pub fn new(
        user_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        is_published: bool,
        category_id: Option<i64>,
    ) -> Result<Self> {
        let post = Self {
            id: 0,
            user_id,
            title: title.into(),
            content: content.into(),
            likes: 0,
            is_published,
            category_id,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        };
        post.validate()?;
        Ok(post)
    }

    /// Apply an edit. Empty title/content keep the current value.
    pub fn update(&mut self, title: &str, content: &str, is_published: bool) -> Result<()> {
        if !title.is_empty() {
            self.title = title.to_owned();
        }
        if !content.is_empty() {
            self.content = content.to_owned();
        }
        self.is_published = is_published;
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title must not be empty"));
        }
        if self.content.trim().is_empty() {
            return Err(Error::validation("content must not be empty"));
        }
        if self.user_id <= 0 {
            return Err(Error::validation("post must have an author"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn new_validates_required_fields() {
        assert!(Post::new(1, "title", "content", false, None).is_ok());
        assert_eq!(
            Post::new(1, " ", "content", false, None).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Post::new(1, "title", "", true, None).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Post::new(0, "title", "content", false, None).unwrap_err().kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn update_keeps_fields_for_empty_patch_values() {
        let mut post = Post::new(1, "title", "content", false, None).unwrap();
        post.update("", "new content", true).unwrap();
        assert_eq!(post.title, "title");
        assert_eq!(post.content, "new content");
        assert!(post.is_published);
    }
}
