// Transfer Objects
//
// JSON field names follow the wire contract of the existing frontend,
// which is why the casing is not uniform across entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Post, PostWithAuthor, User};
use crate::error::Result;

fn rfc3339(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339())
}

// Users

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub reputation: i64,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            reputation: user.reputation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddUserDto {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub reputation: i64,
}

impl AddUserDto {
    pub fn into_model(self) -> Result<User> {
        User::new(
            self.first_name,
            self.last_name,
            self.email,
            self.password,
            self.reputation,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserDto {
    #[serde(default, rename = "firstName")]
    pub first_name: String,
    #[serde(default, rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordDto {
    pub password: String,
}

// Auth

#[derive(Debug, Clone, Deserialize)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedInUserDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub token: String,
}

// Posts

#[derive(Debug, Clone, Serialize)]
pub struct PostDto {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub is_published: bool,
    pub likes: i64,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl From<&Post> for PostDto {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title.clone(),
            content: post.content.clone(),
            category_id: post.category_id,
            is_published: post.is_published,
            likes: post.likes,
            created_at: rfc3339(post.created_at),
            updated_at: rfc3339(post.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthorDto {
    #[serde(flatten)]
    pub post: PostDto,
    #[serde(rename = "userEmail")]
    pub author_email: String,
    #[serde(rename = "userName")]
    pub author_name: String,
}

impl From<&PostWithAuthor> for PostWithAuthorDto {
    fn from(entry: &PostWithAuthor) -> Self {
        Self {
            post: PostDto::from(&entry.post),
            author_email: entry.author_email.clone(),
            author_name: entry.author_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPostDto {
    #[serde(default, rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl AddPostDto {
    pub fn into_model(self) -> Result<Post> {
        Post::new(
            self.user_id,
            self.title,
            self.content,
            self.is_published,
            self.category_id,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_published: bool,
}

// Categories

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl From<&Category> for CategoryDto {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            created_at: rfc3339(category.created_at),
            updated_at: rfc3339(category.updated_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCategoryDto {
    pub name: String,
}

impl AddCategoryDto {
    pub fn into_model(self) -> Result<Category> {
        Category::new(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_dto_uses_camel_case_names_on_the_wire() {
        let dto = UserDto {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            reputation: 3,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn logged_in_user_flattens_the_user_next_to_the_token() {
        let dto = LoggedInUserDto {
            user: UserDto {
                id: 7,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                reputation: 0,
            },
            token: "jwt".to_string(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["token"], "jwt");
        assert!(json.get("user").is_none());
    }

    #[test]
    fn add_post_dto_defaults_optional_fields() {
        let dto: AddPostDto =
            serde_json::from_str(r#"{"title": "t", "content": "c"}"#).unwrap();
        assert_eq!(dto.user_id, 0);
        assert!(!dto.is_published);
        assert_eq!(dto.category_id, None);
    }
}
