use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::comment::{Comment, validate_avatar_url},
    utils::html::clean_html,
};

/// A post document. Likes and comments are embedded and owned by the post;
/// both collections are kept newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub text: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,

    /// At most one entry per `user_id`.
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }
}

/// One user's endorsement of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub user_id: String,
}

/// Author-supplied content shared by posts and comments, already sanitized.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub text: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Missing text deserializes as empty so it fails validation like blank text.
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Text length must be between 1 and 1000 chars"
    ))]
    pub text: String,

    /// Display name of the author, copied onto the post.
    #[validate(length(max = 100, message = "Name must be at most 100 chars"))]
    pub name: Option<String>,

    #[validate(length(max = 500), custom(function = validate_avatar_url))]
    pub avatar: Option<String>,
}

impl From<CreatePostRequest> for Draft {
    fn from(req: CreatePostRequest) -> Self {
        Draft {
            text: clean_html(&req.text),
            author_name: req.name.as_deref().map(clean_html).unwrap_or_default(),
            author_avatar_url: req.avatar,
        }
    }
}
