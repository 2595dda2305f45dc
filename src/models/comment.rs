use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use validator::Validate;

use crate::{models::post::Draft, utils::html::clean_html};

/// A comment embedded in a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: String,
    pub text: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub text: String,

    #[validate(length(max = 100, message = "Name must be at most 100 chars"))]
    pub name: Option<String>,

    #[validate(length(max = 500), custom(function = validate_avatar_url))]
    pub avatar: Option<String>,
}

impl From<CreateCommentRequest> for Draft {
    fn from(req: CreateCommentRequest) -> Self {
        Draft {
            text: clean_html(&req.text),
            author_name: req.name.as_deref().map(clean_html).unwrap_or_default(),
            author_avatar_url: req.avatar,
        }
    }
}

/// Validates that an avatar is a correctly formatted URL.
pub(crate) fn validate_avatar_url(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}
