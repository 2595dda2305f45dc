// src/engine.rs

//! Post aggregate mutations.
//!
//! Every function here is pure: it takes a loaded post and the caller's
//! identity and returns the next state or a [`PostError`]. Loading and
//! persisting is the store's job (see [`crate::store::PostStore::update`]).

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::PostError,
    models::{
        comment::Comment,
        post::{Draft, Like, Post},
    },
};

/// Builds a new post owned by `author_id`.
pub fn create_post(author_id: &str, draft: Draft) -> Result<Post, PostError> {
    let text = require_text(draft.text)?;

    Ok(Post {
        id: Uuid::new_v4(),
        author_id: author_id.to_owned(),
        text,
        author_name: draft.author_name,
        author_avatar_url: draft.author_avatar_url,
        created_at: Utc::now(),
        likes: Vec::new(),
        comments: Vec::new(),
    })
}

/// Records a like by `caller`. A second like from the same caller is rejected.
pub fn add_like(mut post: Post, caller: &str) -> Result<Post, PostError> {
    if post.is_liked_by(caller) {
        return Err(PostError::AlreadyLiked);
    }

    post.likes.insert(
        0,
        Like {
            user_id: caller.to_owned(),
        },
    );
    Ok(post)
}

/// Withdraws `caller`'s like, matched by user id.
pub fn remove_like(mut post: Post, caller: &str) -> Result<Post, PostError> {
    let index = post
        .likes
        .iter()
        .position(|like| like.user_id == caller)
        .ok_or(PostError::NotLiked)?;

    post.likes.remove(index);
    Ok(post)
}

/// Prepends a comment written by `caller`.
pub fn add_comment(mut post: Post, caller: &str, draft: Draft) -> Result<Post, PostError> {
    let text = require_text(draft.text)?;

    let comment = Comment {
        id: Uuid::new_v4(),
        user_id: caller.to_owned(),
        text,
        author_name: draft.author_name,
        author_avatar_url: draft.author_avatar_url,
        created_at: Utc::now(),
    };

    post.comments.insert(0, comment);
    Ok(post)
}

/// Removes the comment with `comment_id`. Other comments keep their order.
///
/// Not restricted to the comment's or the post's author.
pub fn remove_comment(mut post: Post, comment_id: Uuid) -> Result<Post, PostError> {
    let index = post
        .comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or(PostError::CommentNotFound)?;

    post.comments.remove(index);
    Ok(post)
}

/// Checks that `caller` may delete `post`; returns the id to remove.
pub fn delete_post(post: &Post, caller: &str) -> Result<Uuid, PostError> {
    if post.author_id != caller {
        return Err(PostError::NotAuthorized);
    }
    Ok(post.id)
}

/// Rejects blank text; accepted text is stored as received.
fn require_text(text: String) -> Result<String, PostError> {
    if text.trim().is_empty() {
        return Err(PostError::InvalidInput("Text field is required".to_string()));
    }
    Ok(text)
}
