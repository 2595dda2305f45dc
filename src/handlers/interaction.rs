use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    engine,
    error::{AppError, PostError},
    handlers::parse_post_id,
    models::{
        comment::CreateCommentRequest,
        post::{Draft, Post},
    },
    store::{Mutation, PostStore},
    utils::jwt::Claims,
};

/// Runs one engine mutation against a stored post and returns the new state.
async fn apply(
    store: &dyn PostStore,
    post_id: Uuid,
    action: &str,
    mutation: Mutation<'_>,
) -> Result<Json<Post>, AppError> {
    let post = store.update(post_id, mutation).await.inspect_err(|e| {
        tracing::debug!(post_id = %post_id, action, "mutation rejected: {}", e)
    })?;

    Ok(Json(post))
}

/// Like a post.
pub async fn like_post(
    State(store): State<Arc<dyn PostStore>>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_post_id(&post_id)?;
    let caller = claims.user_id();

    apply(store.as_ref(), post_id, "like", &|post| engine::add_like(post, caller)).await
}

/// Withdraw a like.
pub async fn unlike_post(
    State(store): State<Arc<dyn PostStore>>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_post_id(&post_id)?;
    let caller = claims.user_id();

    apply(store.as_ref(), post_id, "unlike", &|post| {
        engine::remove_like(post, caller)
    })
    .await
}

/// Add a comment to a post.
pub async fn create_comment(
    State(store): State<Arc<dyn PostStore>>,
    Extension(claims): Extension<Claims>,
    Path(post_id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let post_id = parse_post_id(&post_id)?;
    let caller = claims.user_id();
    let draft = Draft::from(payload);

    apply(store.as_ref(), post_id, "comment", &|post| {
        engine::add_comment(post, caller, draft.clone())
    })
    .await
}

/// Remove a comment from a post.
/// Any logged-in user may remove any comment.
pub async fn delete_comment(
    State(store): State<Arc<dyn PostStore>>,
    Extension(claims): Extension<Claims>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_post_id(&post_id)?;
    let comment_id = Uuid::parse_str(&comment_id).map_err(|_| PostError::CommentNotFound)?;

    tracing::debug!(
        post_id = %post_id,
        comment_id = %comment_id,
        caller = claims.user_id(),
        "removing comment"
    );

    apply(store.as_ref(), post_id, "uncomment", &|post| {
        engine::remove_comment(post, comment_id)
    })
    .await
}
