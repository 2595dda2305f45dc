use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    engine,
    error::AppError,
    handlers::parse_post_id,
    models::post::CreatePostRequest,
    store::{PostStore, load_post},
    utils::jwt::Claims,
};

/// Smoke route for the posts API.
pub async fn test_route() -> impl IntoResponse {
    Json(json!({ "message": "Posts Route Works" }))
}

/// Create a new post.
/// Requires: Login.
pub async fn create_post(
    State(store): State<Arc<dyn PostStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let post = engine::create_post(claims.user_id(), payload.into())?;
    store.insert(&post).await?;

    tracing::info!(post_id = %post.id, author = %post.author_id, "post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// List posts (Recent first).
pub async fn list_posts(
    State(store): State<Arc<dyn PostStore>>,
) -> Result<impl IntoResponse, AppError> {
    let posts = store.list().await?;
    Ok(Json(posts))
}

/// Get a single post by ID.
pub async fn get_post(
    State(store): State<Arc<dyn PostStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_post_id(&id)?;
    let post = load_post(store.as_ref(), id).await?;
    Ok(Json(post))
}

/// Delete a post.
/// Requires: Login + Author.
pub async fn delete_post(
    State(store): State<Arc<dyn PostStore>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_post_id(&id)?;
    let caller = claims.user_id();

    store
        .remove(id, &|post| engine::delete_post(post, caller).map(|_| ()))
        .await
        .inspect_err(|e| tracing::debug!(post_id = %id, caller, "delete rejected: {}", e))?;

    tracing::info!(post_id = %id, "post deleted");

    Ok(Json(json!({ "success": true })))
}
